use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    shared_components::MovementLock,
    wallet::Wallet,
};

/// Money rules of an interaction.
#[derive(Reflect, Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionTerms {
    /// Charged when the session starts; 0 means free
    #[serde(default)]
    pub start_cost: i64,
    /// A short wallet does not prevent the start; it goes negative instead
    #[serde(default)]
    pub allow_negative_on_start: bool,
    /// Credited when the session ends
    #[serde(default)]
    pub reward: i64,
}

/// Start and end of one interaction.
///
/// Starting locks the player and charges the start cost; ending pays out the
/// reward and unlocks. Both are idempotent.
#[derive(Reflect, Debug, Default, Clone, PartialEq)]
pub struct SessionLifecycle {
    terms: SessionTerms,
    running: bool,
}

impl SessionLifecycle {
    pub fn new(terms: SessionTerms) -> Self {
        Self {
            terms,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn terms(&self) -> SessionTerms {
        self.terms
    }

    /// Replaces the payout of the running interaction, e.g. a won wager.
    pub fn set_reward(&mut self, reward: i64) {
        self.terms.reward = reward;
    }

    /// Returns `None` when already running, otherwise whether the start cost
    /// was covered. An uncovered cost never blocks the start.
    pub fn start(&mut self, wallet: &mut Wallet, lock: &mut MovementLock) -> Option<bool> {
        if self.running {
            return None;
        }

        self.running = true;
        lock.0 = true;

        let paid = self.terms.start_cost <= 0
            || wallet.spend_balance(self.terms.start_cost, self.terms.allow_negative_on_start);
        Some(paid)
    }

    /// Returns the credited reward, or `None` when nothing was running.
    pub fn end(&mut self, wallet: &mut Wallet, lock: &mut MovementLock) -> Option<i64> {
        if !self.running {
            return None;
        }

        self.running = false;
        wallet.add_balance(self.terms.reward);
        lock.0 = false;
        Some(self.terms.reward.max(0))
    }
}
