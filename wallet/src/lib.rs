use bevy::prelude::*;

/// Per-entity currency ledger.
///
/// Every flow that touches money (weapon shop, ability learning, minigame
/// sessions) goes through [`Wallet::spend_balance`] and [`Wallet::add_balance`].
/// Each call checks and mutates in one step, so a debit is all-or-nothing.
#[derive(Component, Reflect, Default, Debug, Clone, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Wallet {
    balance: i64,
}

impl Wallet {
    pub fn with_balance(balance: i64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn can_afford(&self, amount: i64) -> bool {
        amount <= 0 || self.balance >= amount
    }

    /// Credits `amount`. Non-positive amounts are ignored.
    pub fn add_balance(&mut self, amount: i64) {
        if amount <= 0 {
            return;
        }
        self.balance += amount;
    }

    /// Debits `amount` and reports whether the debit happened.
    ///
    /// Non-positive amounts succeed without touching the balance. When the
    /// balance is short, the debit fails and nothing changes unless
    /// `allow_negative` is set, in which case the balance may drop below zero.
    pub fn spend_balance(&mut self, amount: i64, allow_negative: bool) -> bool {
        if amount <= 0 {
            return true;
        }

        if self.balance >= amount || allow_negative {
            self.balance -= amount;
            return true;
        }

        false
    }
}

pub struct WalletPlugin;

impl Plugin for WalletPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Wallet>();
    }
}
