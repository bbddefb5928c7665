use {
    crate::{
        engine::WeaponSlot,
        geometry::{self, ColliderProbe},
    },
    bevy::prelude::*,
    bonus_stats::{BonusStats, keys},
    combat_events::{
        AttackPerformed, AttackRequest, CombatantKilled, DamageRequest, HitscanHit, MeleeHit,
        ProjectileLaunched,
    },
    combatant_components::{Dead, Explosive, Health, Projectile, ProjectileLifetime},
    shared_components::{Facing, Hitbox, MovementLock},
    weapon_assets::{ProjectileBehavior, ProjectileTemplate, WeaponDefinition, WeaponKind},
};

/// Colliders that can block rays and receive hits. Projectiles are excluded so
/// shots never collide with each other.
pub type ColliderQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Transform, &'static Hitbox, Has<Health>),
    (Without<Dead>, Without<Projectile>),
>;

pub fn collect_probes(colliders: &ColliderQuery<'_, '_>) -> Vec<ColliderProbe> {
    colliders
        .iter()
        .map(|(entity, transform, hitbox, damageable)| ColliderProbe {
            entity,
            center: transform.translation.truncate(),
            radius: hitbox.radius,
            damageable,
        })
        .collect()
}

/// Resolves an [`AttackRequest`] with the attacker's equipped weapon.
pub fn perform_attack(
    trigger: On<AttackRequest>,
    mut commands: Commands,
    time: Res<Time>,
    mut attackers: Query<
        (
            &mut WeaponSlot,
            &Transform,
            &Facing,
            Option<&MovementLock>,
            Option<&BonusStats>,
        ),
        Without<Dead>,
    >,
    colliders: ColliderQuery,
) {
    let attacker = trigger.event().attacker;
    let Ok((mut slot, transform, facing, lock, bonuses)) = attackers.get_mut(attacker) else {
        debug!(?attacker, "Attack ignored: attacker has no weapon slot or is dead");
        return;
    };

    let now = time.elapsed_secs();
    let locked = lock.is_some_and(MovementLock::is_locked);
    let Some(def) = slot.begin_attack(now, locked) else {
        trace!(
            ?attacker,
            cooldown = slot.cooldown_remaining(now),
            ammo = slot.ammo(),
            locked,
            "Attack rejected"
        );
        return;
    };
    let def = def.clone();

    let damage = bonuses.map_or(def.damage, |b| b.apply_int(keys::DAMAGE_DEALT, def.damage));
    let origin = transform.translation.truncate();

    debug!(?attacker, weapon = %def.id, damage, "Attack performed");
    commands.trigger(AttackPerformed {
        attacker,
        weapon_id: def.id.clone(),
    });

    match (def.kind, def.projectile) {
        (
            WeaponKind::Melee {
                arc_degrees,
                ray_count,
            },
            _,
        ) => {
            let probes = collect_probes(&colliders);
            let resolution = geometry::resolve_melee(
                origin,
                facing.0,
                arc_degrees,
                ray_count,
                def.range,
                &probes,
                attacker,
            );
            if resolution.targets.is_empty() {
                return;
            }

            for &target in &resolution.targets {
                commands.trigger(DamageRequest {
                    source: Some(attacker),
                    target,
                    amount: damage,
                });
            }
            commands.trigger(MeleeHit {
                attacker,
                targets: resolution.targets,
                damage,
            });
        }
        (WeaponKind::Ranged, Some(template)) => {
            launch_projectile(
                &mut commands,
                attacker,
                transform.translation,
                facing.0,
                &def,
                template,
                damage,
            );
        }
        (WeaponKind::Ranged, None) => {
            let probes = collect_probes(&colliders);
            let Some(target) =
                geometry::resolve_hitscan(origin, facing.0, def.range, &probes, attacker)
            else {
                return;
            };

            commands.trigger(DamageRequest {
                source: Some(attacker),
                target,
                amount: damage,
            });
            commands.trigger(HitscanHit {
                attacker,
                target,
                damage,
            });
        }
    }
}

/// Spawns a free-flying projectile. Bullets live until they cover the weapon
/// range; grenades rely on their fuse.
fn launch_projectile(
    commands: &mut Commands,
    owner: Entity,
    origin: Vec3,
    facing: Dir2,
    def: &WeaponDefinition,
    template: ProjectileTemplate,
    damage: i32,
) -> Option<Entity> {
    if def.projectile_speed <= 0.0 {
        warn!(weapon = %def.id, "Projectile weapon has no speed, nothing launched");
        return None;
    }

    let projectile = Projectile {
        owner,
        damage,
        velocity: *facing * def.projectile_speed,
        radius: template.radius,
    };

    let mut entity = commands.spawn((
        Name::new(format!("{} projectile", def.id)),
        projectile,
        Transform::from_translation(origin),
    ));

    match template.behavior {
        ProjectileBehavior::Bullet => {
            let seconds = def.range / def.projectile_speed;
            entity.insert(ProjectileLifetime(Timer::from_seconds(
                seconds,
                TimerMode::Once,
            )));
        }
        ProjectileBehavior::Grenade {
            fuse,
            blast_radius,
            detonate_on_contact,
        } => {
            entity.insert(Explosive {
                fuse: Timer::from_seconds(fuse, TimerMode::Once),
                blast_radius,
                detonate_on_contact,
            });
        }
    }

    let projectile = entity.id();
    commands.trigger(ProjectileLaunched { owner, projectile });
    Some(projectile)
}

/// Applies a [`DamageRequest`], scaled by the target's incoming damage bonuses.
/// The hit that empties a health pool marks the target [`Dead`].
pub fn apply_damage(
    trigger: On<DamageRequest>,
    mut commands: Commands,
    mut targets: Query<(&mut Health, Option<&BonusStats>, Has<Dead>)>,
) {
    let request = trigger.event();
    let Ok((mut health, bonuses, dead)) = targets.get_mut(request.target) else {
        debug!(victim = ?request.target, "Damage ignored: target has no health");
        return;
    };

    // A pool already at zero was killed by an earlier hit in the same frame
    if dead || health.is_depleted() {
        return;
    }

    let amount = bonuses.map_or(request.amount, |b| {
        b.apply_int(keys::DAMAGE_TAKEN, request.amount)
    });
    health.take_damage(amount);
    debug!(
        victim = ?request.target,
        source = ?request.source,
        amount,
        remaining = health.current,
        "Damage applied"
    );

    if health.is_depleted() {
        debug!(entity = ?request.target, killer = ?request.source, "Combatant killed");
        commands.entity(request.target).insert(Dead);
        commands.trigger(CombatantKilled {
            entity: request.target,
            killer: request.source,
        });
    }
}
