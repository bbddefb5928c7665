use {
    crate::{
        geometry::{self, ColliderProbe},
        systems::{ColliderQuery, collect_probes},
    },
    bevy::prelude::*,
    combat_events::{DamageRequest, Detonated, ProjectileHit},
    combatant_components::{Explosive, Projectile, ProjectileLifetime},
};

/// Moves every projectile by one frame, sweeping the covered path so fast
/// shots cannot skip over thin hitboxes.
///
/// Bullets stop at the first non-owner collider and damage it if it can take
/// damage. Grenades come to rest against colliders and explode when their fuse
/// runs out, or right away on contact when configured to.
pub fn advance_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(
        Entity,
        &mut Projectile,
        &mut Transform,
        Option<&mut ProjectileLifetime>,
        Option<&mut Explosive>,
    )>,
    colliders: ColliderQuery,
) {
    if projectiles.is_empty() {
        return;
    }

    let delta = time.delta();
    let probes = collect_probes(&colliders);

    for (entity, mut projectile, mut transform, lifetime, explosive) in projectiles.iter_mut() {
        let start = transform.translation.truncate();
        let end = start + projectile.velocity * delta.as_secs_f32();
        let contact = geometry::first_contact(
            start,
            end,
            projectile.radius,
            &probes,
            Some(projectile.owner),
        );
        let contact_point = contact.map(|hit| start + (end - start).normalize_or_zero() * hit.distance);

        if let Some(mut explosive) = explosive {
            explosive.fuse.tick(delta);

            let position = match contact_point {
                Some(point) if explosive.detonate_on_contact => {
                    detonate(&mut commands, entity, &projectile, &explosive, point, &probes);
                    continue;
                }
                Some(point) => {
                    projectile.velocity = Vec2::ZERO;
                    point
                }
                None => end,
            };

            set_position(&mut transform, position);
            if explosive.fuse.is_finished() {
                detonate(&mut commands, entity, &projectile, &explosive, position, &probes);
            }
            continue;
        }

        if let Some(hit) = contact {
            if hit.damageable {
                trace!(projectile = ?entity, victim = ?hit.entity, "Projectile hit");
                commands.trigger(DamageRequest {
                    source: Some(projectile.owner),
                    target: hit.entity,
                    amount: projectile.damage,
                });
                commands.trigger(ProjectileHit {
                    projectile: entity,
                    target: hit.entity,
                    damage: projectile.damage,
                });
            }
            commands.entity(entity).despawn();
            continue;
        }

        set_position(&mut transform, end);
        if let Some(mut lifetime) = lifetime
            && lifetime.0.tick(delta).is_finished()
        {
            trace!(projectile = ?entity, "Projectile expired");
            commands.entity(entity).despawn();
        }
    }
}

fn set_position(transform: &mut Transform, position: Vec2) {
    transform.translation.x = position.x;
    transform.translation.y = position.y;
}

/// Damages every damageable collider in the blast once, the thrower included.
fn detonate(
    commands: &mut Commands,
    entity: Entity,
    projectile: &Projectile,
    explosive: &Explosive,
    position: Vec2,
    probes: &[ColliderProbe],
) {
    let targets = geometry::blast_targets(position, explosive.blast_radius, probes);
    debug!(
        projectile = ?entity,
        ?position,
        targets = targets.len(),
        "Grenade detonated"
    );

    for &target in &targets {
        commands.trigger(DamageRequest {
            source: Some(projectile.owner),
            target,
            amount: projectile.damage,
        });
    }
    commands.trigger(Detonated {
        projectile: entity,
        position,
        targets,
    });
    commands.entity(entity).despawn();
}
