//! Ray casts and overlap tests against circular hitboxes.
//!
//! Everything here is pure: callers snapshot the world into [`ColliderProbe`]s
//! and get entity lists back, which keeps resolution testable without an `App`.

use bevy::{
    ecs::entity::EntityHashSet,
    math::bounding::{BoundingCircle, RayCast2d},
    prelude::*,
};

/// Snapshot of a collider at attack time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderProbe {
    pub entity: Entity,
    pub center: Vec2,
    pub radius: f32,
    /// Carries a damage sink. Non-damageable colliders still block rays.
    pub damageable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub damageable: bool,
}

/// Outcome of a melee swing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MeleeResolution {
    /// First collider struck by each ray, in fan order
    pub ray_hits: Vec<Option<RayHit>>,
    /// Distinct damageable targets, in first-hit order
    pub targets: Vec<Entity>,
}

/// Fans `count` directions across `arc_degrees`, centered on `facing`.
///
/// A single ray points straight ahead; otherwise the rays are spaced evenly
/// from `-arc/2` to `+arc/2`.
pub fn melee_ray_directions(facing: Dir2, arc_degrees: f32, count: u32) -> Vec<Dir2> {
    match count {
        0 => Vec::new(),
        1 => vec![facing],
        n => {
            let step = arc_degrees / (n - 1) as f32;
            (0..n)
                .map(|i| Rot2::degrees(-arc_degrees / 2.0 + step * i as f32) * facing)
                .collect()
        }
    }
}

/// Nearest collider struck by a finite ray, skipping `ignore`.
pub fn cast_ray(
    origin: Vec2,
    direction: Dir2,
    max_distance: f32,
    probes: &[ColliderProbe],
    ignore: Option<Entity>,
) -> Option<RayHit> {
    cast_padded_ray(origin, direction, max_distance, 0.0, probes, ignore)
}

/// Same as [`cast_ray`] but every collider is inflated by `padding`, which
/// turns the ray into a swept circle of that radius.
pub fn cast_padded_ray(
    origin: Vec2,
    direction: Dir2,
    max_distance: f32,
    padding: f32,
    probes: &[ColliderProbe],
    ignore: Option<Entity>,
) -> Option<RayHit> {
    let ray = RayCast2d::new(origin, direction, max_distance);

    probes
        .iter()
        .filter(|probe| Some(probe.entity) != ignore)
        .filter_map(|probe| {
            let circle = BoundingCircle::new(probe.center, probe.radius + padding);
            ray.circle_intersection_at(&circle).map(|distance| RayHit {
                entity: probe.entity,
                distance,
                damageable: probe.damageable,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Casts the melee fan. Each ray stops at the first collider it meets; the
/// damageable ones are collected once each no matter how many rays hit them.
pub fn resolve_melee(
    origin: Vec2,
    facing: Dir2,
    arc_degrees: f32,
    ray_count: u32,
    range: f32,
    probes: &[ColliderProbe],
    attacker: Entity,
) -> MeleeResolution {
    let mut seen = EntityHashSet::default();
    let mut resolution = MeleeResolution::default();

    for direction in melee_ray_directions(facing, arc_degrees, ray_count) {
        let hit = cast_ray(origin, direction, range, probes, Some(attacker));
        if let Some(hit) = hit
            && hit.damageable
            && seen.insert(hit.entity)
        {
            resolution.targets.push(hit.entity);
        }
        resolution.ray_hits.push(hit);
    }

    resolution
}

/// Single hitscan ray. Returns the target only when the first collider on the
/// line is damageable.
pub fn resolve_hitscan(
    origin: Vec2,
    facing: Dir2,
    range: f32,
    probes: &[ColliderProbe],
    owner: Entity,
) -> Option<Entity> {
    cast_ray(origin, facing, range, probes, Some(owner))
        .filter(|hit| hit.damageable)
        .map(|hit| hit.entity)
}

/// First collider touched by a circle of `radius` moving from `start` to `end`.
/// A stationary circle only checks for overlap.
pub fn first_contact(
    start: Vec2,
    end: Vec2,
    radius: f32,
    probes: &[ColliderProbe],
    ignore: Option<Entity>,
) -> Option<RayHit> {
    let travel = end - start;
    match Dir2::new(travel) {
        Ok(direction) => {
            cast_padded_ray(start, direction, travel.length(), radius, probes, ignore)
        }
        Err(_) => probes
            .iter()
            .filter(|probe| Some(probe.entity) != ignore)
            .filter(|probe| probe.center.distance(start) <= probe.radius + radius)
            .min_by(|a, b| {
                a.center
                    .distance_squared(start)
                    .total_cmp(&b.center.distance_squared(start))
            })
            .map(|probe| RayHit {
                entity: probe.entity,
                distance: 0.0,
                damageable: probe.damageable,
            }),
    }
}

/// Damageable colliders whose hitbox overlaps a blast of `radius` at `center`.
pub fn blast_targets(center: Vec2, radius: f32, probes: &[ColliderProbe]) -> Vec<Entity> {
    let mut seen = EntityHashSet::default();
    probes
        .iter()
        .filter(|probe| probe.damageable)
        .filter(|probe| probe.center.distance(center) <= radius + probe.radius)
        .filter(|probe| seen.insert(probe.entity))
        .map(|probe| probe.entity)
        .collect()
}
