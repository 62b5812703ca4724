//! Hit resolution: one trigger pull → N pellet rays → N traces.
//!
//! # Per-pellet pass
//! ```text
//!   pellet direction (symmetric fan)
//!        │
//!        v
//!   HitWorld::cast_ray  ── unordered, capped batch of candidates
//!        │
//!        v
//!   single linear scan
//!     - no collider          → skip
//!     - owner's own collider → skip
//!     - live damageable      → nearest_target
//!     - anything else        → nearest_blocker
//!        │
//!        v
//!   pick: target wins if no blocker, or target ≤ blocker + tie_epsilon
//!        │
//!        v
//!   apply damage (target only) → emit exactly one ShotTrace
//! ```
//!
//! The batch is never assumed sorted, and a saturated batch is taken as-is:
//! nearer hits dropped by the query are not recovered.

use bevy::prelude::*;

use super::definition::WeaponId;
use super::fire_control::ShotRequest;

/// Aim used when the supplied direction has no usable length.
pub const FALLBACK_AIM: Dir2 = Dir2::Y;

const MIN_AIM_LENGTH_SQUARED: f32 = 1e-6;

/// Anything a pellet can hurt.
pub trait Damageable {
    fn is_alive(&self) -> bool;

    fn position(&self) -> Vec2;

    /// Returns `false` when the target refuses (e.g. already dead).
    fn try_apply_damage(&mut self, amount: i32, point: Vec2, source: &WeaponId) -> bool;
}

impl<T: Damageable + ?Sized> Damageable for &mut T {
    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }

    fn position(&self) -> Vec2 {
        (**self).position()
    }

    fn try_apply_damage(&mut self, amount: i32, point: Vec2, source: &WeaponId) -> bool {
        (**self).try_apply_damage(amount, point, source)
    }
}

/// One raw result of a pellet ray query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayCandidate {
    pub collider: Option<Entity>,
    pub distance: f32,
    pub point: Vec2,
}

/// The simulated world as seen by hit resolution.
pub trait HitWorld {
    type Target<'a>: Damageable
    where
        Self: 'a;

    /// Append up to the query's fixed capacity of candidates, in any order.
    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32, out: &mut Vec<RayCandidate>);

    /// The damageable behind a collider, if there is one.
    fn target(&mut self, collider: Entity) -> Option<Self::Target<'_>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ImpactKind {
    #[default]
    None,
    Enemy,
    BlockingCollider,
}

/// Resolved outcome of one pellet.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct ShotTrace {
    pub weapon_id: WeaponId,
    pub pellet_index: u32,
    pub pellet_count: u32,
    pub origin: Vec2,
    pub direction: Vec2,
    pub end_point: Vec2,
    pub max_range: f32,
    pub traveled_distance: f32,
    pub impact: ImpactKind,
    pub impact_collider: Option<Entity>,
}

/// Normalize an aim vector, falling back to [`FALLBACK_AIM`] when degenerate.
///
/// Degenerate means too short, non-finite, or so long its length overflows.
pub fn aim_direction(raw: Vec2) -> Dir2 {
    Dir2::new(raw)
        .ok()
        .filter(|_| raw.length_squared() >= MIN_AIM_LENGTH_SQUARED)
        .unwrap_or(FALLBACK_AIM)
}

/// Angular offset of pellet `index` in degrees.
///
/// A single pellet is never offset. Otherwise the fan spans `[-spread/2, +spread/2]`
/// in equal steps, so an odd count has a zero-offset centre pellet.
pub fn pellet_offset_degrees(index: u32, pellet_count: u32, spread_degrees: f32) -> f32 {
    if pellet_count <= 1 {
        return 0.0;
    }
    let step = spread_degrees / (pellet_count - 1) as f32;
    -spread_degrees * 0.5 + index as f32 * step
}

pub fn pellet_direction(base: Dir2, index: u32, pellet_count: u32, spread_degrees: f32) -> Dir2 {
    let offset = pellet_offset_degrees(index, pellet_count, spread_degrees);
    if offset == 0.0 {
        return base;
    }
    Rot2::degrees(offset) * base
}

#[derive(Clone, Copy, Debug)]
struct Pellet {
    origin: Vec2,
    dir: Dir2,
    index: u32,
    count: u32,
}

#[derive(Clone, Copy, Debug)]
struct Nearest {
    collider: Entity,
    distance: f32,
    point: Vec2,
}

impl Nearest {
    #[inline]
    fn keep_closer(slot: &mut Option<Nearest>, candidate: Nearest) {
        match slot {
            Some(current) if current.distance <= candidate.distance => {}
            _ => *slot = Some(candidate),
        }
    }
}

/// Owns the scratch candidate buffer so repeated shots don't allocate.
#[derive(Resource, Debug)]
pub struct HitResolver {
    pub tie_epsilon: f32,
    candidates: Vec<RayCandidate>,
}

impl Default for HitResolver {
    fn default() -> Self {
        Self::new(0.01)
    }
}

impl HitResolver {
    pub fn new(tie_epsilon: f32) -> Self {
        Self {
            tie_epsilon,
            candidates: Vec::new(),
        }
    }

    /// Resolve every pellet of `shot` in order, applying damage as it goes.
    ///
    /// `sink` receives exactly one trace per pellet, before the next pellet is cast.
    /// Returns the number of pellets whose damage was accepted.
    pub fn resolve_shot<W: HitWorld>(
        &mut self,
        shot: &ShotRequest,
        origin: Vec2,
        direction: Vec2,
        owner: Option<Entity>,
        world: &mut W,
        mut sink: impl FnMut(ShotTrace),
    ) -> u32 {
        let base = aim_direction(direction);
        let pellet_count = shot.pellet_count.max(1);
        let mut applied = 0;

        for index in 0..pellet_count {
            let pellet = Pellet {
                origin,
                dir: pellet_direction(base, index, pellet_count, shot.spread_degrees),
                index,
                count: pellet_count,
            };
            let (trace, damaged) = self.resolve_pellet(shot, pellet, owner, world);
            if damaged {
                applied += 1;
            }
            sink(trace);
        }

        applied
    }

    fn resolve_pellet<W: HitWorld>(
        &mut self,
        shot: &ShotRequest,
        pellet: Pellet,
        owner: Option<Entity>,
        world: &mut W,
    ) -> (ShotTrace, bool) {
        let Pellet { origin, dir, .. } = pellet;

        self.candidates.clear();
        world.cast_ray(origin, dir, shot.range, &mut self.candidates);

        let mut nearest_target: Option<Nearest> = None;
        let mut nearest_blocker: Option<Nearest> = None;

        for candidate in &self.candidates {
            let Some(collider) = candidate.collider else {
                continue;
            };
            if Some(collider) == owner {
                continue;
            }

            let hit = Nearest {
                collider,
                distance: candidate.distance,
                point: candidate.point,
            };
            if world.target(collider).is_some_and(|t| t.is_alive()) {
                Nearest::keep_closer(&mut nearest_target, hit);
            } else {
                Nearest::keep_closer(&mut nearest_blocker, hit);
            }
        }

        let eps = self.tie_epsilon;
        let (end_point, impact, impact_collider, damaged) = match (nearest_target, nearest_blocker) {
            (Some(t), blocker) if blocker.is_none_or(|b| t.distance <= b.distance + eps) => {
                let damaged = world.target(t.collider).is_some_and(|mut target| {
                    target.try_apply_damage(shot.damage_per_pellet, t.point, &shot.weapon_id)
                });
                (t.point, ImpactKind::Enemy, Some(t.collider), damaged)
            }
            (_, Some(b)) => (b.point, ImpactKind::BlockingCollider, Some(b.collider), false),
            _ => (origin + *dir * shot.range, ImpactKind::None, None, false),
        };

        let trace = ShotTrace {
            weapon_id: shot.weapon_id.clone(),
            pellet_index: pellet.index,
            pellet_count: pellet.count,
            origin,
            direction: *dir,
            end_point,
            max_range: shot.range,
            traveled_distance: origin.distance(end_point).min(shot.range),
            impact,
            impact_collider,
        };

        (trace, damaged)
    }
}
