//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    /// Tracer travel speed in world units per second.
    pub tracer_speed: f32,
    pub tracer_pool_capacity: usize,
    /// Distance under which a tracer counts as arrived.
    pub tracer_arrival_tolerance: f32,
    /// Depth window (meters) in which an enemy beats a coincident blocking collider.
    pub hit_tie_epsilon: f32,
    /// Capacity of one pellet's ray query. Hits past this are dropped by the query.
    pub max_ray_hits: u32,
    /// Distance from the shooter's centre to the muzzle, in world units.
    pub muzzle_offset: f32,
    pub auto_reload_on_empty: bool,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 420.0,
            tracer_speed: 1800.0,
            tracer_pool_capacity: 64,
            tracer_arrival_tolerance: 0.5,
            hit_tie_epsilon: 0.01,
            max_ray_hits: 16,
            muzzle_offset: 18.0,
            auto_reload_on_empty: true,
        }
    }
}
