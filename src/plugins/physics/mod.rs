//! Physics plugin: avian2d, top-down (no gravity).
//!
//! Only walls, enemies and the player carry colliders. Pellets are ray
//! queries against the spatial query pipeline, never bodies.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    // World units are pixels; weapon ranges are meters.
    let ppm = app
        .world()
        .get_resource::<Tunables>()
        .map_or(Tunables::default().pixels_per_meter, |t| t.pixels_per_meter);

    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm))
        .insert_resource(Gravity(Vec2::ZERO));
}
