//! Core plugin: run-wide configuration.
//!
//! `Tunables` inserted before plugin registration wins (tests do this);
//! otherwise defaults apply.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>()
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)))
        .add_systems(Startup, log_tunables);
}

fn log_tunables(tunables: Res<Tunables>) {
    info!(
        "{} px/m, tracer pool {}, ray cap {}, tie window {} m",
        tunables.pixels_per_meter, tunables.tracer_pool_capacity, tunables.max_ray_hits, tunables.hit_tie_epsilon
    );
}
