//! Weapons plugin: fire control + hit resolution.
//!
//! # Layers
//! - `definition`: immutable weapon data and the run's catalog.
//! - `fire_control`: per-weapon ammo/cooldown/reload runtime (pure, time-injected).
//! - `hit_resolution`: pellet fan, ray candidate scan, damage, traces (pure,
//!   world-injected through `HitWorld`).
//! - `systems`: the ECS glue that feeds both from input, time and physics.
//!
//! Everything below `systems` is plain Rust and runs without an `App`.
//!
//! # Frame order (Update, InGame)
//! ```text
//!   select_weapon_from_input → equip_selected_weapon
//!   request_run_reset → apply_run_reset
//!   drive_fire_control → resolve_requested_shots → (projectiles) dispatch
//! ```

pub mod definition;
pub mod fire_control;
pub mod hit_resolution;
pub mod messages;
pub mod systems;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub use definition::{WeaponCatalog, WeaponDefinition, WeaponId};
pub use fire_control::{FireControl, FireState, ReloadBlocked, ShotBlocked, ShotRequest};
pub use hit_resolution::{Damageable, HitResolver, HitWorld, ImpactKind, RayCandidate, ShotTrace};

/// Ordering handle for systems that consume this plugin's messages.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponSystems {
    Equip,
    Fire,
    Resolve,
}

pub fn plugin(app: &mut App) {
    let tunables = app.world().get_resource::<Tunables>().cloned().unwrap_or_default();

    // Tie window is authored in meters; resolution runs in world units.
    app.init_resource::<WeaponCatalog>()
        .insert_resource(HitResolver::new(tunables.hit_tie_epsilon * tunables.pixels_per_meter));

    app.add_message::<messages::WeaponEquipped>()
        .add_message::<messages::AmmoChanged>()
        .add_message::<messages::ReloadProgressChanged>()
        .add_message::<messages::ShotRequested>()
        .add_message::<messages::RunReset>()
        .add_message::<ShotTrace>();

    app.add_systems(OnEnter(GameState::InGame), systems::open_run_session)
        .add_systems(OnExit(GameState::InGame), systems::close_run_session);

    app.configure_sets(
        Update,
        (WeaponSystems::Equip, WeaponSystems::Fire, WeaponSystems::Resolve)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        Update,
        (
            (systems::select_weapon_from_input, systems::equip_selected_weapon).chain(),
            (systems::request_run_reset, systems::apply_run_reset).chain(),
        )
            .in_set(WeaponSystems::Equip),
    )
    .add_systems(Update, systems::drive_fire_control.in_set(WeaponSystems::Fire))
    .add_systems(Update, systems::resolve_requested_shots.in_set(WeaponSystems::Resolve));
}
