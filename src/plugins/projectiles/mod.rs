//! Projectiles plugin: pooled visual tracers, synchronized to resolved shots.
//!
//! # Philosophy: invariants first
//! Damage is already settled by the time a tracer exists. Tracers never
//! collide and never decide anything; they only replay a `ShotTrace` from
//! origin to end point. That keeps this module free of gameplay branching:
//! - the pool is the single owner of tracer entities (`pool.rs`),
//! - the spawner is the single writer of the pool (`spawner.rs`),
//! - flight math lives on the component and is testable without an App.
//!
//! # Data flow
//! ```text
//!   Update (InGame)
//!┌────────────────────────────────────────────────────────────────────────┐
//!│  (A) weapons: resolve_requested_shots → ShotTrace messages             │
//!│                                                                        │
//!│  (B) dispatch_shot_traces                                              │
//!│      - reads: ShotTrace                                                │
//!│      - mutates: ProjectileSpawner.pool (get → active)                  │
//!│      - writes: Bullet (launched), Transform, Sprite, Visibility        │
//!│                                                                        │
//!│  (C) advance_tracers                                                   │
//!│      - mutates: Bullet.position → Transform                            │
//!│      - on arrival: pool release (active → inactive, hidden, reset)     │
//!│                                                                        │
//!│  (D) recall_on_run_reset                                               │
//!│      - reads: RunReset; releases every active tracer                   │
//!└────────────────────────────────────────────────────────────────────────┘
//!   OnEnter(InGame): prewarm to capacity     OnExit(InGame): clear (despawn all)
//! ```

pub mod components;
pub mod pool;
pub mod spawner;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::weapons::WeaponSystems;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let tunables = app.world().get_resource::<Tunables>().cloned().unwrap_or_default();

        app.insert_resource(spawner::ProjectileSpawner::new(
            tunables.tracer_speed,
            tunables.tracer_arrival_tolerance,
        ));

        app.add_systems(OnEnter(GameState::InGame), spawner::init_bullet_pool)
            .add_systems(OnExit(GameState::InGame), spawner::teardown_bullet_pool);

        app.add_systems(
            Update,
            (
                spawner::recall_on_run_reset,
                spawner::dispatch_shot_traces,
                spawner::advance_tracers,
            )
                .chain()
                .after(WeaponSystems::Resolve)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
