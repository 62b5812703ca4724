//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `armory::game::configure_headless` to install gameplay plugins.
//!
//! Time advances by a fixed step per `update()` so cooldowns and tracer
//! flights are reproducible.

#![allow(dead_code)]

use std::time::Duration;

use armory::plugins::player::{Aim, PlayerInput};
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub const STEP: Duration = Duration::from_millis(100);

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    armory::game::configure_headless(&mut app);

    // `App::run` would do this; tests drive `update()` directly.
    app.finish();
    app.cleanup();
    app
}

/// Headless apps have no keyboard; tests drive intent directly.
pub fn set_input(app: &mut App, f: impl FnOnce(&mut PlayerInput)) {
    let mut input = app.world_mut().resource_mut::<PlayerInput>();
    *input = PlayerInput::default();
    f(&mut input);
}

/// Cursor position in world space; `None` aims along the fallback direction.
pub fn set_aim(app: &mut App, world_cursor: Option<Vec2>) {
    app.world_mut().resource_mut::<Aim>().world_cursor = world_cursor;
}

pub fn tick(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
