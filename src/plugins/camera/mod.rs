//! Camera plugin (render-only).
//!
//! A smoothed follow camera. `MainCamera` is also what the input adapter
//! projects the cursor through, so aim needs this plugin in the full app.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera;

/// Exponential follow rate, per second.
const RESPONSIVENESS: f32 = 5.0;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    // Disjointness proof: Player entities are not MainCamera entities.
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else { return; };
    let Ok(mut tf_cam) = q_cam.single_mut() else { return; };

    let alpha = 1.0 - (-RESPONSIVENESS * time.delta_secs()).exp();
    let target = tf_player.translation.truncate();
    let current = tf_cam.translation.truncate();
    let next = current + (target - current) * alpha;

    tf_cam.translation.x = next.x;
    tf_cam.translation.y = next.y;
}
