//! Player plugin: the input adapter.
//!
//! Pipeline:
//! - Update: sample keyboard/mouse into `PlayerInput`, cursor into `Aim`
//!   (before any weapon system reads them)
//! - FixedUpdate: apply velocity to kinematic rigid body
//!
//! Without a window (headless apps) `Aim` is left as injected; a window with
//! the cursor outside it clears `Aim`. Nothing else here depends on render
//! infrastructure.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::camera::MainCamera;
use crate::plugins::weapons::WeaponSystems;

#[derive(Component)]
pub struct Player;

/// One frame of player intent.
#[derive(Resource, Default, Debug, Clone)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub fire_held: bool,
    pub reload_pressed: bool,
    /// Catalog slot requested this frame.
    pub swap_to: Option<usize>,
    pub reset_pressed: bool,
}

/// Cursor position in world space, if the cursor is over the window.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct Aim {
    pub world_cursor: Option<Vec2>,
}

const SWAP_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .init_resource::<Aim>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (gather_input, update_aim_from_cursor)
                .before(WeaponSystems::Equip)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, apply_movement);
}

fn spawn(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy]);

    commands.spawn((
        Name::new("Player"),
        Player,
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(26.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1.0),
        RigidBody::Kinematic,
        Collider::circle(13.0),
        layers,
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut input: ResMut<PlayerInput>,
) {
    // Headless apps have no input plugin; keep the last (default) intent.
    let (Some(keys), Some(buttons)) = (keys, buttons) else { return; };

    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    input.fire_held = buttons.pressed(MouseButton::Left);
    input.reload_pressed = keys.just_pressed(KeyCode::KeyR);
    input.swap_to = SWAP_KEYS.iter().position(|k| keys.just_pressed(*k));
    input.reset_pressed = keys.just_pressed(KeyCode::F5);
}

fn update_aim_from_cursor(
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut aim: ResMut<Aim>,
) {
    // Headless apps have no window; keep whatever aim was injected.
    let Ok(window) = windows.single() else { return; };
    aim.world_cursor = None;

    let Some(cursor) = window.cursor_position() else { return; };
    let Ok((camera, camera_tf)) = q_camera.single() else { return; };

    match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => aim.world_cursor = Some(p),
        Err(e) => debug!("viewport_to_world_2d failed: {e:?}"),
    }
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.player_speed;
}

#[cfg(test)]
mod tests;
