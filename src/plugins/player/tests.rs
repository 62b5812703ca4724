use bevy::prelude::*;
use avian2d::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;

#[test]
fn spawn_creates_player() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn);
    assert!(world.query::<&super::Player>().iter(&world).next().is_some());
}

#[test]
fn apply_movement_sets_velocity() {
    let mut world = World::new();
    world.insert_resource(Tunables { player_speed: 100.0, ..Tunables::default() });
    world.insert_resource(super::PlayerInput { move_axis: Vec2::new(1.0, 0.0), ..default() });
    world.spawn((super::Player, LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().iter(&world).next().unwrap();
    assert_eq!(v.0, Vec2::new(100.0, 0.0));
}

#[test]
fn gather_input_maps_fire_reload_and_swap() {
    let mut world = World::new();
    world.init_resource::<super::PlayerInput>();

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyR);
    keys.press(KeyCode::Digit2);
    keys.press(KeyCode::KeyD);
    world.insert_resource(keys);

    let mut buttons = ButtonInput::<MouseButton>::default();
    buttons.press(MouseButton::Left);
    world.insert_resource(buttons);

    run_system_once(&mut world, super::gather_input);

    let input = world.resource::<super::PlayerInput>();
    assert!(input.fire_held);
    assert!(input.reload_pressed);
    assert_eq!(input.swap_to, Some(1));
    assert!(!input.reset_pressed);
    assert_eq!(input.move_axis, Vec2::X);
}

#[test]
fn aim_is_left_alone_without_window() {
    let mut world = World::new();
    world.insert_resource(super::Aim { world_cursor: Some(Vec2::ONE) });

    run_system_once(&mut world, super::update_aim_from_cursor);

    assert_eq!(world.resource::<super::Aim>().world_cursor, Some(Vec2::ONE));
}
