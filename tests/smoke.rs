mod common;

use armory::common::state::GameState;
use armory::common::tunables::Tunables;
use armory::plugins::player::Player;
use armory::plugins::projectiles::spawner::ProjectileSpawner;
use armory::plugins::weapons::FireControl;
use armory::plugins::weapons::systems::RunSession;
use bevy::prelude::*;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();
    common::tick(&mut app, 3);
}

#[test]
fn entering_a_run_equips_the_first_weapon() {
    let mut app = common::app_headless();
    common::tick(&mut app, 3);

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
    assert_eq!(app.world().resource::<RunSession>().selected.as_str(), "pistol");

    let world = app.world_mut();
    let mut q = world.query_filtered::<&FireControl, With<Player>>();
    let fc = q.single(world).expect("exactly one player");
    assert_eq!(fc.definition().id.as_str(), "pistol");
    assert_eq!(fc.current_ammo(), fc.magazine_size());
}

#[test]
fn tracer_pool_is_prewarmed_and_torn_down_with_the_run() {
    let mut app = common::app_headless();
    common::tick(&mut app, 2);

    let capacity = app.world().resource::<Tunables>().tracer_pool_capacity;
    {
        let spawner = app.world().resource::<ProjectileSpawner>();
        assert_eq!(spawner.inactive_count(), capacity);
        assert_eq!(spawner.active_count(), 0);
    }

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::RunEnded);
    common::tick(&mut app, 2);

    let spawner = app.world().resource::<ProjectileSpawner>();
    assert_eq!(spawner.inactive_count() + spawner.active_count(), 0);
    assert!(app.world().get_resource::<RunSession>().is_none());
}
