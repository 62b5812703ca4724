//! Enemies plugin: stationary damageable targets.
//!
//! `Health` is gameplay truth. Hit resolution mutates it through the
//! [`Damageable`] contract; this module only reacts to the result:
//!
//! ```text
//!   Update (after WeaponSystems::Resolve)
//!     enemy_death_trigger: hp <= 0 → stop interacting + PendingDespawn
//!   PostUpdate
//!     despawn_marked_enemies
//! ```
//!
//! A dead enemy still in the world refuses damage, so until it is despawned
//! a ray treats it as a blocking collider. Stripping its collision filters
//! does not change that: spatial queries match on membership only.
//!
//! We don't despawn in the same system that observes death; structural
//! changes are centralized in PostUpdate.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::plugins::weapons::{Damageable, WeaponId, WeaponSystems};

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

#[derive(Component, Debug, Clone)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
    pub last_hit: Option<(WeaponId, Vec2)>,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self {
            hp,
            max_hp: hp,
            last_hit: None,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Marker: enemy should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Borrowed view of one enemy, handed to hit resolution.
pub struct EnemyTarget<'a> {
    pub health: Mut<'a, Health>,
    pub position: Vec2,
}

impl Damageable for EnemyTarget<'_> {
    fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn try_apply_damage(&mut self, amount: i32, point: Vec2, source: &WeaponId) -> bool {
        if !self.health.is_alive() {
            return false;
        }

        self.health.hp -= amount;
        self.health.last_hit = Some((source.clone(), point));
        true
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_targets);

    app.add_systems(
        Update,
        enemy_death_trigger
            .after(WeaponSystems::Resolve)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(PostUpdate, despawn_marked_enemies);
}

/// Membership stays `Enemy`, filters empty: bodies pass through, rays still stop.
#[inline]
pub fn non_interacting_enemy_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

/// Spawn a row of stationary targets.
fn spawn_targets(mut commands: Commands) {
    let enemy_layers = CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player]);

    for (i, x) in [-200.0, 0.0, 200.0].into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("EnemyTarget{i}")),
            Enemy,
            Health::new(40),
            Sprite {
                color: Color::srgb(0.9, 0.25, 0.25),
                custom_size: Some(Vec2::splat(32.0)),
                ..default()
            },
            Transform::from_xyz(x, 120.0, 1.0),
            RigidBody::Static,
            Collider::circle(16.0),
            enemy_layers,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn enemy_death_trigger(
    mut commands: Commands,
    mut q: Query<(Entity, &Health, &mut CollisionLayers), (With<Enemy>, Without<PendingDespawn>)>,
) {
    for (e, hp, mut layers) in &mut q {
        if hp.is_alive() {
            continue;
        }

        if let Some((source, _)) = &hp.last_hit {
            debug!("enemy {e:?} killed by {source}");
        }
        *layers = non_interacting_enemy_layers();
        commands.entity(e).insert(PendingDespawn);
    }
}

fn despawn_marked_enemies(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
