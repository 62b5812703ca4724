//! Tracer spawner: turns resolved traces into pooled, animated bullets.
//!
//! # Lifecycle
//! ```text
//!   Idle (pooled, hidden) ──dispatch──▶ InFlight ──arrive──▶ release ──▶ Idle
//!                                          │
//!                        clear / RunReset ─┘ (release without arrival)
//! ```
//!
//! The spawner is the single writer of the pool. Hooks only queue commands,
//! so a freshly created or reused entity picks up its launch state when the
//! system's commands are applied.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::weapons::messages::RunReset;
use crate::plugins::weapons::{ImpactKind, ShotTrace};

use super::components::{Bullet, FlightStatus, PooledBullet};
use super::pool::{Pool, PoolHooks, ReleaseError};

const BULLET_Z: f32 = 2.0;

#[derive(Resource, Debug)]
pub struct ProjectileSpawner {
    pool: Pool<Entity>,
    pub speed: f32,
    pub arrival_tolerance: f32,
}

/// Pool hooks backed by one system's `Commands`.
struct BulletHooks<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
}

impl PoolHooks<Entity> for BulletHooks<'_, '_, '_> {
    fn create(&mut self) -> Option<Entity> {
        let e = self
            .commands
            .spawn((
                Name::new("Bullet(Pooled)"),
                PooledBullet,
                Bullet::default(),
                Sprite {
                    color: tracer_color(ImpactKind::None),
                    custom_size: Some(Vec2::new(10.0, 3.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, BULLET_Z),
                Visibility::Hidden,
            ))
            .id();
        Some(e)
    }

    fn on_get(&mut self, item: Entity) {
        self.commands
            .entity(item)
            .insert((Bullet::default(), Visibility::Visible));
    }

    fn on_release(&mut self, item: Entity) {
        self.commands
            .entity(item)
            .insert((Bullet::default(), Visibility::Hidden));
    }

    fn on_destroy(&mut self, item: Entity) {
        self.commands.entity(item).despawn();
    }
}

#[inline]
fn tracer_color(impact: ImpactKind) -> Color {
    match impact {
        ImpactKind::None => Color::srgb(1.0, 0.85, 0.3),
        ImpactKind::Enemy => Color::srgb(1.0, 0.35, 0.25),
        ImpactKind::BlockingCollider => Color::srgb(0.75, 0.75, 0.8),
    }
}

impl ProjectileSpawner {
    pub fn new(speed: f32, arrival_tolerance: f32) -> Self {
        Self {
            pool: Pool::new(),
            speed,
            arrival_tolerance,
        }
    }

    pub fn prewarm(&mut self, commands: &mut Commands, count: usize) {
        self.pool.prewarm(count, &mut BulletHooks { commands: &mut *commands });
    }

    /// Acquire a tracer and launch it along `trace`.
    ///
    /// A zero-length trace completes (and is released) within this call.
    pub fn dispatch_shot_trace(&mut self, commands: &mut Commands, trace: &ShotTrace) -> Entity {
        let e = self.pool.get(&mut BulletHooks { commands: &mut *commands });

        let mut bullet = Bullet::default();
        let status = bullet.launch(
            trace.origin,
            trace.end_point,
            self.speed,
            trace.impact,
            self.arrival_tolerance,
        );

        let heading = (trace.end_point - trace.origin).try_normalize().unwrap_or(trace.direction);
        commands.entity(e).insert((
            bullet,
            Transform::from_translation(trace.origin.extend(BULLET_Z))
                .with_rotation(Quat::from_rotation_z(heading.to_angle())),
            Sprite {
                color: tracer_color(trace.impact),
                custom_size: Some(Vec2::new(10.0, 3.0)),
                ..default()
            },
        ));

        if status == FlightStatus::Arrived {
            // Just acquired, so this cannot be rejected.
            let _ = self.release(commands, e);
        }
        e
    }

    /// Return an active tracer to the pool, ending its flight without arrival.
    pub fn release(&mut self, commands: &mut Commands, e: Entity) -> Result<(), ReleaseError> {
        self.pool.release(e, &mut BulletHooks { commands: &mut *commands })
    }

    /// Release every active tracer. Returns how many were recalled.
    pub fn clear_active_bullets(&mut self, commands: &mut Commands) -> usize {
        let active: Vec<Entity> = self.pool.active().collect();
        for e in &active {
            let _ = self.release(commands, *e);
        }
        active.len()
    }

    /// Despawn every tracer, pooled or not.
    pub fn clear(&mut self, commands: &mut Commands) {
        self.pool.clear(&mut BulletHooks { commands: &mut *commands });
    }

    #[inline]
    pub fn is_active(&self, e: Entity) -> bool {
        self.pool.is_active(&e)
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    #[inline]
    pub fn inactive_count(&self) -> usize {
        self.pool.inactive_count()
    }
}

/// Release through the spawner, or despawn outright when there is none.
pub fn release_bullet(
    commands: &mut Commands,
    spawner: Option<&mut ProjectileSpawner>,
    e: Entity,
) -> Result<(), ReleaseError> {
    match spawner {
        Some(spawner) => spawner.release(commands, e),
        None => {
            warn!("no tracer pool; despawning {e:?} directly");
            commands.entity(e).despawn();
            Ok(())
        }
    }
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

/// Top the pool up to its configured capacity.
pub fn init_bullet_pool(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut spawner: ResMut<ProjectileSpawner>,
) {
    let tracked = spawner.active_count() + spawner.inactive_count();
    let missing = tunables.tracer_pool_capacity.saturating_sub(tracked);
    spawner.prewarm(&mut commands, missing);
}

pub fn dispatch_shot_traces(
    mut commands: Commands,
    mut traces: MessageReader<ShotTrace>,
    mut spawner: ResMut<ProjectileSpawner>,
) {
    for trace in traces.read() {
        spawner.dispatch_shot_trace(&mut commands, trace);
    }
}

pub fn advance_tracers(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: Option<ResMut<ProjectileSpawner>>,
    mut q: Query<(Entity, &mut Bullet, &mut Transform), With<PooledBullet>>,
) {
    let dt = time.delta_secs();

    for (e, mut bullet, mut tf) in &mut q {
        let status = bullet.advance(dt);
        if status == FlightStatus::Idle {
            continue;
        }

        tf.translation.x = bullet.position.x;
        tf.translation.y = bullet.position.y;

        if status == FlightStatus::Arrived {
            let _ = release_bullet(&mut commands, spawner.as_deref_mut(), e);
        }
    }
}

pub fn recall_on_run_reset(
    mut commands: Commands,
    mut resets: MessageReader<RunReset>,
    mut spawner: ResMut<ProjectileSpawner>,
) {
    if resets.read().count() == 0 {
        return;
    }
    let recalled = spawner.clear_active_bullets(&mut commands);
    debug!("run reset recalled {recalled} tracers");
}

pub fn teardown_bullet_pool(mut commands: Commands, mut spawner: ResMut<ProjectileSpawner>) {
    spawner.clear(&mut commands);
}
