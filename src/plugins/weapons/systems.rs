//! ECS drivers around the fire-control runtime and the hit resolver.
//!
//! ```text
//!   PlayerInput/Aim ─▶ drive_fire_control ─▶ ShotRequested
//!                                              │
//!                                              v
//!                             resolve_requested_shots ─▶ ShotTrace (per pellet)
//! ```

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::layers::shot_mask;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::{Enemy, EnemyTarget, Health};
use crate::plugins::player::{Aim, Player, PlayerInput};

use super::definition::{WeaponCatalog, WeaponId};
use super::fire_control::{FireControl, ShotBlocked};
use super::hit_resolution::{HitResolver, HitWorld, RayCandidate, ShotTrace, aim_direction};
use super::messages::{AmmoChanged, ReloadProgressChanged, RunReset, ShotRequested, WeaponEquipped};

/// The weapon selection for the current run.
///
/// Exists only while `GameState::InGame` is active.
#[derive(Resource, Debug, Clone)]
pub struct RunSession {
    pub selected: WeaponId,
}

pub type TargetQuery<'w, 's> = Query<'w, 's, (&'static mut Health, &'static Transform), With<Enemy>>;

/// [`HitWorld`] over live ECS data.
///
/// `cast` wraps the physics ray query; targets are enemy `Health` components.
pub struct EcsHitWorld<'a, 'w, 's, C> {
    pub cast: C,
    pub targets: &'a mut TargetQuery<'w, 's>,
}

impl<C> HitWorld for EcsHitWorld<'_, '_, '_, C>
where
    C: Fn(Vec2, Dir2, f32, &mut Vec<RayCandidate>),
{
    type Target<'t>
        = EnemyTarget<'t>
    where
        Self: 't;

    fn cast_ray(&self, origin: Vec2, direction: Dir2, max_distance: f32, out: &mut Vec<RayCandidate>) {
        (self.cast)(origin, direction, max_distance, out);
    }

    fn target(&mut self, collider: Entity) -> Option<EnemyTarget<'_>> {
        let (health, tf) = self.targets.get_mut(collider).ok()?;
        Some(EnemyTarget {
            health,
            position: tf.translation.truncate(),
        })
    }
}

pub fn open_run_session(
    mut commands: Commands,
    catalog: Res<WeaponCatalog>,
    session: Option<Res<RunSession>>,
) {
    if session.is_some() {
        return;
    }
    let Some(first) = catalog.first() else {
        warn!("weapon catalog is empty; no run session opened");
        return;
    };

    info!("run session opened with {}", first.display_name);
    commands.insert_resource(RunSession {
        selected: first.id.clone(),
    });
}

pub fn close_run_session(mut commands: Commands) {
    commands.remove_resource::<RunSession>();
}

/// Input adapter → session: number keys pick a catalog slot.
pub fn select_weapon_from_input(
    input: Res<PlayerInput>,
    catalog: Res<WeaponCatalog>,
    session: Option<ResMut<RunSession>>,
) {
    let Some(slot) = input.swap_to else { return; };
    let Some(mut session) = session else { return; };

    let Some(def) = catalog.by_slot(slot) else {
        debug!("no weapon in slot {slot}");
        return;
    };
    if session.selected != def.id {
        session.selected = def.id.clone();
    }
}

/// Give every player a runtime for the selected weapon.
///
/// Runs every frame; only acts when the player has no runtime yet or holds a
/// different weapon. A swap discards the old runtime entirely.
pub fn equip_selected_weapon(
    mut commands: Commands,
    session: Option<Res<RunSession>>,
    catalog: Res<WeaponCatalog>,
    q_players: Query<(Entity, Option<&FireControl>), With<Player>>,
    mut equipped: MessageWriter<WeaponEquipped>,
    mut ammo: MessageWriter<AmmoChanged>,
) {
    let Some(session) = session else { return; };

    for (e, current) in &q_players {
        if current.is_some_and(|fc| fc.definition().id == session.selected) {
            continue;
        }
        let Some(def) = catalog.get(&session.selected) else {
            warn!("selected weapon {} missing from catalog", session.selected);
            continue;
        };

        commands.entity(e).insert(FireControl::new(def.clone()));
        equipped.write(WeaponEquipped { definition: def.clone() });
        ammo.write(AmmoChanged {
            current: def.magazine_size,
            max: def.magazine_size,
        });
        info!("equipped {}", def.display_name);
    }
}

pub fn request_run_reset(input: Res<PlayerInput>, mut writer: MessageWriter<RunReset>) {
    if input.reset_pressed {
        writer.write(RunReset);
    }
}

pub fn apply_run_reset(
    mut resets: MessageReader<RunReset>,
    mut q: Query<&mut FireControl>,
    mut ammo: MessageWriter<AmmoChanged>,
    mut reload: MessageWriter<ReloadProgressChanged>,
) {
    if resets.read().count() == 0 {
        return;
    }

    for mut fc in &mut q {
        fc.reset_state();
        ammo.write(AmmoChanged {
            current: fc.current_ammo(),
            max: fc.magazine_size(),
        });
        reload.write(ReloadProgressChanged {
            is_reloading: false,
            progress01: 0.0,
        });
    }
    info!("run reset: weapons refilled");
}

#[derive(Clone, Copy, PartialEq)]
struct FireSnapshot {
    ammo: u32,
    is_reloading: bool,
    progress01: f32,
}

impl FireSnapshot {
    fn of(fc: &FireControl) -> Self {
        Self {
            ammo: fc.current_ammo(),
            is_reloading: fc.is_reloading(),
            progress01: fc.reload_progress01(),
        }
    }
}

/// Tick every player weapon and turn input into trigger pulls.
///
/// `now` is virtual elapsed time, so pausing the clock also pauses cooldowns
/// and reloads.
pub fn drive_fire_control(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    aim: Res<Aim>,
    mut q: Query<(Entity, &Transform, &mut FireControl), With<Player>>,
    mut shots: MessageWriter<ShotRequested>,
    mut ammo: MessageWriter<AmmoChanged>,
    mut reload: MessageWriter<ReloadProgressChanged>,
) {
    let now = time.elapsed_secs_f64();

    for (e, tf, mut fc) in &mut q {
        let before = FireSnapshot::of(&fc);
        fc.tick(now);

        if input.reload_pressed {
            if let Err(reason) = fc.try_start_reload(now) {
                debug!("reload refused: {reason:?}");
            }
        }

        if input.fire_held {
            match fc.try_shoot(now) {
                Ok(mut shot) => {
                    let center = tf.translation.truncate();
                    let raw = aim.world_cursor.map_or(Vec2::ZERO, |c| c - center);
                    let dir = aim_direction(raw);

                    shot.range *= tunables.pixels_per_meter;
                    shots.write(ShotRequested {
                        shot,
                        origin: center + *dir * tunables.muzzle_offset,
                        direction: *dir,
                        owner: Some(e),
                    });
                }
                Err(ShotBlocked::NoAmmo) if tunables.auto_reload_on_empty => {
                    if fc.try_start_reload(now).is_ok() {
                        debug!("magazine empty, reloading");
                    }
                }
                Err(reason) => debug!("shot blocked: {reason:?}"),
            }
        }

        let after = FireSnapshot::of(&fc);
        if after.ammo != before.ammo {
            ammo.write(AmmoChanged {
                current: after.ammo,
                max: fc.magazine_size(),
            });
        }
        if after.is_reloading != before.is_reloading || after.progress01 != before.progress01 {
            reload.write(ReloadProgressChanged {
                is_reloading: after.is_reloading,
                progress01: after.progress01,
            });
        }
    }
}

/// Resolve queued trigger pulls against physics geometry and enemy health.
pub fn resolve_requested_shots(
    mut requests: MessageReader<ShotRequested>,
    spatial: SpatialQuery,
    tunables: Res<Tunables>,
    mut resolver: ResMut<HitResolver>,
    mut targets: TargetQuery,
    mut traces: MessageWriter<ShotTrace>,
) {
    let filter = SpatialQueryFilter::from_mask(shot_mask());
    let max_hits = tunables.max_ray_hits;

    let cast = |origin: Vec2, dir: Dir2, max_distance: f32, out: &mut Vec<RayCandidate>| {
        let hits = spatial.ray_hits(origin, dir, max_distance, max_hits, true, &filter);
        out.extend(hits.into_iter().map(|hit| RayCandidate {
            collider: Some(hit.entity),
            distance: hit.distance,
            point: origin + *dir * hit.distance,
        }));
    };
    let mut world = EcsHitWorld {
        cast,
        targets: &mut targets,
    };

    for req in requests.read() {
        let applied = resolver.resolve_shot(&req.shot, req.origin, req.direction, req.owner, &mut world, |trace| {
            traces.write(trace);
        });
        debug!(
            "{} resolved: {applied}/{} pellets hit",
            req.shot.weapon_id, req.shot.pellet_count
        );
    }
}
