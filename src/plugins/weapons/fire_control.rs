//! Per-weapon fire-control runtime: ammo, cooldown and reload.
//!
//! All timing is absolute. Callers pass a monotonic `now` in seconds and the
//! runtime compares it against stored deadlines, so a long or short frame never
//! changes when a shot or reload becomes legal.
//!
//! Reload completion is lazy: it is detected by the next `tick` (every
//! `try_*` call ticks first). The state is derived, never stored:
//!
//! ```text
//!   Ready ──try_shoot──▶ Cooldown ──now ≥ next_shot──▶ Ready
//!     │                                                 ▲
//!     └──try_start_reload──▶ Reloading ──tick(now ≥ completes_at)┘
//! ```

use bevy::prelude::*;

use super::definition::{WeaponDefinition, WeaponId};

/// One trigger pull, before it is split into pellets.
#[derive(Clone, Debug, PartialEq)]
pub struct ShotRequest {
    pub weapon_id: WeaponId,
    pub damage_per_pellet: i32,
    pub range: f32,
    pub pellet_count: u32,
    pub spread_degrees: f32,
}

impl ShotRequest {
    pub fn from_definition(def: &WeaponDefinition) -> Self {
        Self {
            weapon_id: def.id.clone(),
            damage_per_pellet: def.damage_per_pellet,
            range: def.range,
            pellet_count: def.pellet_count,
            spread_degrees: def.spread_degrees,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireState {
    Ready,
    Cooldown,
    Reloading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotBlocked {
    Reloading,
    Cooldown,
    NoAmmo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadBlocked {
    AlreadyReloading,
    MagazineFull,
}

#[derive(Component, Debug, Clone)]
pub struct FireControl {
    definition: WeaponDefinition,
    current_ammo: u32,
    next_shot_at: f64,
    reload_started_at: f64,
    reload_completes_at: f64,
    last_known_time: f64,
    is_reloading: bool,
}

impl FireControl {
    pub fn new(definition: WeaponDefinition) -> Self {
        let current_ammo = definition.magazine_size;
        Self {
            definition,
            current_ammo,
            next_shot_at: 0.0,
            reload_started_at: 0.0,
            reload_completes_at: 0.0,
            last_known_time: 0.0,
            is_reloading: false,
        }
    }

    #[inline]
    pub fn definition(&self) -> &WeaponDefinition {
        &self.definition
    }

    #[inline]
    pub fn current_ammo(&self) -> u32 {
        self.current_ammo
    }

    #[inline]
    pub fn magazine_size(&self) -> u32 {
        self.definition.magazine_size
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.is_reloading
    }

    /// State as of the last `tick`.
    pub fn state(&self) -> FireState {
        if self.is_reloading {
            FireState::Reloading
        } else if self.last_known_time < self.next_shot_at {
            FireState::Cooldown
        } else {
            FireState::Ready
        }
    }

    /// Advance timers. Completes a due reload.
    pub fn tick(&mut self, now: f64) {
        self.last_known_time = now;

        if self.is_reloading && now >= self.reload_completes_at {
            self.current_ammo = self.definition.magazine_size;
            self.is_reloading = false;
        }
    }

    pub fn try_shoot(&mut self, now: f64) -> Result<ShotRequest, ShotBlocked> {
        self.tick(now);

        if self.is_reloading {
            return Err(ShotBlocked::Reloading);
        }
        if now < self.next_shot_at {
            return Err(ShotBlocked::Cooldown);
        }
        if self.current_ammo == 0 {
            return Err(ShotBlocked::NoAmmo);
        }

        self.current_ammo -= 1;
        self.next_shot_at = now + self.definition.fire_rate_secs;
        Ok(ShotRequest::from_definition(&self.definition))
    }

    pub fn try_start_reload(&mut self, now: f64) -> Result<(), ReloadBlocked> {
        self.tick(now);

        if self.is_reloading {
            return Err(ReloadBlocked::AlreadyReloading);
        }
        if self.current_ammo >= self.definition.magazine_size {
            return Err(ReloadBlocked::MagazineFull);
        }

        self.is_reloading = true;
        self.reload_started_at = now;
        self.reload_completes_at = now + self.definition.reload_secs;
        Ok(())
    }

    /// 0 when idle, otherwise elapsed/duration clamped to [0, 1].
    pub fn reload_progress01(&self) -> f32 {
        if !self.is_reloading {
            return 0.0;
        }
        if self.definition.reload_secs <= 0.0 {
            return 1.0;
        }

        let elapsed = self.last_known_time - self.reload_started_at;
        (elapsed / self.definition.reload_secs).clamp(0.0, 1.0) as f32
    }

    /// Full magazine, no cooldown, no reload. Used on restart.
    pub fn reset_state(&mut self) {
        self.current_ammo = self.definition.magazine_size;
        self.next_shot_at = 0.0;
        self.reload_started_at = 0.0;
        self.reload_completes_at = 0.0;
        self.is_reloading = false;
    }
}
