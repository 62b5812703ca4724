//! Buffered weapon notifications.
//!
//! Producers write and forget. HUD/audio layers read whichever they care about;
//! nothing is acknowledged.

use bevy::prelude::*;

use super::definition::WeaponDefinition;
use super::fire_control::ShotRequest;

#[derive(Message, Clone, Debug)]
pub struct WeaponEquipped {
    pub definition: WeaponDefinition,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmmoChanged {
    pub current: u32,
    pub max: u32,
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ReloadProgressChanged {
    pub is_reloading: bool,
    pub progress01: f32,
}

/// A successful trigger pull, positioned in the world.
///
/// `shot.range` is already in world units.
#[derive(Message, Clone, Debug)]
pub struct ShotRequested {
    pub shot: ShotRequest,
    pub origin: Vec2,
    pub direction: Vec2,
    pub owner: Option<Entity>,
}

/// Level/run restart: refill weapons, recall tracers.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RunReset;
