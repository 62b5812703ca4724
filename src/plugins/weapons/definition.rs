//! Static weapon data.
//!
//! Definitions arrive already validated from the configuration layer and are
//! never mutated afterwards. The built-in catalog stands in for that layer.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

/// Stable weapon identifier. Cheap to clone into every trace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WeaponId(Arc<str>);

impl WeaponId {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponDefinition {
    pub id: WeaponId,
    pub display_name: String,
    pub damage_per_pellet: i32,
    pub magazine_size: u32,
    /// Minimum seconds between two trigger pulls.
    pub fire_rate_secs: f64,
    pub reload_secs: f64,
    /// Meters.
    pub range: f32,
    pub pellet_count: u32,
    /// Full fan width in degrees.
    pub spread_degrees: f32,
    pub image: String,
}

impl WeaponDefinition {
    pub fn pistol() -> Self {
        Self {
            id: WeaponId::new("pistol"),
            display_name: "Pistol".into(),
            damage_per_pellet: 8,
            magazine_size: 12,
            fire_rate_secs: 0.35,
            reload_secs: 1.1,
            range: 8.0,
            pellet_count: 1,
            spread_degrees: 0.0,
            image: "weapons/pistol.png".into(),
        }
    }

    pub fn shotgun() -> Self {
        Self {
            id: WeaponId::new("shotgun"),
            display_name: "Shotgun".into(),
            damage_per_pellet: 6,
            magazine_size: 6,
            fire_rate_secs: 0.8,
            reload_secs: 1.6,
            range: 6.0,
            pellet_count: 6,
            spread_degrees: 24.0,
            image: "weapons/shotgun.png".into(),
        }
    }

    pub fn rifle() -> Self {
        Self {
            id: WeaponId::new("rifle"),
            display_name: "Rifle".into(),
            damage_per_pellet: 5,
            magazine_size: 30,
            fire_rate_secs: 0.1,
            reload_secs: 1.8,
            range: 14.0,
            pellet_count: 1,
            spread_degrees: 0.0,
            image: "weapons/rifle.png".into(),
        }
    }
}

/// The validated weapon set for this run, in selection order.
#[derive(Resource, Debug, Clone)]
pub struct WeaponCatalog {
    weapons: Vec<WeaponDefinition>,
}

impl Default for WeaponCatalog {
    fn default() -> Self {
        Self::new(vec![
            WeaponDefinition::pistol(),
            WeaponDefinition::shotgun(),
            WeaponDefinition::rifle(),
        ])
    }
}

impl WeaponCatalog {
    pub fn new(weapons: Vec<WeaponDefinition>) -> Self {
        Self { weapons }
    }

    pub fn get(&self, id: &WeaponId) -> Option<&WeaponDefinition> {
        self.weapons.iter().find(|w| &w.id == id)
    }

    pub fn by_slot(&self, slot: usize) -> Option<&WeaponDefinition> {
        self.weapons.get(slot)
    }

    pub fn first(&self) -> Option<&WeaponDefinition> {
        self.weapons.first()
    }
}
