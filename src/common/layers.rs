//! Collision layers.
//!
//! Tracers are purely visual and never carry a collider, so there is no
//! bullet layer. Hit resolution queries `World | Enemy`.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
}

/// Layers a pellet ray can stop on.
#[inline]
pub fn shot_mask() -> LayerMask {
    [Layer::World, Layer::Enemy].into()
}
