//! Weapon fire control and hit resolution for a top-down shooter.
//!
//! Integration tests in `tests/` are compiled as separate crates and import
//! the composition root from here.

pub mod common;
pub mod game;
pub mod plugins;
