//! Global state machine.
//!
//! `InGame` scopes one run: entering it opens a `RunSession`, leaving it tears
//! the session and the tracer pool down.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    RunEnded,
}
