//! Freefall: dodge the projectiles while your box falls through the sky.
//!
//! The library holds the whole simulation and knows nothing about the
//! terminal. The `freefall` binary polls input, paces ticks and paints the
//! canvas that screens draw into.

pub mod animation;
pub mod canvas;
pub mod compute;
pub mod coordinator;
pub mod entities;
pub mod error;
pub mod screens;
pub mod settings;

pub use error::{Error, Result};

/// Gameplay constants. Everything is expressed in logical pixels of the
/// 84x48 screen of a Nokia 3310.
pub mod consts {
    /// Logical screen width.
    pub const GAME_WIDTH: i32 = 84;
    /// Logical screen height.
    pub const GAME_HEIGHT: i32 = 48;

    /// Side of the square player hitbox.
    pub const BOX_SIZE: i32 = 5;
    /// Side of the square projectile hitbox.
    pub const PROJ_SIZE: i32 = 2;
    /// Maximum length of a projectile tail.
    pub const TAIL_MAX: u32 = 10;
    /// Gap between a projectile and its tail.
    pub const TAIL_DIST: i32 = 1;

    pub const MAX_DUSTS: usize = 5;

    /// Projectile cap at the start of a run.
    pub const BASE_PROJECTILES: usize = 2;
    /// How much the projectile cap grows per difficulty step.
    pub const PROJECTILE_STEP: usize = 2;
    /// Hard ceiling for the projectile cap.
    pub const MAX_PROJECTILES: usize = 20;
    /// Ticks between difficulty steps.
    pub const DIFFICULTY_INTERVAL: u64 = 100;

    pub const MIN_PROJ_SPEED: f32 = 0.8;
    pub const MAX_PROJ_SPEED: f32 = 3.0;
    /// Upper bound (exclusive) of the random delay before the next projectile.
    pub const MAX_SPACING: u64 = 20;

    /// Simulation ticks per second.
    pub const DEFAULT_TPS: u32 = 15;
}
