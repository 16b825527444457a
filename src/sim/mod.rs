//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod platforms;
pub mod player;
pub mod state;
pub mod tick;

pub use body::KinematicBody;
pub use collision::{Rect, landing_target};
pub use platforms::{Platform, PlatformSet};
pub use player::Player;
pub use state::Session;
pub use tick::{TickInput, TickOutcome, tick};
