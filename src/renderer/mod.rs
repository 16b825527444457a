//! Frame composition
//!
//! Turns a session (or a menu) into draw calls on any `Display`. Draw order
//! follows entity layers, lowest first.

pub mod screens;

pub use screens::{draw_game_over, draw_start_screen};

use glam::Vec2;

use crate::consts::WIDTH;
use crate::error::Result;
use crate::platform::{Display, Rgb};
use crate::sim::{Rect, Session};

/// Palette
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const LIGHTBLUE: Rgb = Rgb(0, 155, 155);
pub const BG_COLOUR: Rgb = LIGHTBLUE;

pub const PLAYER_COLOUR: Rgb = YELLOW;
pub const PLATFORM_COLOUR: Rgb = GREEN;

/// Font sizes
pub const HEADLINE_SIZE: u32 = 48;
pub const BODY_SIZE: u32 = 22;

/// Draw one gameplay frame and present it
pub fn draw_session<D: Display>(display: &mut D, session: &Session) -> Result<()> {
    display.clear(BG_COLOUR);

    let mut sprites: Vec<(i32, Rect, Rgb)> = session
        .platforms
        .iter()
        .map(|p| (p.layer, p.rect, PLATFORM_COLOUR))
        .collect();
    sprites.push((session.player.layer, session.player.rect(), PLAYER_COLOUR));
    // Stable: spawn order is kept within a layer
    sprites.sort_by_key(|(layer, _, _)| *layer);

    for (_, rect, colour) in sprites {
        display.fill_rect(rect, colour);
    }

    display.draw_text(
        &session.score.to_string(),
        BODY_SIZE,
        WHITE,
        Vec2::new(WIDTH / 2.0, 15.0),
    );
    display.present()
}
