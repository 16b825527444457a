//! Start and game-over screens

use glam::Vec2;

use super::{BG_COLOUR, BODY_SIZE, HEADLINE_SIZE, WHITE};
use crate::consts::{HEIGHT, TITLE, WIDTH};
use crate::error::Result;
use crate::platform::Display;

fn centered(y: f32) -> Vec2 {
    Vec2::new(WIDTH / 2.0, y)
}

pub fn draw_start_screen<D: Display>(display: &mut D, high_score: u64) -> Result<()> {
    display.clear(BG_COLOUR);
    display.draw_text(TITLE, HEADLINE_SIZE, WHITE, centered(HEIGHT / 4.0));
    display.draw_text(
        "Arrows to move, Space to jump",
        BODY_SIZE,
        WHITE,
        centered(HEIGHT / 2.0),
    );
    display.draw_text(
        "Press a key to play",
        BODY_SIZE,
        WHITE,
        centered(HEIGHT * 3.0 / 4.0),
    );
    display.draw_text(
        &format!("High Score: {}", high_score),
        BODY_SIZE,
        WHITE,
        centered(15.0),
    );
    display.present()
}

/// `new_best` swaps the high score line for a banner
pub fn draw_game_over<D: Display>(
    display: &mut D,
    score: u64,
    high_score: u64,
    new_best: bool,
) -> Result<()> {
    display.clear(BG_COLOUR);
    display.draw_text("GAME OVER", HEADLINE_SIZE, WHITE, centered(HEIGHT / 4.0));
    display.draw_text(
        &format!("Score: {}", score),
        BODY_SIZE,
        WHITE,
        centered(HEIGHT / 2.0),
    );
    display.draw_text(
        "Press a key to play again",
        BODY_SIZE,
        WHITE,
        centered(HEIGHT * 3.0 / 4.0),
    );
    let line = if new_best {
        "NEW HIGH SCORE!".to_string()
    } else {
        format!("High Score: {}", high_score)
    };
    display.draw_text(&line, BODY_SIZE, WHITE, centered(HEIGHT / 2.0 + 40.0));
    display.present()
}
