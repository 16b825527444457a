//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically.

use super::state::Session;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
    /// Jump pressed since the previous tick (edge-triggered)
    pub jump: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub jumped: bool,
    pub landed: bool,
    /// Platforms recycled off the bottom while climbing (scored)
    pub recycled: usize,
    /// Platforms removed off the top while falling away (unscored)
    pub fell_away: usize,
    pub spawned: usize,
    /// This tick ended the session
    pub ended: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if !session.playing {
        return outcome;
    }
    session.time_ticks += 1;

    if input.jump {
        outcome.jumped = session.player.jump(&session.platforms);
    }

    session.player.update(input.left, input.right, dt);
    outcome.landed = session.player.resolve_landing(&session.platforms);

    // Climbing past the top quarter: the world scrolls down to meet the player
    if session.player.rect().top() <= HEIGHT / 4.0 {
        let shift = session.player.vel().y.trunc().abs();
        session.player.body.pos.y += shift;
        outcome.recycled = session.platforms.scroll_down(shift);
        session.score += outcome.recycled as u64 * SCROLL_SCORE;
    }

    // Fell out of view: everything rises until the platforms are gone
    if session.player.rect().bottom() > HEIGHT {
        let shift = session.player.vel().y.trunc().max(DEATH_SCROLL_MIN);
        session.player.body.pos.y -= shift;
        outcome.fell_away = session.platforms.scroll_up(shift);
    }

    if session.platforms.is_empty() {
        session.playing = false;
        outcome.ended = true;
        log::info!(
            "Session over after {} ticks, score {}",
            session.time_ticks,
            session.score
        );
    }

    outcome.spawned = session.platforms.replenish(&mut session.rng);
    outcome
}
