//! Session state
//!
//! Everything one run needs lives in a `Session` value that the loop owns and
//! passes to `tick`. Two sessions built from the same seed and fed the same
//! inputs stay identical.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::platforms::PlatformSet;
use super::player::Player;

/// One run, from spawn until the platform set empties
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u64,
    /// Cleared exactly once, when the platform set becomes empty
    pub playing: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: PlatformSet,
    /// Spawner RNG
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Fresh run: starting layout, player at rest above the ground
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            score: 0,
            playing: true,
            time_ticks: 0,
            player: Player::default(),
            platforms: PlatformSet::starting_layout(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Session with a custom layout (tests, replays)
    pub fn with_layout(seed: u64, player: Player, platforms: PlatformSet) -> Self {
        Self {
            player,
            platforms,
            ..Self::new(seed)
        }
    }

    pub fn is_over(&self) -> bool {
        !self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_START;

    #[test]
    fn test_new_session() {
        let session = Session::new(42);
        assert!(session.playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.platforms.len(), 5);
        assert_eq!(session.player.pos().x, PLAYER_START.0);
        assert_eq!(session.player.pos().y, PLAYER_START.1);
        assert_eq!(session.player.vel().length(), 0.0);
    }
}
