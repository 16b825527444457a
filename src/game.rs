//! Session loop and menu state machine
//!
//! `NotStarted -> Playing -> GameOver -> Playing -> ...` until a quit signal
//! clears `running`. The loop owns every session it starts and drives it at
//! a fixed tick rate through the platform traits.

use crate::consts::SIM_DT;
use crate::error::Result;
use crate::highscores::HighScore;
use crate::platform::{Clock, Display, InputEvent, InputSource, Key};
use crate::renderer;
use crate::settings::Settings;
use crate::sim::{Session, TickInput, tick};

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, waiting for a key
    NotStarted,
    /// A session is being simulated
    Playing,
    /// Game-over screen, waiting for a key
    GameOver,
}

/// Horizontal keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    left: bool,
    right: bool,
}

/// Screens that block on a key press
#[derive(Debug, Clone, Copy)]
enum Menu {
    Start,
    GameOver { score: u64, new_best: bool },
}

/// Top-level game: owns the platform collaborators and the high score
pub struct Game<D, I, C> {
    display: D,
    input: I,
    clock: C,
    settings: Settings,
    highscore: HighScore,
    running: bool,
    phase: GamePhase,
    held: HeldKeys,
    next_seed: u64,
    sessions_played: u32,
    new_session: fn(u64) -> Session,
}

impl<D: Display, I: InputSource, C: Clock> Game<D, I, C> {
    pub fn new(display: D, input: I, clock: C, settings: Settings) -> Self {
        let highscore = HighScore::load(settings.highscore_file.clone());
        let next_seed = settings.seed.unwrap_or_else(rand::random);
        Self {
            display,
            input,
            clock,
            settings,
            highscore,
            running: true,
            phase: GamePhase::NotStarted,
            held: HeldKeys::default(),
            next_seed,
            sessions_played: 0,
            new_session: Session::new,
        }
    }

    /// Replace how each session is set up (custom layouts, replays)
    pub fn with_session_builder(mut self, builder: fn(u64) -> Session) -> Self {
        self.new_session = builder;
        self
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn high_score(&self) -> u64 {
        self.highscore.best()
    }

    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Run until the player quits
    pub fn run(&mut self) -> Result<()> {
        self.show_start_screen()?;
        while self.running {
            let session = self.play_session()?;
            self.show_game_over(&session)?;
        }
        log::info!("Quitting after {} sessions", self.sessions_played);
        Ok(())
    }

    fn show_start_screen(&mut self) -> Result<()> {
        self.phase = GamePhase::NotStarted;
        self.wait_for_key(Menu::Start)
    }

    /// Play one session until its platforms run out or the player quits
    fn play_session(&mut self) -> Result<Session> {
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(1);
        let mut session = (self.new_session)(seed);
        self.sessions_played += 1;
        self.phase = GamePhase::Playing;
        self.held = HeldKeys::default();
        log::info!("Session {} started (seed {})", self.sessions_played, seed);

        while self.running && session.playing {
            self.clock.tick(self.settings.fps);
            let input = self.events()?;
            if !self.running {
                break;
            }
            tick(&mut session, &input, SIM_DT);
            renderer::draw_session(&mut self.display, &session)?;
        }
        Ok(session)
    }

    /// Drain input into this tick's commands
    fn events(&mut self) -> Result<TickInput> {
        let mut jump = false;
        for event in self.input.poll()? {
            match event {
                InputEvent::Quit => self.running = false,
                InputEvent::KeyDown(Key::Jump) => jump = true,
                InputEvent::KeyDown(Key::Left) => self.held.left = true,
                InputEvent::KeyDown(Key::Right) => self.held.right = true,
                InputEvent::KeyUp(Key::Left) => self.held.left = false,
                InputEvent::KeyUp(Key::Right) => self.held.right = false,
                _ => {}
            }
        }
        Ok(TickInput {
            left: self.held.left,
            right: self.held.right,
            jump,
        })
    }

    fn show_game_over(&mut self, session: &Session) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        self.phase = GamePhase::GameOver;

        let new_best = self.highscore.qualifies(session.score);
        if let Err(e) = self.highscore.submit(session.score) {
            log::warn!(
                "Could not save high score to {}: {}",
                self.highscore.path().display(),
                e
            );
        }
        self.wait_for_key(Menu::GameOver {
            score: session.score,
            new_best,
        })
    }

    /// Block on a menu until a key is released or quit arrives
    fn wait_for_key(&mut self, menu: Menu) -> Result<()> {
        loop {
            self.clock.tick(self.settings.fps);
            // Redrawn every frame so terminal resizes repaint
            match menu {
                Menu::Start => renderer::draw_start_screen(&mut self.display, self.highscore.best())?,
                Menu::GameOver { score, new_best } => renderer::draw_game_over(
                    &mut self.display,
                    score,
                    self.highscore.best(),
                    new_best,
                )?,
            }
            for event in self.input.poll()? {
                match event {
                    InputEvent::Quit => {
                        self.running = false;
                        return Ok(());
                    }
                    InputEvent::KeyUp(_) => return Ok(()),
                    InputEvent::KeyDown(_) => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::test_support::{CountingClock, RecordingDisplay, ScriptedInput};
    use crate::sim::{Platform, PlatformSet, Player};
    use glam::Vec2;
    use std::fs;
    use std::path::Path;

    type TestGame = Game<RecordingDisplay, ScriptedInput, CountingClock>;

    const ANY_KEY: InputEvent = InputEvent::KeyUp(Key::Other);

    fn settings(dir: &Path) -> Settings {
        Settings {
            seed: Some(5),
            highscore_file: dir.join("highscore.txt"),
            ..Default::default()
        }
    }

    fn game(dir: &Path, script: Vec<Vec<InputEvent>>) -> TestGame {
        Game::new(
            RecordingDisplay::default(),
            ScriptedInput::new(script),
            CountingClock::default(),
            settings(dir),
        )
    }

    /// Player already below the screen with a banked score
    fn doomed_session(seed: u64) -> Session {
        let mut platforms = PlatformSet::new();
        platforms.push(Platform::new(0.0, 100.0, 80.0, 20.0));
        platforms.push(Platform::new(300.0, 300.0, 80.0, 20.0));
        let mut session = Session::with_layout(seed, Player::at(Vec2::new(240.0, 700.0)), platforms);
        session.score = 120;
        session
    }

    fn ticks_until_over(seed: u64) -> usize {
        let mut session = doomed_session(seed);
        let mut n = 0;
        while session.playing {
            tick(&mut session, &TickInput::default(), SIM_DT);
            n += 1;
        }
        n
    }

    #[test]
    fn test_quit_on_start_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game(dir.path(), vec![vec![], vec![InputEvent::Quit]]);
        game.run().unwrap();

        assert!(!game.running());
        assert_eq!(game.sessions_played(), 0);
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert!(!dir.path().join("highscore.txt").exists());
    }

    #[test]
    fn test_key_down_alone_does_not_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game(
            dir.path(),
            vec![vec![InputEvent::KeyDown(Key::Other)], vec![InputEvent::Quit]],
        );
        game.run().unwrap();
        assert_eq!(game.sessions_played(), 0);
    }

    #[test]
    fn test_quit_mid_session_skips_game_over() {
        let dir = tempfile::tempdir().unwrap();
        let mut script = vec![vec![ANY_KEY]];
        script.extend(std::iter::repeat_n(vec![], 10));
        let mut game = game(dir.path(), script).with_session_builder(doomed_session);
        game.run().unwrap();

        assert_eq!(game.sessions_played(), 1);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.high_score(), 0);
        assert!(!dir.path().join("highscore.txt").exists());
        assert!(!game.display().texts().any(|t| t == "GAME OVER"));
    }

    #[test]
    fn test_session_end_saves_high_score_and_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let seed = settings(dir.path()).seed.unwrap();
        let first = ticks_until_over(seed);
        assert!(first > 5);

        // Start, the whole first session, the game-over key, then part of
        // the second session before the script runs out and quits
        let polls = 1 + first + 1 + 5;
        let script = vec![vec![ANY_KEY]; polls];
        let mut game = game(dir.path(), script).with_session_builder(doomed_session);
        game.run().unwrap();

        assert_eq!(game.sessions_played(), 2);
        assert!(!game.running());
        assert_eq!(game.high_score(), 120);
        assert_eq!(
            fs::read_to_string(dir.path().join("highscore.txt")).unwrap(),
            "120"
        );
        let banners = game
            .display()
            .texts()
            .filter(|t| *t == "NEW HIGH SCORE!")
            .count();
        assert_eq!(banners, 1);
    }

    #[test]
    fn test_lower_score_keeps_stored_high_score() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("highscore.txt"), "500").unwrap();
        let seed = settings(dir.path()).seed.unwrap();
        let polls = 1 + ticks_until_over(seed) + 1;
        let mut script = vec![vec![ANY_KEY]; polls - 1];
        // Quit from the game-over screen
        script.push(vec![InputEvent::Quit]);

        let mut game = game(dir.path(), script).with_session_builder(doomed_session);
        game.run().unwrap();

        assert_eq!(game.sessions_played(), 1);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.high_score(), 500);
        assert!(game.display().texts().any(|t| t == "High Score: 500"));
        assert_eq!(
            fs::read_to_string(dir.path().join("highscore.txt")).unwrap(),
            "500"
        );
    }

    #[test]
    fn test_held_keys_follow_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut game = game(
            dir.path(),
            vec![
                vec![InputEvent::KeyDown(Key::Right), InputEvent::KeyDown(Key::Jump)],
                vec![],
                vec![InputEvent::KeyUp(Key::Right), InputEvent::KeyDown(Key::Left)],
            ],
        );

        let first = game.events().unwrap();
        assert_eq!(
            first,
            TickInput {
                left: false,
                right: true,
                jump: true
            }
        );
        // Jump is edge-triggered, movement keys stay held
        let second = game.events().unwrap();
        assert_eq!(
            second,
            TickInput {
                left: false,
                right: true,
                jump: false
            }
        );
        let third = game.events().unwrap();
        assert_eq!(
            third,
            TickInput {
                left: true,
                right: false,
                jump: false
            }
        );
    }

    #[test]
    fn test_one_clock_tick_per_poll() {
        let dir = tempfile::tempdir().unwrap();
        let mut script = vec![vec![ANY_KEY]];
        script.extend(std::iter::repeat_n(vec![], 20));
        let mut game = game(dir.path(), script);
        game.run().unwrap();

        assert_eq!(game.clock.ticks, game.input.polls);
        // Start screen frame plus one frame per simulated tick
        assert_eq!(game.display().frames.len(), 1 + 20);
    }
}
