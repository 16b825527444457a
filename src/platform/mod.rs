//! Platform abstraction layer
//!
//! The game loop only talks to these traits:
//! - `Display`: fixed logical surface (WIDTH x HEIGHT) with rects and text
//! - `InputSource`: poll-based key/quit events
//! - `Clock`: blocking frame limiter
//!
//! `terminal` implements the first two on top of crossterm.

pub mod terminal;
#[cfg(test)]
pub(crate) mod test_support;

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::error::Result;
use crate::sim::Rect;

/// 24-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Other,
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Drawable surface in logical coordinates
pub trait Display {
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    /// Draw text horizontally centered on `anchor`, top edge at `anchor.y`
    fn draw_text(&mut self, text: &str, size: u32, color: Rgb, anchor: Vec2);
    /// Show the finished frame
    fn present(&mut self) -> Result<()>;
}

/// Source of input events, drained once per frame
pub trait InputSource {
    fn poll(&mut self) -> Result<Vec<InputEvent>>;
}

/// Caps the loop rate
pub trait Clock {
    /// Block until one frame at `fps` has elapsed since the previous call
    fn tick(&mut self, fps: u32);
}

/// Sleeping frame limiter
#[derive(Debug, Default)]
pub struct FrameLimiter {
    last: Option<Instant>,
}

impl FrameLimiter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for FrameLimiter {
    fn tick(&mut self, fps: u32) {
        let frame = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < frame {
                std::thread::sleep(frame - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}
