//! Test doubles for the platform traits

use std::collections::VecDeque;

use glam::Vec2;

use super::{Clock, Display, InputEvent, InputSource, Rgb};
use crate::error::Result;
use crate::sim::Rect;

/// One drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Rgb),
    Rect(Rect, Rgb),
    Text { text: String, size: u32, anchor: Vec2 },
}

/// Display that records what was drawn
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    /// Ops of the frame being built
    pub pending: Vec<DrawOp>,
    /// Every presented frame, oldest first
    pub frames: Vec<Vec<DrawOp>>,
}

impl RecordingDisplay {
    pub fn last_frame(&self) -> &[DrawOp] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// All texts drawn in presented frames
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().flatten().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Display for RecordingDisplay {
    fn clear(&mut self, color: Rgb) {
        self.pending.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.pending.push(DrawOp::Rect(rect, color));
    }

    fn draw_text(&mut self, text: &str, size: u32, _color: Rgb, anchor: Vec2) {
        self.pending.push(DrawOp::Text {
            text: text.to_string(),
            size,
            anchor,
        });
    }

    fn present(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }
}

/// Input that replays a fixed script, one batch per poll, then quits
#[derive(Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
    pub polls: usize,
}

impl ScriptedInput {
    pub fn new(batches: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into_iter().collect(),
            polls: 0,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        self.polls += 1;
        Ok(self
            .batches
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Quit]))
    }
}

/// Clock that never blocks
#[derive(Debug, Default)]
pub struct CountingClock {
    pub ticks: usize,
}

impl Clock for CountingClock {
    fn tick(&mut self, _fps: u32) {
        self.ticks += 1;
    }
}
