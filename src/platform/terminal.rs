//! Terminal backend (crossterm)
//!
//! Draws the logical surface with half-block cells: every terminal row holds
//! two pixels, top one as foreground of '▀', bottom one as background. The
//! surface is scaled to fit and letterboxed.

use std::collections::HashMap;
use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{self, Attribute, Color as CColor},
    terminal,
};
use glam::Vec2;

use super::{Display, InputEvent, InputSource, Key, Rgb};
use crate::consts::{HEIGHT, WIDTH};
use crate::error::{JumpyError, Result};
use crate::sim::Rect;

/// Text at or above this size is drawn bold
const BOLD_TEXT_MIN_SIZE: u32 = 40;
/// Hold window for a fresh press, covering the OS auto-repeat delay
const FIRST_REPEAT_DELAY: Duration = Duration::from_millis(500);
/// Outside the letterboxed surface
const BORDER: Rgb = Rgb(0, 0, 0);

/// Raw mode + alternate screen for the lifetime of the guard
pub struct TerminalGuard {
    enhanced: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        // Real key releases when the terminal speaks the kitty protocol
        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("Terminal ready (key release events: {})", enhanced);
        Ok(Self { enhanced })
    }

    /// Whether key release events are reported
    pub fn enhanced(&self) -> bool {
        self.enhanced
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.enhanced {
            let _ = execute!(out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            out,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Pixel buffer, two pixels per terminal row
struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BORDER; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, BORDER);
    }

    fn fill(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c: Rgb) {
        for y in y0.max(0)..y1.min(self.h as i32) {
            for x in x0.max(0)..x1.min(self.w as i32) {
                self.set(x, y, c);
            }
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev: Option<(Rgb, Rgb)> = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if prev != Some((top, bot)) {
                    queue!(
                        out,
                        style::SetForegroundColor(ccolor(top)),
                        style::SetBackgroundColor(ccolor(bot))
                    )?;
                    prev = Some((top, bot));
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                } else {
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev = None;
            }
        }
        queue!(out, style::ResetColor)
    }
}

fn ccolor(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

/// Logical-to-pixel mapping for the current terminal size
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    scale: f32,
    offset: Vec2,
}

impl Viewport {
    fn fit(pw: usize, ph: usize) -> Self {
        let scale = (pw as f32 / WIDTH).min(ph as f32 / HEIGHT);
        let offset = Vec2::new(
            (pw as f32 - WIDTH * scale) / 2.0,
            (ph as f32 - HEIGHT * scale) / 2.0,
        );
        Self { scale, offset }
    }

    fn to_px(&self, p: Vec2) -> Vec2 {
        self.offset + p * self.scale
    }
}

struct TextOverlay {
    col: u16,
    row: u16,
    text: String,
    color: Rgb,
    bold: bool,
}

/// Terminal-backed display
pub struct TerminalDisplay {
    out: Stdout,
    buf: PixelBuf,
    viewport: Viewport,
    texts: Vec<TextOverlay>,
}

impl TerminalDisplay {
    pub fn new() -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        if cols == 0 || rows == 0 {
            return Err(JumpyError::Terminal(format!(
                "unusable terminal size {}x{}",
                cols, rows
            )));
        }
        let (pw, ph) = (cols as usize, rows as usize * 2);
        Ok(Self {
            out: stdout(),
            buf: PixelBuf::new(pw, ph),
            viewport: Viewport::fit(pw, ph),
            texts: Vec::new(),
        })
    }

    /// Follow terminal resizes between frames
    fn sync_size(&mut self) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let (pw, ph) = (cols as usize, rows as usize * 2);
        if (pw, ph) != (self.buf.w, self.buf.h) {
            self.buf.resize(pw, ph);
            self.viewport = Viewport::fit(pw, ph);
            queue!(self.out, terminal::Clear(terminal::ClearType::All))?;
        }
        Ok(())
    }
}

impl Display for TerminalDisplay {
    fn clear(&mut self, color: Rgb) {
        self.texts.clear();
        self.buf.fill(BORDER);
        self.fill_rect(Rect::new(0.0, 0.0, WIDTH, HEIGHT), color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let min = self.viewport.to_px(Vec2::new(rect.left(), rect.top()));
        let max = self.viewport.to_px(Vec2::new(rect.right(), rect.bottom()));
        // Clip to the letterboxed surface
        let lo = self.viewport.to_px(Vec2::ZERO);
        let hi = self.viewport.to_px(Vec2::new(WIDTH, HEIGHT));
        self.buf.fill_rect(
            min.x.max(lo.x).round() as i32,
            min.y.max(lo.y).round() as i32,
            max.x.min(hi.x).round() as i32,
            max.y.min(hi.y).round() as i32,
            color,
        );
    }

    fn draw_text(&mut self, text: &str, size: u32, color: Rgb, anchor: Vec2) {
        let px = self.viewport.to_px(anchor);
        let half = text.chars().count() as f32 / 2.0;
        self.texts.push(TextOverlay {
            col: (px.x - half).max(0.0) as u16,
            row: (px.y / 2.0).max(0.0) as u16,
            text: text.to_string(),
            color,
            bold: size >= BOLD_TEXT_MIN_SIZE,
        });
    }

    fn present(&mut self) -> Result<()> {
        self.sync_size()?;
        self.buf.render(&mut self.out)?;
        for t in &self.texts {
            let (col, row) = (t.col as usize, t.row as usize * 2);
            let bg = if col < self.buf.w && row + 1 < self.buf.h {
                self.buf.get(col, row + 1)
            } else {
                BORDER
            };
            queue!(
                self.out,
                cursor::MoveTo(t.col, t.row),
                style::SetForegroundColor(ccolor(t.color)),
                style::SetBackgroundColor(ccolor(bg)),
            )?;
            if t.bold {
                queue!(self.out, style::SetAttribute(Attribute::Bold))?;
            }
            queue!(
                self.out,
                style::Print(&t.text),
                style::SetAttribute(Attribute::Reset)
            )?;
        }
        queue!(self.out, style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Maps a crossterm key to a game key, `None` for quit keys
fn map_key(key: &KeyEvent) -> Option<Key> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char('q') | KeyCode::Esc => None,
        KeyCode::Left | KeyCode::Char('a') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Key::Right),
        KeyCode::Char(' ') | KeyCode::Up => Some(Key::Jump),
        _ => Some(Key::Other),
    }
}

/// Hold state of one key
#[derive(Debug, Clone, Copy)]
struct HeldKey {
    last: Instant,
    /// Auto-repeat has started for this press
    repeating: bool,
}

/// Terminal-backed input.
///
/// Without release reporting, a key counts as held until `hold` passes with
/// no further auto-repeat, then a `KeyUp` is synthesized. Until the first
/// repeat arrives the window is at least [`FIRST_REPEAT_DELAY`].
pub struct TerminalInput {
    enhanced: bool,
    hold: Duration,
    held: HashMap<Key, HeldKey>,
}

impl TerminalInput {
    pub fn new(guard: &TerminalGuard, hold: Duration) -> Self {
        Self {
            enhanced: guard.enhanced(),
            hold,
            held: HashMap::new(),
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant, events: &mut Vec<InputEvent>) {
        let Some(k) = map_key(&key) else {
            if key.kind != KeyEventKind::Release {
                events.push(InputEvent::Quit);
            }
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                // Auto-repeat only extends the hold
                match self.held.get_mut(&k) {
                    Some(held) => {
                        held.last = now;
                        held.repeating = true;
                    }
                    None => {
                        self.held.insert(
                            k,
                            HeldKey {
                                last: now,
                                repeating: false,
                            },
                        );
                        events.push(InputEvent::KeyDown(k));
                    }
                }
            }
            KeyEventKind::Release => {
                if self.held.remove(&k).is_some() {
                    events.push(InputEvent::KeyUp(k));
                }
            }
        }
    }

    fn expire_held(&mut self, now: Instant, events: &mut Vec<InputEvent>) {
        let hold = self.hold;
        let first_hold = hold.max(FIRST_REPEAT_DELAY);
        let mut expired: Vec<Key> = self
            .held
            .iter()
            .filter(|(_, held)| {
                let window = if held.repeating { hold } else { first_hold };
                now.duration_since(held.last) >= window
            })
            .map(|(k, _)| *k)
            .collect();
        // Stable order for deterministic event streams
        expired.sort_by_key(|k| *k as u8);
        for k in expired {
            self.held.remove(&k);
            events.push(InputEvent::KeyUp(k));
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.on_key(key, Instant::now(), &mut events);
            }
        }
        if !self.enhanced {
            self.expire_held(Instant::now(), &mut events);
        }
        Ok(events)
    }
}
