//! Axis-aligned rectangle tests
//!
//! Screen coordinates: y grows downward, so `top < bottom`.

use glam::Vec2;

/// An axis-aligned rectangle (x, y is the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose mid-bottom point sits at `anchor`
    pub fn from_midbottom(anchor: Vec2, w: f32, h: f32) -> Self {
        Self::new(anchor.x - w / 2.0, anchor.y - h, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Same rectangle shifted by (dx, dy)
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Pick the landing surface among `candidates` for feet at height `feet_y`.
///
/// Returns the index of the intersecting rectangle whose top edge is closest
/// to the feet; ties go to the earliest index.
pub fn landing_target<'a, I>(body: &Rect, feet_y: f32, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, rect) in candidates.into_iter().enumerate() {
        if !body.intersects(rect) {
            continue;
        }
        let dist = (feet_y - rect.top()).abs();
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}
