//! Platforms, spawning and scroll recycling

use rand::Rng;

use super::collision::Rect;
use crate::consts::*;

/// A static collision target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub layer: i32,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            layer: PLATFORM_LAYER,
        }
    }
}

/// Live platforms, kept in spawn order
#[derive(Debug, Clone, Default)]
pub struct PlatformSet {
    platforms: Vec<Platform>,
}

impl PlatformSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The designer-placed starting layout
    pub fn starting_layout() -> Self {
        let platforms = START_PLATFORMS
            .iter()
            .map(|&(x, y, w, h)| Platform::new(x, y, w, h))
            .collect();
        Self { platforms }
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.platforms.iter().map(|p| &p.rect)
    }

    pub fn get(&self, index: usize) -> Option<&Platform> {
        self.platforms.get(index)
    }

    pub fn push(&mut self, platform: Platform) {
        self.platforms.push(platform);
    }

    /// True if any platform overlaps `rect`
    pub fn any_intersecting(&self, rect: &Rect) -> bool {
        self.rects().any(|r| r.intersects(rect))
    }

    /// Top up the population to [`MIN_PLATFORMS`] just above the viewport.
    ///
    /// Returns how many platforms were spawned.
    pub fn replenish<R: Rng>(&mut self, rng: &mut R) -> usize {
        let mut spawned = 0;
        while self.platforms.len() < MIN_PLATFORMS {
            let width = rng.random_range(SPAWN_WIDTH.0..SPAWN_WIDTH.1);
            let x = rng.random_range(0..WIDTH as i32 - width);
            let y = rng.random_range(SPAWN_Y.0..SPAWN_Y.1);
            let platform = Platform::new(x as f32, y as f32, width as f32, PLATFORM_HEIGHT);
            log::debug!("Spawned platform at ({}, {}) width {}", x, y, width);
            self.platforms.push(platform);
            spawned += 1;
        }
        spawned
    }

    /// Move every platform down by `shift` (world follows a climbing player).
    ///
    /// Platforms whose top edge reaches the bottom of the viewport are
    /// removed. Returns the number removed.
    pub fn scroll_down(&mut self, shift: f32) -> usize {
        let before = self.platforms.len();
        for platform in &mut self.platforms {
            platform.rect.y += shift;
        }
        self.platforms.retain(|p| p.rect.top() < HEIGHT);
        before - self.platforms.len()
    }

    /// Move every platform up by `shift` (camera falls away after a death).
    ///
    /// Platforms whose bottom edge rises above the top of the viewport are
    /// removed. Returns the number removed.
    pub fn scroll_up(&mut self, shift: f32) -> usize {
        let before = self.platforms.len();
        for platform in &mut self.platforms {
            platform.rect.y -= shift;
        }
        self.platforms.retain(|p| p.rect.bottom() >= 0.0);
        before - self.platforms.len()
    }
}
