//! Player controller: input, gravity, jumping and landing

use glam::Vec2;

use super::body::KinematicBody;
use super::collision::{Rect, landing_target};
use super::platforms::PlatformSet;
use crate::consts::*;

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// `body.pos` is the mid-bottom point of the bounding rect
    pub body: KinematicBody,
    pub jumping: bool,
    pub size: Vec2,
    pub layer: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self::at(Vec2::new(PLAYER_START.0, PLAYER_START.1))
    }
}

impl Player {
    pub fn at(pos: Vec2) -> Self {
        Self {
            body: KinematicBody::at(pos),
            jumping: false,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            layer: PLAYER_LAYER,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    /// Bounding rect derived from the current position
    pub fn rect(&self) -> Rect {
        Rect::from_midbottom(self.body.pos, self.size.x, self.size.y)
    }

    /// True if a one-unit probe below the feet touches a platform
    pub fn on_platform(&self, platforms: &PlatformSet) -> bool {
        platforms.any_intersecting(&self.rect().offset(0.0, 1.0))
    }

    /// Start a jump. Refused silently unless standing on a platform.
    ///
    /// Returns whether the jump happened.
    pub fn jump(&mut self, platforms: &PlatformSet) -> bool {
        if !self.on_platform(platforms) {
            return false;
        }
        self.body.vel.y = -PLAYER_JUMP;
        self.jumping = true;
        true
    }

    /// Apply held-key acceleration and gravity, then integrate one tick.
    pub fn update(&mut self, left: bool, right: bool, dt: f32) {
        let mut acc = Vec2::new(0.0, PLAYER_GRAVITY);
        if left {
            acc.x = -PLAYER_ACC;
        }
        if right {
            acc.x = PLAYER_ACC;
        }
        self.body.accelerate(acc);
        self.body.integrate(dt, PLAYER_FRICTION);
        self.wrap_horizontal();
    }

    /// Toroidal horizontal topology
    fn wrap_horizontal(&mut self) {
        let width = self.size.x;
        if self.body.pos.x < -width {
            self.body.pos.x = WIDTH;
        } else if self.body.pos.x > WIDTH {
            self.body.pos.x = -width;
        }
    }

    /// Snap onto a platform when falling into one.
    ///
    /// Returns whether the player landed.
    pub fn resolve_landing(&mut self, platforms: &PlatformSet) -> bool {
        if self.body.vel.y <= 0.0 {
            return false;
        }
        let Some(index) = landing_target(&self.rect(), self.body.pos.y, platforms.rects()) else {
            return false;
        };
        let Some(platform) = platforms.get(index) else {
            return false;
        };
        self.body.pos.y = platform.rect.top();
        self.body.vel.y = 0.0;
        self.jumping = false;
        true
    }
}
