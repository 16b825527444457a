//! Kinematic body integration
//!
//! Fixed-timestep, semi-implicit Euler. `dt` is measured in frames, so the
//! per-frame tuning constants apply unchanged at `dt = 1.0`.

use glam::Vec2;

use crate::consts::PLAYER_MIN_SPEED;

/// Position/velocity/acceleration state of a moving entity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicBody {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Accumulated for the current tick, cleared by `integrate`
    pub acc: Vec2,
}

impl KinematicBody {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }

    /// Accumulate an acceleration for this tick
    #[inline]
    pub fn accelerate(&mut self, acc: Vec2) {
        self.acc += acc;
    }

    /// Advance one tick.
    ///
    /// Friction is a multiplier on horizontal velocity folded into the
    /// acceleration. Horizontal speed below [`PLAYER_MIN_SPEED`] is clamped to
    /// exactly zero so a decelerating body never oscillates around rest.
    pub fn integrate(&mut self, dt: f32, friction: f32) {
        self.acc.x += self.vel.x * friction;
        self.vel += self.acc * dt;
        if self.vel.x.abs() < PLAYER_MIN_SPEED {
            self.vel.x = 0.0;
        }
        self.pos += self.vel * dt;
        self.acc = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PLAYER_ACC, PLAYER_FRICTION, SIM_DT};
    use proptest::prelude::*;

    #[test]
    fn test_integrate_clears_acceleration() {
        let mut body = KinematicBody::at(Vec2::new(10.0, 20.0));
        body.accelerate(Vec2::new(0.0, 0.8));
        body.integrate(SIM_DT, PLAYER_FRICTION);

        assert_eq!(body.acc, Vec2::ZERO);
        assert!((body.vel.y - 0.8).abs() < 1e-6);
        // Velocity is applied before position
        assert!((body.pos.y - 20.8).abs() < 1e-6);
    }

    #[test]
    fn test_integrate_accelerated_with_friction() {
        let mut body = KinematicBody::default();
        body.accelerate(Vec2::new(PLAYER_ACC, 0.0));
        body.integrate(SIM_DT, PLAYER_FRICTION);
        assert!((body.vel.x - 0.5).abs() < 1e-6);

        body.accelerate(Vec2::new(PLAYER_ACC, 0.0));
        body.integrate(SIM_DT, PLAYER_FRICTION);
        // 0.5 + 0.5 - 0.12 * 0.5
        assert!((body.vel.x - 0.94).abs() < 1e-6);
        assert!((body.pos.x - 1.44).abs() < 1e-5);
    }

    #[test]
    fn test_negligible_speed_clamps_to_zero() {
        let mut body = KinematicBody::default();
        body.vel.x = 0.105;
        body.integrate(SIM_DT, PLAYER_FRICTION);
        assert_eq!(body.vel.x, 0.0);

        body.integrate(SIM_DT, PLAYER_FRICTION);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_half_step_halves_displacement() {
        let mut full = KinematicBody::default();
        full.vel.x = 4.0;
        full.integrate(1.0, 0.0);

        let mut half = KinematicBody::default();
        half.vel.x = 4.0;
        half.integrate(0.5, 0.0);

        assert!((full.pos.x - 2.0 * half.pos.x).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_friction_decays_to_rest(v in -50.0f32..50.0) {
            let mut body = KinematicBody::default();
            body.vel.x = v;
            let sign = v.signum();

            for _ in 0..200 {
                let before = body.vel.x.abs();
                body.integrate(SIM_DT, PLAYER_FRICTION);
                let after = body.vel.x.abs();

                if before > 0.0 {
                    prop_assert!(after < before);
                } else {
                    prop_assert_eq!(after, 0.0);
                }
                // Never crosses zero
                prop_assert!(body.vel.x == 0.0 || body.vel.x.signum() == sign);
            }
            prop_assert_eq!(body.vel.x, 0.0);
        }
    }
}
