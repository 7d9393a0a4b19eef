//! Per-avatar kinematic state.
//!
//! [`Kinematics`] is what the physics system mutates every tick: velocity in
//! pixels per tick plus the scale/rotation the avatar is slowly drifting
//! toward. The visible values live in [`Pose`](super::pose::Pose) and ease
//! toward these targets.

use bevy_ecs::prelude::Component;
use fastrand::Rng;
use glam::Vec2;

use crate::math::{random_heading, random_in_range};

/// Velocity and resting pose targets for one avatar.
#[derive(Component, Clone, Copy, Debug)]
pub struct Kinematics {
    /// Pixels per tick.
    pub velocity: Vec2,
    pub target_scale: f32,
    /// Degrees.
    pub target_rotation: f32,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            target_scale: 1.0,
            target_rotation: 0.0,
        }
    }
}

impl Kinematics {
    /// Fresh state: random heading between min and max speed, random targets.
    pub fn random(rng: &mut Rng, min_speed: f32, max_speed: f32, max_tilt: f32) -> Self {
        let speed = random_in_range(rng, min_speed, max_speed);
        let mut kin = Self {
            velocity: random_heading(rng, speed),
            ..Self::default()
        };
        kin.retarget(rng, max_tilt);
        kin
    }

    /// Pick new resting scale and rotation targets.
    pub fn retarget(&mut self, rng: &mut Rng, max_tilt: f32) {
        self.target_scale = random_in_range(rng, 0.9, 1.1);
        self.target_rotation = random_in_range(rng, -max_tilt, max_tilt);
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}
