//! Container bounds resource.
//!
//! Stores the measured size of the element the avatars float in. A zero
//! size means the container has not been measured yet, which keeps the
//! simulator inert.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// Measured container size in pixels.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerBounds {
    /// Width in pixels.
    pub w: f32,
    /// Height in pixels.
    pub h: f32,
}

impl ContainerBounds {
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    pub fn is_measured(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }
}
