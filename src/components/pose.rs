//! Visible pose of an avatar.
//!
//! The [`Pose`] component holds the eased scale, rotation, opacity and
//! stacking order that end up in the [`RenderTransform`] handed to the
//! renderer. It is derived state: the pose system overwrites it every
//! visible frame from [`Kinematics`](super::kinematics::Kinematics) and the
//! interaction overrides.

use bevy_ecs::prelude::Component;
use serde::Serialize;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub scale: f32,
    /// Degrees.
    pub rotation: f32,
    pub opacity: f32,
    pub z_index: i32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            z_index: 1,
        }
    }
}

/// Per-avatar output for one frame.
///
/// `x`/`y` are the avatar centre in container pixels. Higher `z_index`
/// values are drawn on top.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RenderTransform {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotation: f32,
    pub opacity: f32,
    #[serde(rename = "zIndex")]
    pub z_index: i32,
}
