//! Pointer events coming from the render layer.
//!
//! Hover and unhover address avatars by roster slot, the way the renderer
//! sees them. Clicks carry the profile id, since that is what navigation is
//! about.

use bevy_ecs::prelude::*;

/// Pointer entered the avatar at `index`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverEvent {
    pub index: usize,
}

/// Pointer left whatever avatar it was over.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnhoverEvent;

/// The avatar with profile id `entity_id` was clicked.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub entity_id: String,
}
