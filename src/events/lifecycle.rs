use bevy_ecs::prelude::*;

/// The owning view is going away. Everything pending is cancelled and
/// nothing navigates.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeardownEvent;

/// The roster was rebuilt: avatars were added, removed or reordered.
///
/// Slots are already final when this fires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RosterChangedEvent;
