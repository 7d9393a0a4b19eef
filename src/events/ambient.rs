use bevy_ecs::prelude::*;

/// Periodic cue from the ambient track; asks the comic-box scheduler to
/// try showing one more caption.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmbientCueEvent;
