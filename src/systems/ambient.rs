//! Turns the ambient track's progress into comic-box cues.

use bevy_ecs::prelude::*;

use crate::events::ambient::AmbientCueEvent;
use crate::resources::ambient::AmbientClock;
use crate::resources::worldtime::WorldTime;

pub fn ambient_cue_clock(
    time: Res<WorldTime>,
    mut clock: ResMut<AmbientClock>,
    mut commands: Commands,
) {
    if clock.tick(time.delta) {
        commands.trigger(AmbientCueEvent);
    }
}
