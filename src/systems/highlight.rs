use bevy_ecs::prelude::*;
use log::debug;

use crate::resources::highlight::Highlight;
use crate::resources::worldtime::WorldTime;

/// Count down the active highlight and clear it when it runs out.
pub fn highlight_system(time: Res<WorldTime>, mut highlight: ResMut<Highlight>) {
    if highlight.id().is_none() {
        return;
    }
    if let Some(id) = highlight.tick(time.delta) {
        debug!("highlight on '{}' expired", id);
    }
}
