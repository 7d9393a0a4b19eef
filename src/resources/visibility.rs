use bevy_ecs::prelude::Resource;

/// Whether the hosting document is currently visible.
///
/// While hidden the physics and pose systems are skipped outright; timers
/// keep running.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocumentVisibility(pub bool);

impl Default for DocumentVisibility {
    fn default() -> Self {
        DocumentVisibility(true)
    }
}
