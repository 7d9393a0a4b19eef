//! Pointer observers.
//!
//! Hover addresses roster slots; indices outside the roster are dropped
//! here so [`InteractionState`] never points at a missing avatar.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::avatar::{Avatar, Slot};
use crate::events::input::{HoverEvent, UnhoverEvent};
use crate::resources::interaction::InteractionState;

pub fn hover_observer(
    trigger: On<HoverEvent>,
    mut interaction: ResMut<InteractionState>,
    roster: Query<&Slot, With<Avatar>>,
) {
    let index = trigger.event().index;
    if !roster.iter().any(|slot| slot.0 == index) {
        debug!("hover on unknown slot {} ignored", index);
        return;
    }
    if !interaction.hover(index) {
        debug!("hover on slot {} ignored while a navigation is pending", index);
    }
}

pub fn unhover_observer(_trigger: On<UnhoverEvent>, mut interaction: ResMut<InteractionState>) {
    interaction.unhover();
}
