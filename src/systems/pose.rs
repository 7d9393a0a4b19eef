//! Pose derivation.
//!
//! [`pose_system`] turns kinematic targets and interaction state into the
//! [`Pose`] each avatar is drawn with:
//!
//! - pending navigation: pinned to the "selected" look, no easing,
//! - hovered or highlighted: eased toward `hover_scale`, upright, on top,
//! - otherwise: eased toward the avatar's own scale/rotation targets.

use bevy_ecs::prelude::*;

use crate::components::avatar::{Avatar, Slot};
use crate::components::kinematics::Kinematics;
use crate::components::pose::Pose;
use crate::math::approach;
use crate::resources::highlight::Highlight;
use crate::resources::interaction::{AvatarKey, InteractionState};
use crate::resources::paradiseconfig::{
    BASE_Z_INDEX, HOVER_Z_INDEX, ParadiseConfig, SELECTED_Z_INDEX,
};
use crate::resources::visibility::DocumentVisibility;

/// Run condition: only animate poses while someone can see them.
pub fn document_visible(visibility: Res<DocumentVisibility>) -> bool {
    visibility.0
}

pub fn pose_system(
    config: Res<ParadiseConfig>,
    interaction: Res<InteractionState>,
    highlight: Res<Highlight>,
    mut query: Query<(&Avatar, &Slot, &Kinematics, &mut Pose)>,
) {
    let t = config.pose_easing;
    for (avatar, slot, kin, mut pose) in query.iter_mut() {
        if interaction.is_frozen(AvatarKey::Id(avatar.id())) {
            *pose = Pose {
                scale: config.selected_scale,
                rotation: 0.0,
                opacity: config.selected_opacity,
                z_index: SELECTED_Z_INDEX,
            };
            continue;
        }

        let lifted =
            interaction.hover_index() == Some(slot.0) || highlight.is_highlighted(avatar.id());
        let (scale, rotation, z_index) = if lifted {
            (config.hover_scale, 0.0, HOVER_Z_INDEX)
        } else {
            (kin.target_scale, kin.target_rotation, BASE_Z_INDEX + slot.0 as i32)
        };

        pose.scale = approach(pose.scale, scale, t);
        pose.rotation = approach(pose.rotation, rotation, t);
        pose.opacity = approach(pose.opacity, 1.0, t);
        pose.z_index = z_index;
    }
}
