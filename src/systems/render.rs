//! Frame assembly for the render layer.
//!
//! [`collect_frame`] reads positions, poses and captions and returns them
//! ordered by roster slot, which is the order the renderer laid the
//! profiles out in.

use bevy_ecs::prelude::*;
use serde::Serialize;

use crate::components::avatar::Slot;
use crate::components::caption::{Caption, CaptionView};
use crate::components::mapposition::MapPosition;
use crate::components::pose::{Pose, RenderTransform};

/// Everything the renderer needs for one frame, indexed by slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderFrame {
    pub transforms: Vec<RenderTransform>,
    pub captions: Vec<CaptionView>,
}

impl RenderFrame {
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn visible_captions(&self) -> impl Iterator<Item = &CaptionView> {
        self.captions.iter().filter(|c| c.visible)
    }
}

pub fn collect_frame(world: &mut World) -> RenderFrame {
    let mut query = world.query::<(&Slot, &MapPosition, &Pose, &Caption)>();
    let mut rows: Vec<(usize, RenderTransform, CaptionView)> = query
        .iter(world)
        .map(|(slot, position, pose, caption)| {
            let transform = RenderTransform {
                x: position.pos.x,
                y: position.pos.y,
                scale: pose.scale,
                rotation: pose.rotation,
                opacity: pose.opacity,
                z_index: pose.z_index,
            };
            (slot.0, transform, caption.view())
        })
        .collect();
    rows.sort_by_key(|(slot, _, _)| *slot);

    let mut frame = RenderFrame {
        transforms: Vec::with_capacity(rows.len()),
        captions: Vec::with_capacity(rows.len()),
    };
    for (_, transform, caption) in rows {
        frame.transforms.push(transform);
        frame.captions.push(caption);
    }
    frame
}
