//! Profile data attached to each floating avatar.
//!
//! The outer application supplies a list of [`Profile`]s. Each profile id
//! owns exactly one ECS entity for the session, tagged with an [`Avatar`]
//! and a [`Slot`]. The slot is the profile's current position in the list
//! and is what hover and caption events address; it is rebuilt from
//! scratch on every roster change so it can never drift from the list.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// One memorial profile as supplied by the data layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(rename = "displayName", alias = "display_name")]
    pub display_name: String,
    #[serde(
        rename = "imageRef",
        alias = "image_ref",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_ref: Option<String>,
}

impl Profile {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            image_ref: None,
        }
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

/// The profile backing a spawned avatar entity.
#[derive(Component, Clone, Debug)]
pub struct Avatar {
    pub profile: Profile,
}

impl Avatar {
    pub fn id(&self) -> &str {
        &self.profile.id
    }
}

/// Position of the avatar in the current roster.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(pub usize);
