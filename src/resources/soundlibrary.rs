//! Which feedback sound plays when an avatar is clicked.
//!
//! A library with neither a default nor an override for an avatar means
//! there is no sound to wait for, and the click navigates immediately.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

#[derive(Resource, Clone, Debug, Default)]
pub struct SoundLibrary {
    default_fx: Option<String>,
    overrides: FxHashMap<String, String>,
}

impl SoundLibrary {
    /// Library playing `fx` for every avatar.
    pub fn with_default(fx: impl Into<String>) -> Self {
        Self {
            default_fx: Some(fx.into()),
            overrides: FxHashMap::default(),
        }
    }

    /// Library with no sounds; clicks navigate immediately.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Use `fx` for the avatar with profile id `entity_id`.
    pub fn set_override(&mut self, entity_id: impl Into<String>, fx: impl Into<String>) {
        self.overrides.insert(entity_id.into(), fx.into());
    }

    pub fn fx_for(&self, entity_id: &str) -> Option<&str> {
        self.overrides
            .get(entity_id)
            .map(String::as_str)
            .or(self.default_fx.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.default_fx.is_none() && self.overrides.is_empty()
    }
}
