//! Pointer interaction and the pending-navigation soft lock.
//!
//! [`InteractionState`] answers two questions for the rest of the engine:
//! which slot the pointer is over, and which avatar (if any) is waiting
//! for its click to resolve into a navigation. The pending avatar is
//! frozen: physics skips it, hover ignores it, and its pose is pinned.
//!
//! Only the navigation resolution routine in
//! [`crate::systems::navigation`] is allowed to clear the pending id, and
//! only with the matching id. Anything else is a stale signal.

use bevy_ecs::prelude::Resource;

/// Address an avatar either by roster slot or by profile id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarKey<'a> {
    Index(usize),
    Id(&'a str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingNavigation {
    id: String,
    slot: usize,
}

#[derive(Resource, Clone, Debug, Default)]
pub struct InteractionState {
    hover_index: Option<usize>,
    pending: Option<PendingNavigation>,
}

impl InteractionState {
    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    pub fn pending_navigation_id(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.id.as_str())
    }

    pub fn is_navigation_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Point at `index`. Ignored while a navigation is pending.
    pub fn hover(&mut self, index: usize) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.hover_index = Some(index);
        true
    }

    pub fn unhover(&mut self) {
        self.hover_index = None;
    }

    /// Take the soft lock for `id`. Rejected while any other id holds it.
    ///
    /// Taking the lock also drops the hover, so the selected pose wins.
    pub fn begin_pending_navigation(&mut self, id: &str, slot: usize) -> bool {
        match &self.pending {
            Some(current) if current.id != id => false,
            Some(_) => true,
            None => {
                self.pending = Some(PendingNavigation {
                    id: id.to_string(),
                    slot,
                });
                self.hover_index = None;
                true
            }
        }
    }

    /// Release the lock if `id` holds it. Returns false for stale ids.
    pub fn resolve_pending_navigation(&mut self, id: &str) -> bool {
        if self.pending_navigation_id() != Some(id) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Drop the lock unconditionally. Used on teardown and roster changes.
    pub fn abandon_pending_navigation(&mut self) -> Option<String> {
        self.pending.take().map(|p| p.id)
    }

    /// Rewrite the pending slot after the roster was rebuilt.
    pub fn reslot_pending(&mut self, slot: usize) {
        if let Some(pending) = &mut self.pending {
            pending.slot = slot;
        }
    }

    /// True for the avatar pending navigation.
    pub fn is_frozen(&self, key: AvatarKey<'_>) -> bool {
        match (&self.pending, key) {
            (Some(p), AvatarKey::Index(i)) => p.slot == i,
            (Some(p), AvatarKey::Id(id)) => p.id == id,
            (None, _) => false,
        }
    }
}
