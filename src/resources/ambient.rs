//! Shared handle to the one ambient track.
//!
//! Several paradise views may be alive at once (for example during a page
//! transition), but only one ambient track may ever play. Instead of
//! looking up a global audio element, every view is handed the same
//! [`AmbientTrack`] and asks it for permission to start.
//!
//! While the track is playing, every attached view derives its comic-box
//! cues from it, whether or not that view started it.

use std::sync::{Arc, Mutex, MutexGuard};

use bevy_ecs::prelude::Resource;
use log::{debug, warn};

use crate::components::timer::Countdown;

/// Identifies a view that may own the ambient track.
pub type AmbientOwner = u64;

#[derive(Debug, Default)]
struct AmbientInner {
    owner: Option<AmbientOwner>,
    next_owner: AmbientOwner,
}

/// Cloneable handle; all clones refer to the same track.
#[derive(Clone, Debug, Default)]
pub struct AmbientTrack {
    inner: Arc<Mutex<AmbientInner>>,
}

impl AmbientTrack {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, AmbientInner> {
        // A poisoned lock only means another view panicked mid-update; the
        // two fields stay consistent either way.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Hand out an owner id for a new view.
    pub fn register(&self) -> AmbientOwner {
        let mut inner = self.lock();
        inner.next_owner += 1;
        inner.next_owner
    }

    /// Start playing on behalf of `owner`. Fails if any track already plays.
    pub fn start(&self, owner: AmbientOwner) -> bool {
        let mut inner = self.lock();
        match inner.owner {
            Some(current) if current == owner => true,
            Some(current) => {
                debug!("ambient track already playing for view {}", current);
                false
            }
            None => {
                inner.owner = Some(owner);
                true
            }
        }
    }

    /// Stop the track if `owner` started it.
    pub fn stop(&self, owner: AmbientOwner) -> bool {
        let mut inner = self.lock();
        if inner.owner == Some(owner) {
            inner.owner = None;
            true
        } else {
            if inner.owner.is_some() {
                warn!("view {} tried to stop an ambient track it does not own", owner);
            }
            false
        }
    }

    pub fn is_playing(&self) -> bool {
        self.lock().owner.is_some()
    }

    pub fn owner(&self) -> Option<AmbientOwner> {
        self.lock().owner
    }
}

/// Per-view cue clock. Fires every `interval` seconds while the attached
/// track is playing; a view with no track never fires on its own.
#[derive(Resource, Debug)]
pub struct AmbientClock {
    track: Option<AmbientTrack>,
    countdown: Countdown,
}

impl AmbientClock {
    pub fn new(interval: f32) -> Self {
        Self {
            track: None,
            countdown: Countdown::new(interval),
        }
    }

    pub fn attach(&mut self, track: AmbientTrack) {
        self.track = Some(track);
        self.countdown.reset();
    }

    pub fn track(&self) -> Option<&AmbientTrack> {
        self.track.as_ref()
    }

    /// Advance the clock. Returns true when a cue is due.
    pub fn tick(&mut self, dt: f32) -> bool {
        let playing = self.track.as_ref().is_some_and(AmbientTrack::is_playing);
        if !playing {
            self.countdown.reset();
            return false;
        }
        if self.countdown.tick(dt) {
            self.countdown.reset();
            true
        } else {
            false
        }
    }
}
