//! Bookkeeping for the click → sound → navigate race.
//!
//! [`NavigationCoordinator`] owns everything that is registered while a
//! navigation is armed: the two sound listeners (ended, error) and the
//! fallback timer. Each is a plain value here, so "detach" and "cancel"
//! are just drops and can be counted by tests.
//!
//! # State machine
//!
//! ```text
//! Idle --click--> Armed --(ended | error | timeout)--> Idle (navigated)
//! Armed --teardown--> Idle (no navigation)
//! ```
//!
//! The coordinator does not decide whether a signal is stale; that is the
//! job of the resolution routine in [`crate::systems::navigation`], which
//! checks the id against the
//! [`InteractionState`](super::interaction::InteractionState) lock first.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::timer::Countdown;

/// Identifies one playback of a feedback sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaybackId(pub u64);

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fx#{}", self.0)
    }
}

/// Which completion signal a listener waits for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerKind {
    Ended,
    Error,
}

/// A registered interest in one playback's completion signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundListener {
    pub playback: PlaybackId,
    pub kind: ListenerKind,
    pub entity_id: String,
}

/// Timer that navigates if the sound never reports back.
#[derive(Clone, Debug, PartialEq)]
pub struct FallbackTimer {
    pub entity_id: String,
    pub countdown: Countdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    Armed,
}

/// What the coordinator had registered when it was aborted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbortedNavigation {
    pub entity_id: String,
    pub playback: Option<PlaybackId>,
}

#[derive(Resource, Debug, Default)]
pub struct NavigationCoordinator {
    armed: Option<(String, PlaybackId)>,
    listeners: ArrayVec<SoundListener, 2>,
    fallback: Option<FallbackTimer>,
    next_playback: u64,
}

impl NavigationCoordinator {
    pub fn phase(&self) -> NavigationPhase {
        if self.armed.is_some() {
            NavigationPhase::Armed
        } else {
            NavigationPhase::Idle
        }
    }

    pub fn armed_id(&self) -> Option<&str> {
        self.armed.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn armed_playback(&self) -> Option<PlaybackId> {
        self.armed.as_ref().map(|(_, playback)| *playback)
    }

    pub fn attached_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn outstanding_timers(&self) -> usize {
        usize::from(self.fallback.is_some())
    }

    /// Reserve a fresh playback id without arming anything.
    pub fn next_playback(&mut self) -> PlaybackId {
        self.next_playback += 1;
        PlaybackId(self.next_playback)
    }

    /// Remove leftovers from an earlier attempt. Returns how many listeners
    /// and timers were dropped.
    pub fn drain_leftovers(&mut self) -> usize {
        let dropped = self.listeners.len() + self.outstanding_timers();
        self.listeners.clear();
        self.fallback = None;
        self.armed = None;
        dropped
    }

    /// Enter `Armed` for `entity_id`: attach the ended and error listeners
    /// for a new playback and start the fallback timer.
    ///
    /// Fails when `timeout` is not a finite number of seconds: such a timer
    /// could never fire and a silent sound would keep the avatar frozen.
    /// On error nothing stays registered.
    pub fn arm(&mut self, entity_id: &str, timeout: f32) -> Result<PlaybackId, String> {
        if !timeout.is_finite() {
            self.drain_leftovers();
            return Err(format!(
                "cannot start a {}s fallback timer for '{}'",
                timeout, entity_id
            ));
        }
        let playback = self.next_playback();
        let listener = |kind: ListenerKind| SoundListener {
            playback,
            kind,
            entity_id: entity_id.to_string(),
        };
        self.listeners = ArrayVec::from([
            listener(ListenerKind::Ended),
            listener(ListenerKind::Error),
        ]);
        self.fallback = Some(FallbackTimer {
            entity_id: entity_id.to_string(),
            countdown: Countdown::new(timeout),
        });
        self.armed = Some((entity_id.to_string(), playback));
        Ok(playback)
    }

    /// The entity a still-attached listener of `kind` on `playback` belongs to.
    pub fn listener_target(&self, playback: PlaybackId, kind: ListenerKind) -> Option<&str> {
        self.listeners
            .iter()
            .find(|l| l.playback == playback && l.kind == kind)
            .map(|l| l.entity_id.as_str())
    }

    /// Advance the fallback timer. Returns the entity id once it runs out.
    ///
    /// The timer is kept until [`settle`](Self::settle) cancels it, so a
    /// resolution that turns out stale still gets cleaned up there.
    pub fn tick_fallback(&mut self, dt: f32) -> Option<String> {
        let timer = self.fallback.as_mut()?;
        if timer.countdown.tick(dt) {
            Some(timer.entity_id.clone())
        } else {
            None
        }
    }

    /// Cancel the timer and detach both listeners after a resolution.
    /// Returns to `Idle`.
    pub fn settle(&mut self) {
        self.fallback = None;
        self.listeners.clear();
        self.armed = None;
    }

    /// Drop everything without resolving, e.g. on teardown.
    pub fn abort(&mut self) -> Option<AbortedNavigation> {
        let aborted = self
            .armed
            .take()
            .map(|(entity_id, playback)| AbortedNavigation {
                entity_id,
                playback: Some(playback),
            })
            .or_else(|| {
                self.fallback.as_ref().map(|t| AbortedNavigation {
                    entity_id: t.entity_id.clone(),
                    playback: None,
                })
            });
        self.settle();
        aborted
    }
}
