//! Audio commands and sound completion events.
//!
//! [`AudioCmd`] flows *out* of the engine towards the host's
//! [`SoundDevice`](crate::resources::audio::SoundDevice). The two events
//! flow *in*: the host triggers them when a playback ends or fails, and the
//! navigation observers react only if a listener for that playback is still
//! attached.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::*;

use crate::resources::navigation::PlaybackId;

/// Commands sent *to* the sound device.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    PlayFx { playback: PlaybackId, fx: String },
    StopFx { playback: PlaybackId },
}

/// A feedback sound played to the end.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundEndedEvent {
    pub playback: PlaybackId,
}

/// A feedback sound failed to load or play.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundErrorEvent {
    pub playback: PlaybackId,
}
