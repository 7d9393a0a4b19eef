//! Outbound navigation requests.

use bevy_ecs::message::Message;

/// Why a navigation was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveCause {
    /// The feedback sound finished.
    SoundEnded,
    /// The feedback sound reported an error or could not be started.
    SoundError,
    /// The fallback timer ran out first.
    Timeout,
    /// No feedback sound is configured for the avatar.
    NoSound,
    /// The completion listeners or the fallback timer could not be attached.
    ListenerFailure,
}

/// Ask the host to open the profile page for `entity_id`.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct NavigateRequest {
    pub entity_id: String,
    pub cause: ResolveCause,
}
