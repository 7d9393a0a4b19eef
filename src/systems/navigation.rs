//! Click → feedback sound → navigation, exactly once.
//!
//! A click arms the [`NavigationCoordinator`]: the avatar takes the
//! pending lock in [`InteractionState`], two listeners wait for the sound to
//! end or fail, and a fallback timer covers a sound that never reports
//! back. Whichever signal arrives first calls [`resolve_navigation`]; the
//! others find nothing attached, or a lock that no longer matches, and do
//! nothing.
//!
//! # Observers and systems
//!
//! - [`click_observer`] – arms, or navigates at once when there is no sound
//! - [`sound_ended_observer`] / [`sound_error_observer`] – completion signals
//! - [`navigation_timeout_system`] – per-frame fallback timer
//! - [`navigation_teardown_observer`] – cancels everything, never navigates
//! - [`navigation_roster_observer`] – aborts if the pending avatar left

use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::avatar::{Avatar, Slot};
use crate::events::audio::{AudioCmd, SoundEndedEvent, SoundErrorEvent};
use crate::events::input::ClickEvent;
use crate::events::lifecycle::{RosterChangedEvent, TeardownEvent};
use crate::events::navigation::{NavigateRequest, ResolveCause};
use crate::resources::audio::SoundDevice;
use crate::resources::interaction::InteractionState;
use crate::resources::navigation::{ListenerKind, NavigationCoordinator, PlaybackId};
use crate::resources::paradiseconfig::ParadiseConfig;
use crate::resources::soundlibrary::SoundLibrary;
use crate::resources::worldtime::WorldTime;

/// Outbound navigation seam.
///
/// Any `FnMut(&str) -> Result<(), String>` closure is a navigator.
pub trait Navigator {
    fn navigate(&mut self, entity_id: &str) -> Result<(), String>;
}

impl<F> Navigator for F
where
    F: FnMut(&str) -> Result<(), String>,
{
    fn navigate(&mut self, entity_id: &str) -> Result<(), String> {
        self(entity_id)
    }
}

/// Navigator that only logs. Installed until the host provides one.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&mut self, entity_id: &str) -> Result<(), String> {
        info!("navigate to '{}' (no navigator installed)", entity_id);
        Ok(())
    }
}

/// The single resolution routine.
///
/// Does nothing unless `entity_id` still holds the pending lock. Otherwise
/// releases the lock first, then cancels the timer and detaches the
/// listeners, and only then asks for the navigation.
pub fn resolve_navigation(
    entity_id: &str,
    cause: ResolveCause,
    interaction: &mut InteractionState,
    coordinator: &mut NavigationCoordinator,
    navigations: &mut MessageWriter<NavigateRequest>,
) -> bool {
    if !interaction.resolve_pending_navigation(entity_id) {
        debug!("stale {:?} signal for '{}' ignored", cause, entity_id);
        return false;
    }
    coordinator.settle();
    info!("navigating to '{}' after {:?}", entity_id, cause);
    navigations.write(NavigateRequest {
        entity_id: entity_id.to_string(),
        cause,
    });
    true
}

pub fn click_observer(
    trigger: On<ClickEvent>,
    config: Res<ParadiseConfig>,
    library: Res<SoundLibrary>,
    roster: Query<(&Avatar, &Slot)>,
    mut interaction: ResMut<InteractionState>,
    mut coordinator: ResMut<NavigationCoordinator>,
    mut navigations: MessageWriter<NavigateRequest>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let entity_id = trigger.event().entity_id.as_str();
    if entity_id.is_empty() {
        warn!("click on an avatar without a profile id ignored");
        return;
    }
    let Some(slot) = roster
        .iter()
        .find(|(avatar, _)| avatar.id() == entity_id)
        .map(|(_, slot)| slot.0)
    else {
        warn!("click on unknown profile '{}' ignored", entity_id);
        return;
    };
    if let Some(pending) = interaction.pending_navigation_id() {
        debug!(
            "click on '{}' ignored, navigation to '{}' still pending",
            entity_id, pending
        );
        return;
    }

    let leftovers = coordinator.drain_leftovers();
    if leftovers > 0 {
        debug!("drained {} leftover listeners/timers before arming", leftovers);
    }

    let Some(fx) = library.fx_for(entity_id) else {
        info!("no feedback sound for '{}', navigating immediately", entity_id);
        navigations.write(NavigateRequest {
            entity_id: entity_id.to_string(),
            cause: ResolveCause::NoSound,
        });
        return;
    };

    interaction.begin_pending_navigation(entity_id, slot);
    match coordinator.arm(entity_id, config.navigation_timeout()) {
        Ok(playback) => {
            debug!(
                "armed '{}' with {} ('{}'), fallback in {}s",
                entity_id,
                playback,
                fx,
                config.navigation_timeout()
            );
            audio_cmds.write(AudioCmd::PlayFx {
                playback,
                fx: fx.to_string(),
            });
        }
        Err(e) => {
            warn!("{}; navigating to '{}' without sound", e, entity_id);
            resolve_navigation(
                entity_id,
                ResolveCause::ListenerFailure,
                &mut interaction,
                &mut coordinator,
                &mut navigations,
            );
        }
    }
}

pub fn sound_ended_observer(
    trigger: On<SoundEndedEvent>,
    mut interaction: ResMut<InteractionState>,
    mut coordinator: ResMut<NavigationCoordinator>,
    mut navigations: MessageWriter<NavigateRequest>,
) {
    let playback = trigger.event().playback;
    let Some(entity_id) = coordinator
        .listener_target(playback, ListenerKind::Ended)
        .map(str::to_string)
    else {
        debug!("{} ended with no listener attached", playback);
        return;
    };
    resolve_navigation(
        &entity_id,
        ResolveCause::SoundEnded,
        &mut interaction,
        &mut coordinator,
        &mut navigations,
    );
}

pub fn sound_error_observer(
    trigger: On<SoundErrorEvent>,
    mut interaction: ResMut<InteractionState>,
    mut coordinator: ResMut<NavigationCoordinator>,
    mut navigations: MessageWriter<NavigateRequest>,
) {
    let playback = trigger.event().playback;
    let Some(entity_id) = coordinator
        .listener_target(playback, ListenerKind::Error)
        .map(str::to_string)
    else {
        debug!("{} failed with no listener attached", playback);
        return;
    };
    warn!("feedback sound {} for '{}' failed", playback, entity_id);
    resolve_navigation(
        &entity_id,
        ResolveCause::SoundError,
        &mut interaction,
        &mut coordinator,
        &mut navigations,
    );
}

/// Advance the fallback timer and navigate when it runs out.
pub fn navigation_timeout_system(
    time: Res<WorldTime>,
    mut interaction: ResMut<InteractionState>,
    mut coordinator: ResMut<NavigationCoordinator>,
    mut navigations: MessageWriter<NavigateRequest>,
) {
    let Some(entity_id) = coordinator.tick_fallback(time.delta) else {
        return;
    };
    let resolved = resolve_navigation(
        &entity_id,
        ResolveCause::Timeout,
        &mut interaction,
        &mut coordinator,
        &mut navigations,
    );
    if !resolved {
        // leftover timer from an attempt that was already resolved
        coordinator.settle();
    }
}

/// Drop the armed navigation without navigating and stop its sound.
fn abort_navigation(
    reason: &str,
    interaction: &mut InteractionState,
    coordinator: &mut NavigationCoordinator,
    audio_cmds: &mut MessageWriter<AudioCmd>,
) {
    if let Some(aborted) = coordinator.abort() {
        info!("navigation to '{}' aborted: {}", aborted.entity_id, reason);
        if let Some(playback) = aborted.playback {
            audio_cmds.write(AudioCmd::StopFx { playback });
        }
    }
    interaction.abandon_pending_navigation();
}

pub fn navigation_teardown_observer(
    _trigger: On<TeardownEvent>,
    mut interaction: ResMut<InteractionState>,
    mut coordinator: ResMut<NavigationCoordinator>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    abort_navigation(
        "view torn down",
        &mut interaction,
        &mut coordinator,
        &mut audio_cmds,
    );
    interaction.unhover();
}

/// Keep the pending lock pointing at the right slot, or abort if the
/// pending avatar is gone. Hover is always dropped.
pub fn navigation_roster_observer(
    _trigger: On<RosterChangedEvent>,
    roster: Query<(&Avatar, &Slot)>,
    mut interaction: ResMut<InteractionState>,
    mut coordinator: ResMut<NavigationCoordinator>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    interaction.unhover();
    let Some(pending) = interaction.pending_navigation_id().map(str::to_string) else {
        return;
    };
    match roster.iter().find(|(avatar, _)| avatar.id() == pending) {
        Some((_, slot)) => interaction.reslot_pending(slot.0),
        None => abort_navigation(
            "avatar removed from roster",
            &mut interaction,
            &mut coordinator,
            &mut audio_cmds,
        ),
    }
}

/// Forward every queued [`AudioCmd`] to the device.
///
/// Returns the playbacks the device refused; the caller reports them as
/// sound errors.
pub fn forward_audio_cmds(
    cmds: impl IntoIterator<Item = AudioCmd>,
    device: &mut dyn SoundDevice,
) -> Vec<PlaybackId> {
    let mut refused = Vec::new();
    for cmd in cmds {
        match cmd {
            AudioCmd::PlayFx { playback, fx } => {
                if let Err(e) = device.play(playback, &fx) {
                    warn!("cannot play '{}' as {}: {}", fx, playback, e);
                    refused.push(playback);
                }
            }
            AudioCmd::StopFx { playback } => device.stop(playback),
        }
    }
    refused
}
