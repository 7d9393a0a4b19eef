//! The paradise view engine.
//!
//! [`Paradise`] owns the ECS [`World`], the per-frame [`Schedule`] and the
//! observers, and is the only type the host talks to. Inputs come in as
//! method calls; each one either runs the frame schedule ([`Paradise::tick`])
//! or triggers an observer event, and then flushes what the engine wants to
//! say back:
//!
//! - queued [`AudioCmd`]s go to the installed [`SoundDevice`]; a refused
//!   `PlayFx` re-enters as a sound error,
//! - [`NavigateRequest`]s go to the installed [`Navigator`],
//! - [`CaptionMessage`]s are buffered for [`Paradise::drain_caption_events`].
//!
//! # Frame order
//!
//! 1. highlight expiry
//! 2. navigation fallback timer
//! 3. caption hide timers
//! 4. ambient cue clock
//! 5. physics (container measured and document visible)
//! 6. pose easing (document visible)
//!
//! Timers always run, so a click made just before the tab was hidden still
//! navigates.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, error, info};

use crate::components::avatar::{Avatar, Profile};
use crate::components::mapposition::MapPosition;
use crate::events::ambient::AmbientCueEvent;
use crate::events::audio::{AudioCmd, SoundEndedEvent, SoundErrorEvent};
use crate::events::caption::CaptionMessage;
use crate::events::input::{ClickEvent, HoverEvent, UnhoverEvent};
use crate::events::lifecycle::TeardownEvent;
use crate::events::navigation::NavigateRequest;
use crate::resources::ambient::{AmbientClock, AmbientOwner, AmbientTrack};
use crate::resources::audio::{SilentDevice, SoundDevice};
use crate::resources::comicbox::ComicBoxScheduler;
use crate::resources::containerbounds::ContainerBounds;
use crate::resources::highlight::Highlight;
use crate::resources::interaction::InteractionState;
use crate::resources::navigation::{NavigationCoordinator, PlaybackId};
use crate::resources::paradiseconfig::ParadiseConfig;
use crate::resources::rng::ParadiseRng;
use crate::resources::soundlibrary::SoundLibrary;
use crate::resources::visibility::DocumentVisibility;
use crate::resources::worldtime::WorldTime;
use crate::systems::ambient::ambient_cue_clock;
use crate::systems::comicbox::{
    ambient_cue_observer, caption_hide_system, caption_roster_observer, caption_teardown_observer,
};
use crate::systems::highlight::highlight_system;
use crate::systems::interaction::{hover_observer, unhover_observer};
use crate::systems::navigation::{
    LogNavigator, Navigator, click_observer, forward_audio_cmds, navigation_roster_observer,
    navigation_teardown_observer, navigation_timeout_system, sound_ended_observer,
    sound_error_observer,
};
use crate::systems::physics::{physics_active, physics_system};
use crate::systems::pose::{document_visible, pose_system};
use crate::systems::render::{RenderFrame, collect_frame};
use crate::systems::roster::{
    clamp_avatars, highlight_roster_observer, scatter_avatars, sync_roster,
};

pub struct Paradise {
    world: World,
    frame: Schedule,
    navigator: Box<dyn Navigator>,
    sound_device: Box<dyn SoundDevice>,
    caption_events: Vec<CaptionMessage>,
    ambient: Option<(AmbientTrack, AmbientOwner)>,
    torn_down: bool,
}

impl Paradise {
    pub fn new(config: ParadiseConfig) -> Self {
        let mut world = World::new();

        let sound_library = if config.click_fx.is_empty() {
            SoundLibrary::silent()
        } else {
            SoundLibrary::with_default(config.click_fx.clone())
        };
        world.insert_resource(WorldTime::default());
        world.insert_resource(ContainerBounds::default());
        world.insert_resource(DocumentVisibility::default());
        world.insert_resource(ParadiseRng::new(config.seed));
        world.insert_resource(InteractionState::default());
        world.insert_resource(NavigationCoordinator::default());
        world.insert_resource(ComicBoxScheduler::new(config.comic_messages.clone()));
        world.insert_resource(Highlight::default());
        world.insert_resource(AmbientClock::new(config.ambient_cue_interval));
        world.insert_resource(sound_library);
        world.insert_resource(config);

        world.init_resource::<Messages<AudioCmd>>();
        world.init_resource::<Messages<NavigateRequest>>();
        world.init_resource::<Messages<CaptionMessage>>();

        world.spawn(Observer::new(hover_observer));
        world.spawn(Observer::new(unhover_observer));
        world.spawn(Observer::new(click_observer));
        world.spawn(Observer::new(sound_ended_observer));
        world.spawn(Observer::new(sound_error_observer));
        world.spawn(Observer::new(ambient_cue_observer));
        world.spawn(Observer::new(navigation_teardown_observer));
        world.spawn(Observer::new(caption_teardown_observer));
        world.spawn(Observer::new(navigation_roster_observer));
        world.spawn(Observer::new(caption_roster_observer));
        world.spawn(Observer::new(highlight_roster_observer));
        // Observers must exist before the first trigger.
        world.flush();

        let mut frame = Schedule::default();
        frame.add_systems(
            (
                highlight_system,
                navigation_timeout_system,
                caption_hide_system,
                ambient_cue_clock,
                physics_system.run_if(physics_active),
                pose_system.run_if(document_visible),
            )
                .chain(),
        );

        Paradise {
            world,
            frame,
            navigator: Box::new(LogNavigator),
            sound_device: Box::new(SilentDevice),
            caption_events: Vec::new(),
            ambient: None,
            torn_down: false,
        }
    }

    /// Install the navigation callback.
    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Box::new(navigator);
        self
    }

    /// Install the sound output.
    pub fn with_sound_device(mut self, device: impl SoundDevice + 'static) -> Self {
        self.sound_device = Box::new(device);
        self
    }

    pub fn with_sound_library(mut self, library: SoundLibrary) -> Self {
        self.world.insert_resource(library);
        self
    }

    /// Attach the shared ambient track. The view registers as a potential
    /// owner but does not start it.
    pub fn with_ambient(mut self, track: AmbientTrack) -> Self {
        let owner = track.register();
        self.world.resource_mut::<AmbientClock>().attach(track.clone());
        self.ambient = Some((track, owner));
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &ParadiseConfig {
        self.world.resource::<ParadiseConfig>()
    }

    pub fn interaction(&self) -> &InteractionState {
        self.world.resource::<InteractionState>()
    }

    pub fn coordinator(&self) -> &NavigationCoordinator {
        self.world.resource::<NavigationCoordinator>()
    }

    pub fn comic_boxes(&self) -> &ComicBoxScheduler {
        self.world.resource::<ComicBoxScheduler>()
    }

    pub fn highlight_id(&self) -> Option<&str> {
        self.world.resource::<Highlight>().id()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn avatar_count(&mut self) -> usize {
        self.world.query::<&Avatar>().iter(&self.world).count()
    }

    /// Current centre of the avatar with profile id `id`.
    pub fn position_of(&mut self, id: &str) -> Option<Vec2> {
        self.world
            .query::<(&Avatar, &MapPosition)>()
            .iter(&self.world)
            .find(|(avatar, _)| avatar.id() == id)
            .map(|(_, position)| position.pos)
    }

    /// Replace the roster.
    pub fn set_profiles(&mut self, profiles: Vec<Profile>) {
        if self.ignored("set_profiles") {
            return;
        }
        sync_roster(&mut self.world, profiles);
        self.flush();
    }

    /// Record the measured container size. The first real measurement
    /// scatters the avatars across it; later ones pull every avatar back
    /// inside.
    pub fn set_bounds(&mut self, w: f32, h: f32) {
        if self.ignored("set_bounds") {
            return;
        }
        let bounds = ContainerBounds::new(w, h);
        let was_measured = self.world.resource::<ContainerBounds>().is_measured();
        self.world.insert_resource(bounds);
        if !was_measured {
            scatter_avatars(&mut self.world);
        } else {
            clamp_avatars(&mut self.world);
        }
    }

    pub fn set_document_visible(&mut self, visible: bool) {
        if self.ignored("set_document_visible") {
            return;
        }
        self.world.resource_mut::<DocumentVisibility>().0 = visible;
    }

    /// Highlight the avatar with profile id `id` for `highlight_duration`
    /// seconds, or clear the highlight with `None`. Unknown ids are ignored.
    pub fn set_highlight(&mut self, id: Option<&str>) {
        if self.ignored("set_highlight") {
            return;
        }
        let Some(id) = id else {
            self.world.resource_mut::<Highlight>().clear();
            return;
        };
        let known = self
            .world
            .query::<&Avatar>()
            .iter(&self.world)
            .any(|avatar| avatar.id() == id);
        if !known {
            debug!("highlight for unknown profile '{}' ignored", id);
            return;
        }
        let duration = self.config().highlight_duration;
        self.world.resource_mut::<Highlight>().start(id, duration);
    }

    pub fn hover(&mut self, index: usize) {
        if self.ignored("hover") {
            return;
        }
        self.world.trigger(HoverEvent { index });
        self.flush();
    }

    pub fn unhover(&mut self) {
        if self.ignored("unhover") {
            return;
        }
        self.world.trigger(UnhoverEvent);
        self.flush();
    }

    /// Click on the avatar with profile id `entity_id`.
    pub fn click(&mut self, entity_id: &str) {
        if self.ignored("click") {
            return;
        }
        self.world.trigger(ClickEvent {
            entity_id: entity_id.to_string(),
        });
        self.flush();
    }

    /// The sound device finished `playback`.
    pub fn sound_finished(&mut self, playback: PlaybackId) {
        if self.ignored("sound_finished") {
            return;
        }
        self.world.trigger(SoundEndedEvent { playback });
        self.flush();
    }

    /// The sound device failed to play `playback`.
    pub fn sound_error(&mut self, playback: PlaybackId) {
        if self.ignored("sound_error") {
            return;
        }
        self.world.trigger(SoundErrorEvent { playback });
        self.flush();
    }

    /// External ambient cue; tries to show one more caption.
    pub fn ambient_cue(&mut self) {
        if self.ignored("ambient_cue") {
            return;
        }
        self.world.trigger(AmbientCueEvent);
        self.flush();
    }

    /// Start the attached ambient track on behalf of this view.
    ///
    /// Fails if no track is attached or another view already plays it.
    pub fn start_ambient(&mut self) -> bool {
        match &self.ambient {
            Some((track, owner)) => track.start(*owner),
            None => false,
        }
    }

    pub fn stop_ambient(&mut self) -> bool {
        match &self.ambient {
            Some((track, owner)) => track.stop(*owner),
            None => false,
        }
    }

    /// Advance by `dt` seconds and return the frame to draw.
    pub fn tick(&mut self, dt: f32) -> RenderFrame {
        if !self.torn_down {
            self.world.resource_mut::<WorldTime>().advance(dt);
            self.frame.run(&mut self.world);
            self.world.clear_trackers();
            self.flush();
        }
        collect_frame(&mut self.world)
    }

    /// The current frame without advancing time.
    pub fn frame(&mut self) -> RenderFrame {
        collect_frame(&mut self.world)
    }

    pub fn drain_caption_events(&mut self) -> Vec<CaptionMessage> {
        std::mem::take(&mut self.caption_events)
    }

    /// Cancel everything without navigating. Idempotent; further input is
    /// ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.world.trigger(TeardownEvent);
        self.world.resource_mut::<Highlight>().clear();
        self.flush();
        if let Some((track, owner)) = &self.ambient {
            if track.stop(*owner) {
                info!("ambient track stopped with its view");
            }
        }
        self.torn_down = true;
    }

    fn ignored(&self, what: &str) -> bool {
        if self.torn_down {
            debug!("{} after teardown ignored", what);
        }
        self.torn_down
    }

    /// Hand queued messages to the device, the navigator and the caption
    /// buffer.
    fn flush(&mut self) {
        self.world.flush();
        loop {
            let cmds: Vec<AudioCmd> = self
                .world
                .resource_mut::<Messages<AudioCmd>>()
                .drain()
                .collect();
            if cmds.is_empty() {
                break;
            }
            let refused = forward_audio_cmds(cmds, self.sound_device.as_mut());
            for playback in refused {
                self.world.trigger(SoundErrorEvent { playback });
            }
            self.world.flush();
        }

        let navigations: Vec<NavigateRequest> = self
            .world
            .resource_mut::<Messages<NavigateRequest>>()
            .drain()
            .collect();
        for request in navigations {
            if let Err(e) = self.navigator.navigate(&request.entity_id) {
                error!("navigation to '{}' failed: {}", request.entity_id, e);
            }
        }

        let captions = self
            .world
            .resource_mut::<Messages<CaptionMessage>>()
            .drain()
            .collect::<Vec<_>>();
        self.caption_events.extend(captions);
    }
}

impl Drop for Paradise {
    fn drop(&mut self) {
        self.teardown();
    }
}
