//! Comic-box captions driven by ambient cues.
//!
//! Each [`AmbientCueEvent`] tries to put one more caption on screen. The
//! number of visible captions is capped at half the roster (rounded up) and
//! at `max_simultaneous_comic_boxes`. Messages come from the
//! [`ComicBoxScheduler`] pool so that no two visible captions repeat.

use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::avatar::{Avatar, Slot};
use crate::components::caption::Caption;
use crate::events::ambient::AmbientCueEvent;
use crate::events::caption::CaptionMessage;
use crate::events::lifecycle::{RosterChangedEvent, TeardownEvent};
use crate::resources::comicbox::ComicBoxScheduler;
use crate::resources::interaction::{AvatarKey, InteractionState};
use crate::resources::paradiseconfig::ParadiseConfig;
use crate::resources::rng::ParadiseRng;
use crate::resources::worldtime::WorldTime;

pub fn ambient_cue_observer(
    _trigger: On<AmbientCueEvent>,
    config: Res<ParadiseConfig>,
    interaction: Res<InteractionState>,
    mut scheduler: ResMut<ComicBoxScheduler>,
    mut rng: ResMut<ParadiseRng>,
    mut captions: MessageWriter<CaptionMessage>,
    mut query: Query<(Entity, &Avatar, &Slot, &mut Caption)>,
) {
    let count = query.iter().count();
    let cap = config.caption_cap(count);
    let visible = query.iter().filter(|(_, _, _, c)| c.visible).count();
    if visible >= cap {
        debug!("ambient cue ignored, {} of {} captions visible", visible, cap);
        return;
    }

    let candidates: SmallVec<[Entity; 16]> = query
        .iter()
        .filter(|(_, avatar, _, caption)| {
            !caption.visible && !interaction.is_frozen(AvatarKey::Id(avatar.id()))
        })
        .map(|(entity, ..)| entity)
        .collect();
    if candidates.is_empty() {
        return;
    }

    let rng = &mut rng.0;
    let chosen = candidates[rng.usize(0..candidates.len())];
    let Some(message) = scheduler.take_message(rng) else {
        debug!("comic-box pool is empty");
        return;
    };
    let Ok((_, avatar, slot, mut caption)) = query.get_mut(chosen) else {
        return;
    };
    if caption.show(message.clone(), config.comic_box_duration) {
        debug!("cancelled stale hide timer on '{}'", avatar.id());
    }
    debug!("caption '{}' on '{}' (slot {})", message, avatar.id(), slot.0);
    captions.write(CaptionMessage::Shown {
        index: slot.0,
        text: message,
    });
}

/// Tick every caption's hide timer and hide the ones that ran out.
pub fn caption_hide_system(
    time: Res<WorldTime>,
    mut scheduler: ResMut<ComicBoxScheduler>,
    mut captions: MessageWriter<CaptionMessage>,
    mut query: Query<(&Slot, &mut Caption)>,
) {
    for (slot, mut caption) in query.iter_mut() {
        let Some(timer) = caption.hide_timer.as_mut() else {
            continue;
        };
        if !timer.tick(time.delta) {
            continue;
        }
        if let Some(message) = caption.hide() {
            scheduler.release(&message);
            captions.write(CaptionMessage::Hidden { index: slot.0 });
        }
    }
}

/// Hide every caption, cancel every hide timer and forget the in-use set.
fn reset_captions(
    scheduler: &mut ComicBoxScheduler,
    captions: &mut MessageWriter<CaptionMessage>,
    query: &mut Query<(&Slot, &mut Caption)>,
) {
    for (slot, mut caption) in query.iter_mut() {
        if caption.hide().is_some() {
            captions.write(CaptionMessage::Hidden { index: slot.0 });
        }
    }
    scheduler.reset();
}

pub fn caption_roster_observer(
    _trigger: On<RosterChangedEvent>,
    mut scheduler: ResMut<ComicBoxScheduler>,
    mut captions: MessageWriter<CaptionMessage>,
    mut query: Query<(&Slot, &mut Caption)>,
) {
    reset_captions(&mut scheduler, &mut captions, &mut query);
}

pub fn caption_teardown_observer(
    _trigger: On<TeardownEvent>,
    mut scheduler: ResMut<ComicBoxScheduler>,
    mut captions: MessageWriter<CaptionMessage>,
    mut query: Query<(&Slot, &mut Caption)>,
) {
    reset_captions(&mut scheduler, &mut captions, &mut query);
}
