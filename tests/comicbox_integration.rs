//! Comic-box captions: cap, distinct messages, hide timers and resets.

use rustc_hash::FxHashSet;

use paradisefloat::events::caption::CaptionMessage;
use paradisefloat::resources::ambient::AmbientTrack;
use paradisefloat::systems::render::RenderFrame;
use paradisefloat::{Paradise, ParadiseConfig, Profile};

fn roster(n: usize) -> Vec<Profile> {
    (0..n)
        .map(|i| Profile::new(format!("pet-{i}"), format!("Pet {i}")))
        .collect()
}

fn paradise_with(n: usize, config: ParadiseConfig) -> Paradise {
    let mut paradise = Paradise::new(config);
    paradise.set_profiles(roster(n));
    paradise.set_bounds(800.0, 600.0);
    paradise.drain_caption_events();
    paradise
}

fn visible_messages(frame: &RenderFrame) -> Vec<String> {
    frame.visible_captions().map(|c| c.message.clone()).collect()
}

fn shown(events: &[CaptionMessage]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CaptionMessage::Shown { .. }))
        .count()
}

fn hidden(events: &[CaptionMessage]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CaptionMessage::Hidden { .. }))
        .count()
}

#[test]
fn five_avatars_ten_cues_show_three_distinct_captions() {
    let mut paradise = paradise_with(5, ParadiseConfig::new().with_seed(3));
    for _ in 0..10 {
        paradise.ambient_cue();
    }

    let events = paradise.drain_caption_events();
    assert_eq!(shown(&events), 3);
    let frame = paradise.frame();
    let messages = visible_messages(&frame);
    assert_eq!(messages.len(), 3);
    let distinct: FxHashSet<&String> = messages.iter().collect();
    assert_eq!(distinct.len(), 3);
    assert_eq!(paradise.comic_boxes().in_use().len(), 3);
}

#[test]
fn cap_is_half_the_roster_rounded_up() {
    for (count, cap) in [(1, 1), (2, 1), (3, 2), (4, 2), (10, 3)] {
        let mut paradise = paradise_with(count, ParadiseConfig::new().with_seed(5));
        for _ in 0..20 {
            paradise.ambient_cue();
        }
        let frame = paradise.frame();
        assert_eq!(frame.visible_captions().count(), cap, "roster of {count}");
    }
}

#[test]
fn empty_roster_never_shows_captions() {
    let mut paradise = paradise_with(0, ParadiseConfig::new());
    paradise.ambient_cue();
    assert!(paradise.drain_caption_events().is_empty());
}

#[test]
fn captions_hide_after_duration_and_release_messages() {
    let mut paradise = paradise_with(4, ParadiseConfig::new().with_seed(8));
    paradise.ambient_cue();
    paradise.ambient_cue();
    assert_eq!(paradise.frame().visible_captions().count(), 2);

    paradise.tick(3.9);
    assert_eq!(paradise.frame().visible_captions().count(), 2);
    paradise.tick(0.2);
    assert_eq!(paradise.frame().visible_captions().count(), 0);
    assert!(paradise.comic_boxes().in_use().is_empty());

    let events = paradise.drain_caption_events();
    assert_eq!(shown(&events), 2);
    assert_eq!(hidden(&events), 2);
}

#[test]
fn visible_captions_never_repeat_while_pool_lasts() {
    let mut paradise = paradise_with(12, ParadiseConfig::new().with_seed(21));
    for step in 0..200 {
        paradise.ambient_cue();
        paradise.tick(0.7);
        let messages = visible_messages(&paradise.frame());
        let distinct: FxHashSet<&String> = messages.iter().collect();
        assert_eq!(distinct.len(), messages.len(), "step {step}");
        assert!(messages.len() <= 3);
    }
}

#[test]
fn exhausted_pool_recycles() {
    let mut config = ParadiseConfig::new().with_seed(2);
    config.comic_messages = vec!["Woof!".to_string()];
    let mut paradise = paradise_with(6, config);
    paradise.ambient_cue();
    paradise.ambient_cue();
    let messages = visible_messages(&paradise.frame());
    assert_eq!(messages, vec!["Woof!".to_string(), "Woof!".to_string()]);
}

#[test]
fn small_pool_recovers_without_piling_up_duplicates() {
    let pool = ["x", "y", "z"];
    for seed in 0..20 {
        let mut config = ParadiseConfig::new().with_seed(seed);
        config.max_simultaneous_comic_boxes = 4;
        config.comic_messages = pool.iter().map(|m| m.to_string()).collect();
        let mut paradise = paradise_with(8, config);

        for step in 0..80 {
            let before = visible_messages(&paradise.frame());
            paradise.ambient_cue();
            for event in paradise.drain_caption_events() {
                let CaptionMessage::Shown { text, .. } = event else {
                    continue;
                };
                // a message already on screen is only reused once all are
                if before.contains(&text) {
                    assert!(
                        pool.iter().all(|m| before.iter().any(|b| b == m)),
                        "seed {seed} step {step}: reused {text:?} over {before:?}"
                    );
                }
            }

            paradise.tick(1.0);
            let messages = visible_messages(&paradise.frame());
            let distinct: FxHashSet<&String> = messages.iter().collect();
            assert!(
                messages.len() - distinct.len() <= 1,
                "seed {seed} step {step}: {messages:?}"
            );
            for m in pool {
                let showing = messages.iter().filter(|v| *v == m).count();
                assert_eq!(paradise.comic_boxes().use_count(m), showing, "seed {seed}");
            }
        }
    }
}

#[test]
fn pending_avatar_gets_no_caption() {
    for seed in 0..20 {
        let mut paradise = paradise_with(2, ParadiseConfig::new().with_seed(seed));
        paradise.click("pet-0");
        paradise.ambient_cue();
        let frame = paradise.frame();
        assert!(!frame.captions[0].visible, "seed {seed}");
        assert!(frame.captions[1].visible, "seed {seed}");
    }
}

#[test]
fn roster_change_hides_everything_and_clears_in_use() {
    let mut paradise = paradise_with(6, ParadiseConfig::new().with_seed(4));
    for _ in 0..3 {
        paradise.ambient_cue();
    }
    assert_eq!(paradise.frame().visible_captions().count(), 3);
    paradise.drain_caption_events();

    let mut reordered = roster(6);
    reordered.reverse();
    paradise.set_profiles(reordered);

    assert_eq!(paradise.frame().visible_captions().count(), 0);
    assert!(paradise.comic_boxes().in_use().is_empty());
    assert_eq!(hidden(&paradise.drain_caption_events()), 3);

    // cancelled hide timers stay cancelled
    paradise.tick(10.0);
    assert!(paradise.drain_caption_events().is_empty());
}

#[test]
fn teardown_hides_captions() {
    let mut paradise = paradise_with(4, ParadiseConfig::new().with_seed(9));
    paradise.ambient_cue();
    paradise.drain_caption_events();
    paradise.teardown();
    assert_eq!(hidden(&paradise.drain_caption_events()), 1);
    assert!(paradise.comic_boxes().in_use().is_empty());
    paradise.ambient_cue();
    assert!(paradise.drain_caption_events().is_empty());
}

#[test]
fn playing_ambient_track_drives_cues() {
    let mut config = ParadiseConfig::new().with_seed(6);
    config.ambient_cue_interval = 1.0;
    let track = AmbientTrack::new();
    let mut paradise = Paradise::new(config).with_ambient(track.clone());
    paradise.set_profiles(roster(6));
    paradise.drain_caption_events();

    paradise.tick(1.5);
    assert!(paradise.drain_caption_events().is_empty());

    assert!(paradise.start_ambient());
    paradise.tick(0.5);
    assert!(paradise.drain_caption_events().is_empty());
    paradise.tick(0.6);
    assert_eq!(shown(&paradise.drain_caption_events()), 1);

    assert!(paradise.stop_ambient());
    paradise.tick(3.0);
    assert_eq!(paradise.frame().visible_captions().count(), 1);
    assert!(paradise.drain_caption_events().is_empty());
}

#[test]
fn only_one_view_owns_the_ambient_track() {
    let track = AmbientTrack::new();
    let mut first = Paradise::new(ParadiseConfig::new()).with_ambient(track.clone());
    let mut second = Paradise::new(ParadiseConfig::new()).with_ambient(track.clone());

    assert!(first.start_ambient());
    assert!(!second.start_ambient());
    assert!(!second.stop_ambient());
    assert!(track.is_playing());

    first.teardown();
    assert!(!track.is_playing());
    assert!(second.start_ambient());
    drop(second);
    assert!(!track.is_playing());
}
