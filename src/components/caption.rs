//! Comic-box caption attached to each avatar.
//!
//! A caption is either hidden or showing one message from the
//! [`ComicBoxScheduler`](crate::resources::comicbox::ComicBoxScheduler)
//! pool. A visible caption owns its hide timer; dropping the timer is how
//! it gets cancelled.

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::components::timer::Countdown;

#[derive(Component, Clone, Debug, Default)]
pub struct Caption {
    pub visible: bool,
    pub message: String,
    pub hide_timer: Option<Countdown>,
}

impl Caption {
    /// Show `message` for `duration` seconds.
    ///
    /// Returns true if an outstanding hide timer was cancelled to do so.
    pub fn show(&mut self, message: impl Into<String>, duration: f32) -> bool {
        let cancelled = self.hide_timer.take().is_some();
        self.visible = true;
        self.message = message.into();
        self.hide_timer = Some(Countdown::new(duration));
        cancelled
    }

    /// Hide the caption and cancel its timer. Returns the released message.
    pub fn hide(&mut self) -> Option<String> {
        self.hide_timer = None;
        if !self.visible {
            return None;
        }
        self.visible = false;
        Some(std::mem::take(&mut self.message))
    }

    pub fn view(&self) -> CaptionView {
        CaptionView {
            visible: self.visible,
            message: self.message.clone(),
            hide_in: self.hide_timer.map(|t| t.remaining()),
        }
    }
}

/// Read-only caption state for the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaptionView {
    pub visible: bool,
    pub message: String,
    /// Seconds until the pending hide fires, if one is scheduled.
    #[serde(rename = "hideIn")]
    pub hide_in: Option<f32>,
}
