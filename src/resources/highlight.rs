//! Temporary highlight requested by the outer application.
//!
//! Setting a highlight id (for instance right after a profile was created)
//! gives that avatar the hover look and holds it still for
//! `highlight_duration` seconds.

use bevy_ecs::prelude::Resource;

use crate::components::timer::Countdown;

#[derive(Resource, Clone, Debug, Default)]
pub struct Highlight {
    active: Option<(String, Countdown)>,
}

impl Highlight {
    pub fn start(&mut self, id: impl Into<String>, duration: f32) {
        self.active = Some((id.into(), Countdown::new(duration)));
    }

    pub fn clear(&mut self) -> Option<String> {
        self.active.take().map(|(id, _)| id)
    }

    pub fn id(&self) -> Option<&str> {
        self.active.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.id() == Some(id)
    }

    /// Advance the countdown; returns the id that just expired.
    pub fn tick(&mut self, dt: f32) -> Option<String> {
        let (_, countdown) = self.active.as_mut()?;
        if countdown.tick(dt) { self.clear() } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_expires() {
        let mut highlight = Highlight::default();
        highlight.start("rex", 1.0);
        assert!(highlight.is_highlighted("rex"));
        assert_eq!(highlight.tick(0.5), None);
        assert_eq!(highlight.tick(0.6), Some("rex".to_string()));
        assert_eq!(highlight.id(), None);
    }
}
