//! Message pool for the comic-box captions.
//!
//! The scheduler hands out messages so that no two visible captions say
//! the same thing. It counts how many visible captions show each message;
//! only messages with no caption on screen are offered. When every message
//! is already showing the whole pool is offered instead, and the counts
//! keep tracking the duplicates so a message only becomes free again once
//! its last caption is hidden.

use bevy_ecs::prelude::Resource;
use fastrand::Rng;
use rustc_hash::FxHashMap;

#[derive(Resource, Clone, Debug, Default)]
pub struct ComicBoxScheduler {
    pool: Vec<String>,
    in_use: FxHashMap<String, usize>,
}

impl ComicBoxScheduler {
    pub fn new(pool: Vec<String>) -> Self {
        Self {
            pool,
            in_use: FxHashMap::default(),
        }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// Messages on screen, with the number of captions showing each.
    pub fn in_use(&self) -> &FxHashMap<String, usize> {
        &self.in_use
    }

    pub fn use_count(&self, message: &str) -> usize {
        self.in_use.get(message).copied().unwrap_or(0)
    }

    /// Pick a message not currently on screen and mark it in use.
    ///
    /// Returns `None` only for an empty pool.
    pub fn take_message(&mut self, rng: &mut Rng) -> Option<String> {
        if self.pool.is_empty() {
            return None;
        }
        let available: Vec<&String> = self
            .pool
            .iter()
            .filter(|m| !self.in_use.contains_key(*m))
            .collect();
        let message = if available.is_empty() {
            self.pool[rng.usize(0..self.pool.len())].clone()
        } else {
            available[rng.usize(0..available.len())].clone()
        };
        *self.in_use.entry(message.clone()).or_insert(0) += 1;
        Some(message)
    }

    /// Return a message once one of its captions is hidden.
    pub fn release(&mut self, message: &str) {
        if let Some(count) = self.in_use.get_mut(message) {
            *count -= 1;
            if *count == 0 {
                self.in_use.remove(message);
            }
        }
    }

    /// Forget every in-use mark (roster change, teardown).
    pub fn reset(&mut self) {
        self.in_use.clear();
    }
}
