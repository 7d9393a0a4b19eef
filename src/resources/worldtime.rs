use bevy_ecs::prelude::Resource;

/// Simulation clock, advanced once per [`Paradise::tick`](crate::paradise::Paradise::tick).
///
/// `delta` is in seconds and already scaled by `time_scale`. Timers read it;
/// physics does not, it steps once per frame.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Start a new frame of `dt` unscaled seconds.
    ///
    /// Negative deltas (clock skew from the host) count as zero, so timers
    /// never run backwards.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt.max(0.0) * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_scales_and_counts_frames() {
        let mut time = WorldTime {
            time_scale: 0.5,
            ..WorldTime::default()
        };
        time.advance(0.2);
        time.advance(0.2);
        assert!((time.delta - 0.1).abs() < 1e-6);
        assert!((time.elapsed - 0.2).abs() < 1e-6);
        assert_eq!(time.frame_count, 2);
    }

    #[test]
    fn negative_delta_is_zero() {
        let mut time = WorldTime::default();
        time.advance(-1.0);
        assert_eq!(time.delta, 0.0);
        assert_eq!(time.elapsed, 0.0);
    }
}
