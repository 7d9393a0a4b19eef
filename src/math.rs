//! Small numeric helpers shared by the physics and pose systems.
//!
//! Everything here is pure: no ECS access, no hidden state. Randomness is
//! always drawn from a caller-provided [`fastrand::Rng`] so seeded runs stay
//! reproducible.

use fastrand::Rng;
use glam::Vec2;

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics: when the range is inverted
/// (container smaller than the avatar plus margins) the midpoint is returned.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return (min + max) * 0.5;
    }
    value.max(min).min(max)
}

/// Sample a random f32 in the range [min, max].
/// If the range is smaller than EPSILON, returns min directly.
#[inline]
pub fn random_in_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range < f32::EPSILON {
        return min;
    }
    min + rng.f32() * range
}

/// Random vector with both components in `[-magnitude, magnitude]`.
#[inline]
pub fn random_symmetric(rng: &mut Rng, magnitude: f32) -> Vec2 {
    Vec2::new(
        random_in_range(rng, -magnitude, magnitude),
        random_in_range(rng, -magnitude, magnitude),
    )
}

/// Random vector of exactly `speed` length in a uniformly chosen direction.
#[inline]
pub fn random_heading(rng: &mut Rng, speed: f32) -> Vec2 {
    let theta = random_in_range(rng, 0.0, std::f32::consts::TAU);
    Vec2::new(theta.cos(), theta.sin()) * speed
}

/// Move `current` a fraction `t` of the way toward `target`.
#[inline]
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn clamp_inside_range_is_identity() {
        assert!(approx_eq(clamp(5.0, 0.0, 10.0), 5.0));
    }

    #[test]
    fn clamp_limits_both_ends() {
        assert!(approx_eq(clamp(-3.0, 0.0, 10.0), 0.0));
        assert!(approx_eq(clamp(42.0, 0.0, 10.0), 10.0));
    }

    #[test]
    fn clamp_inverted_range_returns_midpoint() {
        assert!(approx_eq(clamp(100.0, 60.0, 40.0), 50.0));
    }

    #[test]
    fn random_in_range_stays_in_bounds() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..1000 {
            let v = random_in_range(&mut rng, -2.0, 3.0);
            assert!((-2.0..=3.0).contains(&v));
        }
    }

    #[test]
    fn random_in_range_degenerate_returns_min() {
        let mut rng = Rng::with_seed(7);
        assert!(approx_eq(random_in_range(&mut rng, 4.0, 4.0), 4.0));
    }

    #[test]
    fn random_heading_has_requested_length() {
        let mut rng = Rng::with_seed(11);
        for _ in 0..100 {
            assert!(approx_eq(random_heading(&mut rng, 0.5).length(), 0.5));
        }
    }

    #[test]
    fn approach_moves_fractionally() {
        assert!(approx_eq(approach(0.0, 10.0, 0.25), 2.5));
        assert!(approx_eq(approach(0.0, 10.0, 2.0), 10.0));
    }
}
