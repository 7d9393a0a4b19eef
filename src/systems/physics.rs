//! Floating-avatar physics.
//!
//! [`physics_system`] advances every free avatar by one frame:
//!
//! 1. pairwise repulsion from nearby avatars,
//! 2. exponential push away from the container walls,
//! 3. a small random drift,
//! 4. speed clamped into `[min_velocity, max_velocity]`,
//! 5. damping,
//! 6. integration, clamping to the bounds and an inelastic bounce.
//!
//! Velocities are in pixels per frame, not per second. The system is
//! skipped entirely while the document is hidden (see [`physics_active`]),
//! so a long background pause never turns into one huge step.
//!
//! All avatars read neighbour positions from one snapshot taken before any
//! of them moves, so forces between a pair are always symmetric.
//!
//! Hovered, highlighted and pending avatars are not stepped. The pending
//! one also stops repelling others.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::Vec2;

use crate::components::avatar::{Avatar, Slot};
use crate::components::kinematics::Kinematics;
use crate::components::mapposition::MapPosition;
use crate::math::{clamp, random_heading, random_symmetric};
use crate::resources::containerbounds::ContainerBounds;
use crate::resources::highlight::Highlight;
use crate::resources::interaction::{AvatarKey, InteractionState};
use crate::resources::paradiseconfig::ParadiseConfig;
use crate::resources::rng::ParadiseRng;
use crate::resources::visibility::DocumentVisibility;

/// Below this speed an avatar gets a fresh heading instead of a rescale.
const NEAR_ZERO_SPEED: f32 = 1e-3;
/// Velocity factor applied on the axis that hit a wall.
const BOUNCE: f32 = -0.5;

/// Run condition: container measured and document visible.
pub fn physics_active(bounds: Res<ContainerBounds>, visibility: Res<DocumentVisibility>) -> bool {
    bounds.is_measured() && visibility.0
}

/// Advance all free avatars by one frame.
pub fn physics_system(
    config: Res<ParadiseConfig>,
    bounds: Res<ContainerBounds>,
    interaction: Res<InteractionState>,
    highlight: Res<Highlight>,
    mut rng: ResMut<ParadiseRng>,
    mut query: Query<(Entity, &Avatar, &Slot, &mut MapPosition, &mut Kinematics)>,
) {
    // Vec to avoid borrowing issues: every avatar sees last frame's positions.
    let snapshot: Vec<(Entity, Vec2, bool)> = query
        .iter()
        .map(|(entity, avatar, _, position, _)| {
            let repels = !interaction.is_frozen(AvatarKey::Id(avatar.id()));
            (entity, position.pos, repels)
        })
        .collect();

    let rng = &mut rng.0;
    for (entity, avatar, slot, mut position, mut kin) in query.iter_mut() {
        let held = interaction.is_frozen(AvatarKey::Id(avatar.id()))
            || interaction.hover_index() == Some(slot.0)
            || highlight.is_highlighted(avatar.id());
        if held {
            continue;
        }

        let neighbours = snapshot
            .iter()
            .filter(|(other, _, repels)| *other != entity && *repels)
            .map(|(_, pos, _)| *pos);

        let (pos, velocity) = step(position.pos, kin.velocity, neighbours, &bounds, &config, rng);
        position.pos = pos;
        kin.velocity = velocity;

        if rng.f32() < config.retarget_chance {
            kin.retarget(rng, config.max_tilt_degrees);
        }
    }
}

/// One physics step for a single avatar. Returns the new position and velocity.
pub fn step(
    pos: Vec2,
    velocity: Vec2,
    neighbours: impl IntoIterator<Item = Vec2>,
    bounds: &ContainerBounds,
    config: &ParadiseConfig,
    rng: &mut Rng,
) -> (Vec2, Vec2) {
    let half = config.avatar_size * 0.5;
    let mut v = velocity;
    v += repulsion(
        pos,
        neighbours,
        config.repulsion_distance,
        config.repulsion_strength,
    );
    v += wall_repulsion(
        pos,
        bounds,
        half,
        config.bounds_margin,
        config.wall_repulsion_strength,
    );
    v += random_symmetric(rng, config.random_drift_strength);
    v = limit_speed(v, config.min_velocity, config.max_velocity, rng);
    v *= config.physics_damping;
    integrate_and_reflect(pos, v, bounds, half, config.bounds_margin)
}

/// Sum of pushes away from every neighbour closer than `distance`.
///
/// Neighbours within one pixel are ignored; they would divide by ~0.
pub fn repulsion(
    pos: Vec2,
    neighbours: impl IntoIterator<Item = Vec2>,
    distance: f32,
    strength: f32,
) -> Vec2 {
    let limit_sq = distance * distance;
    let mut push = Vec2::ZERO;
    for other in neighbours {
        let delta = pos - other;
        let dist_sq = delta.length_squared();
        if dist_sq <= 1.0 || dist_sq >= limit_sq {
            continue;
        }
        let dist = dist_sq.sqrt();
        let force = (distance - dist) / dist * strength;
        push += delta * force;
    }
    push
}

/// Push away from each wall the avatar is within `1.5 * margin` of.
///
/// Falls off exponentially with the gap between the avatar's edge and the
/// wall, so it is strong at the edge and negligible in the middle.
pub fn wall_repulsion(
    pos: Vec2,
    bounds: &ContainerBounds,
    half: f32,
    margin: f32,
    strength: f32,
) -> Vec2 {
    let zone = 1.5 * margin;
    let falloff = margin.max(1.0);
    let walls = [
        (pos.x - half, Vec2::X),
        (bounds.w - (pos.x + half), Vec2::NEG_X),
        (pos.y - half, Vec2::Y),
        (bounds.h - (pos.y + half), Vec2::NEG_Y),
    ];
    let mut push = Vec2::ZERO;
    for (gap, away) in walls {
        if gap < zone {
            push += away * strength * (-gap.max(0.0) / falloff).exp();
        }
    }
    push
}

/// Keep speed within `[min, max]` without ever letting an avatar stop.
pub fn limit_speed(v: Vec2, min: f32, max: f32, rng: &mut Rng) -> Vec2 {
    let speed = v.length();
    if speed > max {
        v * (max / speed)
    } else if speed < min {
        if speed < NEAR_ZERO_SPEED {
            random_heading(rng, min)
        } else {
            v * (min / speed)
        }
    } else {
        v
    }
}

/// Move by `v`, clamp into the bounds and bounce on the clamped axes.
pub fn integrate_and_reflect(
    pos: Vec2,
    v: Vec2,
    bounds: &ContainerBounds,
    half: f32,
    margin: f32,
) -> (Vec2, Vec2) {
    let target = pos + v;
    let inset = margin + half;
    let x = clamp(target.x, inset, bounds.w - inset);
    let y = clamp(target.y, inset, bounds.h - inset);
    let mut velocity = v;
    if x != target.x {
        velocity.x *= BOUNCE;
    }
    if y != target.y {
        velocity.y *= BOUNCE;
    }
    (Vec2::new(x, y), velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn bounds() -> ContainerBounds {
        ContainerBounds::new(800.0, 600.0)
    }

    #[test]
    fn repulsion_pushes_away_from_neighbour() {
        let push = repulsion(Vec2::new(100.0, 100.0), [Vec2::new(90.0, 100.0)], 120.0, 0.02);
        assert!(push.x > 0.0);
        assert!(approx_eq(push.y, 0.0));
        // (120 - 10) / 10 * 0.02 * 10
        assert!(approx_eq(push.x, 2.2));
    }

    #[test]
    fn repulsion_ignores_far_and_coincident_neighbours() {
        let pos = Vec2::new(100.0, 100.0);
        let far = repulsion(pos, [Vec2::new(400.0, 100.0)], 120.0, 0.02);
        let same = repulsion(pos, [Vec2::new(100.5, 100.0)], 120.0, 0.02);
        assert_eq!(far, Vec2::ZERO);
        assert_eq!(same, Vec2::ZERO);
        assert!(same.is_finite());
    }

    #[test]
    fn repulsion_is_symmetric() {
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(150.0, 130.0);
        let on_a = repulsion(a, [b], 120.0, 0.02);
        let on_b = repulsion(b, [a], 120.0, 0.02);
        assert!(approx_eq(on_a.x, -on_b.x));
        assert!(approx_eq(on_a.y, -on_b.y));
    }

    #[test]
    fn wall_repulsion_strong_near_edge_zero_in_centre() {
        let b = bounds();
        let near_left = wall_repulsion(Vec2::new(45.0, 300.0), &b, 40.0, 20.0, 0.3);
        let centre = wall_repulsion(Vec2::new(400.0, 300.0), &b, 40.0, 20.0, 0.3);
        assert!(near_left.x > 0.0);
        assert_eq!(centre, Vec2::ZERO);
    }

    #[test]
    fn wall_repulsion_points_inward_on_every_edge() {
        let b = bounds();
        let right = wall_repulsion(Vec2::new(755.0, 300.0), &b, 40.0, 20.0, 0.3);
        let bottom = wall_repulsion(Vec2::new(400.0, 555.0), &b, 40.0, 20.0, 0.3);
        let top = wall_repulsion(Vec2::new(400.0, 45.0), &b, 40.0, 20.0, 0.3);
        assert!(right.x < 0.0);
        assert!(bottom.y < 0.0);
        assert!(top.y > 0.0);
    }

    #[test]
    fn limit_speed_clamps_both_ways() {
        let mut rng = Rng::with_seed(1);
        let fast = limit_speed(Vec2::new(10.0, 0.0), 0.15, 1.2, &mut rng);
        assert!(approx_eq(fast.length(), 1.2));
        let slow = limit_speed(Vec2::new(0.0, 0.05), 0.15, 1.2, &mut rng);
        assert!(approx_eq(slow.length(), 0.15));
        assert!(approx_eq(slow.x, 0.0));
        let stopped = limit_speed(Vec2::ZERO, 0.15, 1.2, &mut rng);
        assert!(approx_eq(stopped.length(), 0.15));
    }

    #[test]
    fn bounce_inverts_and_halves_velocity() {
        let b = bounds();
        let (pos, v) = integrate_and_reflect(
            Vec2::new(61.0, 300.0),
            Vec2::new(-3.0, 0.5),
            &b,
            40.0,
            20.0,
        );
        assert!(approx_eq(pos.x, 60.0));
        assert!(approx_eq(pos.y, 300.5));
        assert!(approx_eq(v.x, 1.5));
        assert!(approx_eq(v.y, 0.5));
    }

    #[test]
    fn step_respects_speed_and_bounds() {
        let config = ParadiseConfig::new();
        let b = bounds();
        let mut rng = Rng::with_seed(9);
        let mut pos = Vec2::new(61.0, 61.0);
        let mut v = Vec2::new(-5.0, -5.0);
        for _ in 0..500 {
            (pos, v) = step(pos, v, [Vec2::new(70.0, 70.0)], &b, &config, &mut rng);
            assert!(v.length() <= config.max_velocity + EPSILON);
            assert!(pos.x >= 60.0 - EPSILON && pos.x <= 740.0 + EPSILON);
            assert!(pos.y >= 60.0 - EPSILON && pos.y <= 540.0 + EPSILON);
        }
    }
}
