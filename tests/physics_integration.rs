//! Physics and pose systems driven through a plain `World` + `Schedule`.

use bevy_ecs::prelude::*;
use glam::Vec2;

use paradisefloat::components::avatar::{Avatar, Profile, Slot};
use paradisefloat::components::caption::Caption;
use paradisefloat::components::kinematics::Kinematics;
use paradisefloat::components::mapposition::MapPosition;
use paradisefloat::components::pose::Pose;
use paradisefloat::resources::containerbounds::ContainerBounds;
use paradisefloat::resources::highlight::Highlight;
use paradisefloat::resources::interaction::InteractionState;
use paradisefloat::resources::paradiseconfig::{
    HOVER_Z_INDEX, ParadiseConfig, SELECTED_Z_INDEX,
};
use paradisefloat::resources::rng::ParadiseRng;
use paradisefloat::resources::visibility::DocumentVisibility;
use paradisefloat::systems::physics::{physics_active, physics_system};
use paradisefloat::systems::pose::{document_visible, pose_system};

const EPSILON: f32 = 1e-4;

fn make_world(w: f32, h: f32) -> World {
    let mut world = World::new();
    world.insert_resource(ParadiseConfig::new().with_seed(7));
    world.insert_resource(ParadiseRng::new(Some(7)));
    world.insert_resource(ContainerBounds::new(w, h));
    world.insert_resource(DocumentVisibility::default());
    world.insert_resource(InteractionState::default());
    world.insert_resource(Highlight::default());
    world
}

fn spawn_avatar(world: &mut World, slot: usize, pos: Vec2, velocity: Vec2) -> Entity {
    world
        .spawn((
            Avatar {
                profile: Profile::new(format!("pet-{slot}"), format!("Pet {slot}")),
            },
            Slot(slot),
            MapPosition { pos },
            Kinematics {
                velocity,
                ..Kinematics::default()
            },
            Pose::default(),
            Caption::default(),
        ))
        .id()
}

fn spawn_grid(world: &mut World, count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| {
            let pos = Vec2::new(100.0 + (i % 6) as f32 * 100.0, 100.0 + (i / 6) as f32 * 80.0);
            spawn_avatar(world, i, pos, Vec2::new(0.7, -0.4))
        })
        .collect()
}

fn physics_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(physics_system.run_if(physics_active));
    schedule
}

fn run_frames(world: &mut World, schedule: &mut Schedule, frames: usize) {
    for _ in 0..frames {
        schedule.run(world);
    }
}

fn position(world: &World, entity: Entity) -> Vec2 {
    world.get::<MapPosition>(entity).unwrap().pos
}

fn spawn_scattered(world: &mut World, count: usize, w: f32, h: f32) -> Vec<Entity> {
    let mut rng = fastrand::Rng::with_seed(count as u64);
    (0..count)
        .map(|i| {
            let pos = Vec2::new(rng.f32() * w, rng.f32() * h);
            let velocity = Vec2::new(rng.f32() * 4.0 - 2.0, rng.f32() * 4.0 - 2.0);
            spawn_avatar(world, i, pos, velocity)
        })
        .collect()
}

/// Run `ticks` frames and check every avatar stays finite, padded inside the
/// container and under the speed limit after each one.
fn assert_bounded(count: usize, w: f32, h: f32, ticks: usize) {
    let mut world = make_world(w, h);
    let entities = spawn_scattered(&mut world, count, w, h);
    let mut schedule = physics_schedule();
    let config = world.resource::<ParadiseConfig>().clone();
    let inset = config.bounds_margin + config.avatar_size * 0.5;

    for tick in 0..ticks {
        schedule.run(&mut world);
        for entity in &entities {
            let pos = position(&world, *entity);
            let kin = world.get::<Kinematics>(*entity).unwrap();
            assert!(pos.is_finite(), "{count} avatars, tick {tick}");
            assert!(kin.velocity.is_finite(), "{count} avatars, tick {tick}");
            assert!(kin.speed() <= config.max_velocity + EPSILON);
            assert!(pos.x >= inset - EPSILON && pos.x <= w - inset + EPSILON);
            assert!(pos.y >= inset - EPSILON && pos.y <= h - inset + EPSILON);
        }
    }
}

#[test]
fn avatars_stay_inside_bounds_and_under_max_speed() {
    assert_bounded(30, 800.0, 600.0, 10_000);
}

#[test]
fn lone_avatar_stays_inside_bounds() {
    assert_bounded(1, 800.0, 600.0, 10_000);
}

#[test]
fn crowded_container_stays_bounded() {
    // 100 avatars of 80px in a 640x480 box overlap heavily
    assert_bounded(100, 640.0, 480.0, 10_000);
}

#[test]
fn avatars_keep_moving() {
    let mut world = make_world(800.0, 600.0);
    let entities = spawn_grid(&mut world, 5);
    let mut schedule = physics_schedule();
    let config = world.resource::<ParadiseConfig>().clone();

    run_frames(&mut world, &mut schedule, 200);
    for entity in &entities {
        let kin = world.get::<Kinematics>(*entity).unwrap();
        // min speed, damped once, halved by at most one bounce per axis
        assert!(kin.speed() >= config.min_velocity * config.physics_damping * 0.5 - EPSILON);
    }
}

#[test]
fn hidden_document_freezes_positions() {
    let mut world = make_world(800.0, 600.0);
    let entities = spawn_grid(&mut world, 4);
    let before: Vec<Vec2> = entities.iter().map(|e| position(&world, *e)).collect();

    world.resource_mut::<DocumentVisibility>().0 = false;
    let mut schedule = physics_schedule();
    run_frames(&mut world, &mut schedule, 100);

    let after: Vec<Vec2> = entities.iter().map(|e| position(&world, *e)).collect();
    assert_eq!(before, after);
}

#[test]
fn unmeasured_container_is_inert() {
    let mut world = make_world(0.0, 0.0);
    let entity = spawn_avatar(&mut world, 0, Vec2::new(60.0, 60.0), Vec2::new(1.0, 1.0));
    let mut schedule = physics_schedule();
    run_frames(&mut world, &mut schedule, 50);
    assert_eq!(position(&world, entity), Vec2::new(60.0, 60.0));
}

#[test]
fn pending_hovered_and_highlighted_avatars_hold_still() {
    let mut world = make_world(800.0, 600.0);
    let entities = spawn_grid(&mut world, 4);
    world
        .resource_mut::<InteractionState>()
        .begin_pending_navigation("pet-0", 0);
    // hover is refused while a navigation is pending
    assert!(!world.resource_mut::<InteractionState>().hover(1));
    world.resource_mut::<Highlight>().start("pet-2", 10.0);

    let before: Vec<Vec2> = entities.iter().map(|e| position(&world, *e)).collect();
    let mut schedule = physics_schedule();
    run_frames(&mut world, &mut schedule, 60);
    let after: Vec<Vec2> = entities.iter().map(|e| position(&world, *e)).collect();

    assert_eq!(before[0], after[0]);
    assert_eq!(before[2], after[2]);
    assert_ne!(before[1], after[1]);
    assert_ne!(before[3], after[3]);
}

#[test]
fn hovered_avatar_holds_still() {
    let mut world = make_world(800.0, 600.0);
    let entities = spawn_grid(&mut world, 3);
    assert!(world.resource_mut::<InteractionState>().hover(1));

    let before = position(&world, entities[1]);
    let mut schedule = physics_schedule();
    run_frames(&mut world, &mut schedule, 60);
    assert_eq!(position(&world, entities[1]), before);
    assert_ne!(position(&world, entities[0]), Vec2::new(100.0, 100.0));
}

#[test]
fn pending_avatar_does_not_repel() {
    let mut world = make_world(800.0, 600.0);
    let pinned = spawn_avatar(&mut world, 0, Vec2::new(400.0, 300.0), Vec2::ZERO);
    let free = spawn_avatar(&mut world, 1, Vec2::new(420.0, 300.0), Vec2::ZERO);
    world
        .resource_mut::<InteractionState>()
        .begin_pending_navigation("pet-0", 0);

    let mut schedule = physics_schedule();
    schedule.run(&mut world);

    assert_eq!(position(&world, pinned), Vec2::new(400.0, 300.0));
    let kin = world.get::<Kinematics>(free).unwrap();
    // only drift and the minimum-speed kick, no 2+ px/frame shove
    assert!(kin.speed() <= 0.2);
}

#[test]
fn pose_pins_selected_look_and_lifts_hovered() {
    let mut world = make_world(800.0, 600.0);
    let entities = spawn_grid(&mut world, 3);
    world.resource_mut::<InteractionState>().hover(2);
    world
        .resource_mut::<InteractionState>()
        .begin_pending_navigation("pet-0", 0);
    // begin_pending clears the hover; hover is refused while pending
    assert_eq!(world.resource::<InteractionState>().hover_index(), None);
    world.resource_mut::<Highlight>().start("pet-1", 10.0);

    let mut schedule = Schedule::default();
    schedule.add_systems(pose_system.run_if(document_visible));
    run_frames(&mut world, &mut schedule, 120);

    let config = world.resource::<ParadiseConfig>().clone();
    let selected = world.get::<Pose>(entities[0]).unwrap();
    assert!((selected.scale - config.selected_scale).abs() < EPSILON);
    assert!((selected.opacity - config.selected_opacity).abs() < EPSILON);
    assert_eq!(selected.z_index, SELECTED_Z_INDEX);

    let lifted = world.get::<Pose>(entities[1]).unwrap();
    assert!((lifted.scale - config.hover_scale).abs() < 1e-3);
    assert_eq!(lifted.z_index, HOVER_Z_INDEX);

    let resting = world.get::<Pose>(entities[2]).unwrap();
    assert_eq!(resting.z_index, 3);
}
