//! Roster synchronisation.
//!
//! [`sync_roster`] reconciles the spawned avatars with a new profile list.
//! Identity is the profile id: a profile that was already on screen keeps
//! its entity, position and velocity, whatever its new slot. Profiles that
//! left are despawned and new ones are spawned with fresh kinematics.
//!
//! Slots are rewritten from scratch every time, then a
//! [`RosterChangedEvent`] lets the interaction, navigation, caption and
//! highlight observers drop whatever pointed at the old layout.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::avatar::{Avatar, Profile, Slot};
use crate::components::caption::Caption;
use crate::components::kinematics::Kinematics;
use crate::components::mapposition::MapPosition;
use crate::components::pose::Pose;
use crate::events::lifecycle::RosterChangedEvent;
use crate::math::{clamp, random_in_range};
use crate::resources::containerbounds::ContainerBounds;
use crate::resources::highlight::Highlight;
use crate::resources::paradiseconfig::ParadiseConfig;
use crate::resources::rng::ParadiseRng;

/// Columns used to lay avatars out before the container is measured.
const GRID_COLUMNS: usize = 5;

/// Resting position for `slot` while the container size is unknown.
pub fn default_position(slot: usize, config: &ParadiseConfig) -> Vec2 {
    let pitch = config.avatar_size + config.bounds_margin;
    let origin = config.bounds_margin + config.avatar_size * 0.5;
    let col = (slot % GRID_COLUMNS) as f32;
    let row = (slot / GRID_COLUMNS) as f32;
    Vec2::new(origin + col * pitch, origin + row * pitch)
}

/// Uniform random position fully inside the padded container.
fn random_position(
    rng: &mut fastrand::Rng,
    bounds: &ContainerBounds,
    config: &ParadiseConfig,
) -> Vec2 {
    let inset = config.bounds_margin + config.avatar_size * 0.5;
    let x = if bounds.w > 2.0 * inset {
        random_in_range(rng, inset, bounds.w - inset)
    } else {
        bounds.w * 0.5
    };
    let y = if bounds.h > 2.0 * inset {
        random_in_range(rng, inset, bounds.h - inset)
    } else {
        bounds.h * 0.5
    };
    Vec2::new(x, y)
}

/// Drop duplicate ids, keeping the first occurrence.
fn dedupe(profiles: Vec<Profile>) -> Vec<Profile> {
    let mut seen = FxHashSet::default();
    profiles
        .into_iter()
        .filter(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                warn!("duplicate profile id '{}' dropped from roster", p.id);
            }
            fresh
        })
        .collect()
}

/// Reconcile the avatars with `profiles`.
///
/// Returns true when the roster changed shape (membership or order). A
/// list with the same ids in the same order only refreshes the profile
/// data and does not disturb captions or interaction.
pub fn sync_roster(world: &mut World, profiles: Vec<Profile>) -> bool {
    let profiles = dedupe(profiles);

    let mut query = world.query::<(Entity, &Avatar, &Slot)>();
    let mut current: Vec<(usize, String, Entity)> = query
        .iter(world)
        .map(|(entity, avatar, slot)| (slot.0, avatar.id().to_string(), entity))
        .collect();
    current.sort_by_key(|(slot, _, _)| *slot);

    let unchanged = current.len() == profiles.len()
        && current
            .iter()
            .zip(&profiles)
            .all(|((_, id, _), profile)| *id == profile.id);
    if unchanged {
        for ((_, _, entity), profile) in current.iter().zip(profiles) {
            if let Some(mut avatar) = world.get_mut::<Avatar>(*entity) {
                avatar.profile = profile;
            }
        }
        return false;
    }

    let mut by_id: FxHashMap<String, Entity> = current
        .into_iter()
        .map(|(_, id, entity)| (id, entity))
        .collect();

    let config = world.resource::<ParadiseConfig>().clone();
    let bounds = *world.resource::<ContainerBounds>();

    let mut spawned = 0usize;
    let mut kept = 0usize;
    for (index, profile) in profiles.into_iter().enumerate() {
        if let Some(entity) = by_id.remove(&profile.id) {
            world
                .entity_mut(entity)
                .insert((Avatar { profile }, Slot(index)));
            kept += 1;
            continue;
        }
        let (pos, kin) = {
            let mut rng = world.resource_mut::<ParadiseRng>();
            let pos = if bounds.is_measured() {
                random_position(&mut rng.0, &bounds, &config)
            } else {
                default_position(index, &config)
            };
            let kin = Kinematics::random(
                &mut rng.0,
                config.min_velocity,
                config.max_velocity,
                config.max_tilt_degrees,
            );
            (pos, kin)
        };
        world.spawn((
            Avatar { profile },
            Slot(index),
            MapPosition { pos },
            kin,
            Pose::default(),
            Caption::default(),
        ));
        spawned += 1;
    }

    let removed = by_id.len();
    for (id, entity) in by_id {
        debug!("avatar '{}' left the roster", id);
        world.despawn(entity);
    }

    info!(
        "roster updated: {} kept, {} spawned, {} removed",
        kept, spawned, removed
    );
    world.trigger(RosterChangedEvent);
    world.flush();
    true
}

/// Place every avatar at a random spot inside the container.
///
/// Used when the container is measured for the first time; until then the
/// avatars sit on the default grid.
pub fn scatter_avatars(world: &mut World) {
    let config = world.resource::<ParadiseConfig>().clone();
    let bounds = *world.resource::<ContainerBounds>();
    if !bounds.is_measured() {
        return;
    }
    let mut query = world.query::<(Entity, &Avatar)>();
    let entities: Vec<Entity> = query.iter(world).map(|(entity, _)| entity).collect();
    for entity in entities {
        let pos = {
            let mut rng = world.resource_mut::<ParadiseRng>();
            random_position(&mut rng.0, &bounds, &config)
        };
        if let Some(mut position) = world.get_mut::<MapPosition>(entity) {
            position.pos = pos;
        }
    }
    debug!("scattered avatars across {}x{}", bounds.w, bounds.h);
}

/// Pull every avatar back inside the padded container after a resize.
///
/// Covers the held ones too (hovered, highlighted, pending), which physics
/// does not move.
pub fn clamp_avatars(world: &mut World) {
    let config = world.resource::<ParadiseConfig>().clone();
    let bounds = *world.resource::<ContainerBounds>();
    if !bounds.is_measured() {
        return;
    }
    let inset = config.bounds_margin + config.avatar_size * 0.5;
    let mut query = world.query_filtered::<&mut MapPosition, With<Avatar>>();
    for mut position in query.iter_mut(world) {
        let x = clamp(position.pos.x, inset, bounds.w - inset);
        let y = clamp(position.pos.y, inset, bounds.h - inset);
        if x != position.pos.x || y != position.pos.y {
            position.pos = Vec2::new(x, y);
        }
    }
}

/// Forget a highlight whose avatar is no longer on screen.
pub fn highlight_roster_observer(
    _trigger: On<RosterChangedEvent>,
    mut highlight: ResMut<Highlight>,
    roster: Query<&Avatar>,
) {
    let Some(id) = highlight.id() else {
        return;
    };
    if !roster.iter().any(|avatar| avatar.id() == id) {
        if let Some(id) = highlight.clear() {
            debug!("highlight on '{}' dropped with its avatar", id);
        }
    }
}
