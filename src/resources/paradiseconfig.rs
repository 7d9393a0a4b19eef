//! Paradise configuration resource.
//!
//! Every tunable of the floating display lives in [`ParadiseConfig`]. The
//! defaults are the values the display ships with; an INI file can override
//! any subset of them.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! repulsion_distance = 120
//! repulsion_strength = 0.02
//! wall_repulsion_strength = 0.3
//! bounds_margin = 20
//! random_drift_strength = 0.03
//! max_velocity = 1.2
//! min_velocity = 0.15
//! damping = 0.98
//! avatar_size = 80
//! retarget_chance = 0.004
//!
//! [pose]
//! max_tilt_degrees = 6
//! easing = 0.12
//! hover_scale = 1.2
//! selected_scale = 0.92
//! selected_opacity = 0.6
//! highlight_duration = 3
//!
//! [navigation]
//! sound_duration = 1.0
//! timeout_buffer = 0.5
//!
//! [comic]
//! duration = 4
//! max_simultaneous = 3
//! messages = Woof!|I'm okay up here|Treats for everyone
//!
//! [ambient]
//! cue_interval = 8
//!
//! [random]
//! seed = 42
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_REPULSION_DISTANCE: f32 = 120.0;
const DEFAULT_REPULSION_STRENGTH: f32 = 0.02;
const DEFAULT_WALL_REPULSION_STRENGTH: f32 = 0.3;
const DEFAULT_BOUNDS_MARGIN: f32 = 20.0;
const DEFAULT_RANDOM_DRIFT_STRENGTH: f32 = 0.03;
const DEFAULT_MAX_VELOCITY: f32 = 1.2;
const DEFAULT_MIN_VELOCITY: f32 = 0.15;
const DEFAULT_PHYSICS_DAMPING: f32 = 0.98;
const DEFAULT_AVATAR_SIZE: f32 = 80.0;
const DEFAULT_RETARGET_CHANCE: f32 = 0.004;
const DEFAULT_MAX_TILT_DEGREES: f32 = 6.0;
const DEFAULT_POSE_EASING: f32 = 0.12;
const DEFAULT_HOVER_SCALE: f32 = 1.2;
const DEFAULT_SELECTED_SCALE: f32 = 0.92;
const DEFAULT_SELECTED_OPACITY: f32 = 0.6;
const DEFAULT_HIGHLIGHT_DURATION: f32 = 3.0;
const DEFAULT_SOUND_DURATION: f32 = 1.0;
const DEFAULT_NAVIGATION_TIMEOUT_BUFFER: f32 = 0.5;
/// Feedback sound played on click.
const DEFAULT_CLICK_FX: &str = "paw-click";
const DEFAULT_COMIC_BOX_DURATION: f32 = 4.0;
const DEFAULT_MAX_SIMULTANEOUS_COMIC_BOXES: usize = 3;
const DEFAULT_AMBIENT_CUE_INTERVAL: f32 = 8.0;
const DEFAULT_CONFIG_PATH: &str = "./paradise.ini";

const DEFAULT_COMIC_MESSAGES: [&str; 12] = [
    "Woof!",
    "I'm okay up here",
    "Treats for everyone!",
    "I still remember our walks",
    "Sunbeams all day long",
    "Thank you for loving me",
    "Meow.",
    "Chasing clouds again",
    "Save me a spot on the couch",
    "Every day is a good day",
    "Belly rubs, please",
    "I'll be waiting",
];

/// Stacking order for avatars that are not interacted with is their slot
/// plus this base.
pub const BASE_Z_INDEX: i32 = 1;
/// Stacking order of a hovered or highlighted avatar.
pub const HOVER_Z_INDEX: i32 = 1_000;
/// Stacking order of the avatar pending navigation.
pub const SELECTED_Z_INDEX: i32 = 1_001;

/// Tunables for physics, pose, navigation and captions.
///
/// Distances are in container pixels, velocities in pixels per tick,
/// durations in seconds.
#[derive(Resource, Debug, Clone)]
pub struct ParadiseConfig {
    /// Avatars closer than this push each other apart.
    pub repulsion_distance: f32,
    pub repulsion_strength: f32,
    pub wall_repulsion_strength: f32,
    /// Gap kept between an avatar's edge and the container edge.
    pub bounds_margin: f32,
    pub random_drift_strength: f32,
    pub max_velocity: f32,
    pub min_velocity: f32,
    /// Per-tick velocity multiplier, below 1.
    pub physics_damping: f32,
    /// Rendered avatar diameter.
    pub avatar_size: f32,
    /// Per-tick probability that a free avatar picks new scale/rotation targets.
    pub retarget_chance: f32,
    pub max_tilt_degrees: f32,
    /// Fraction of the remaining distance the pose closes each frame.
    pub pose_easing: f32,
    pub hover_scale: f32,
    pub selected_scale: f32,
    pub selected_opacity: f32,
    pub highlight_duration: f32,
    /// Expected length of the click feedback sound.
    pub sound_duration: f32,
    /// Extra time granted to the sound before the fallback timer navigates.
    pub navigation_timeout_buffer: f32,
    /// Feedback sound for clicks; empty disables it.
    pub click_fx: String,
    pub comic_box_duration: f32,
    pub max_simultaneous_comic_boxes: usize,
    pub comic_messages: Vec<String>,
    pub ambient_cue_interval: f32,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ParadiseConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParadiseConfig {
    /// Create a new configuration with the shipped default values.
    pub fn new() -> Self {
        Self {
            repulsion_distance: DEFAULT_REPULSION_DISTANCE,
            repulsion_strength: DEFAULT_REPULSION_STRENGTH,
            wall_repulsion_strength: DEFAULT_WALL_REPULSION_STRENGTH,
            bounds_margin: DEFAULT_BOUNDS_MARGIN,
            random_drift_strength: DEFAULT_RANDOM_DRIFT_STRENGTH,
            max_velocity: DEFAULT_MAX_VELOCITY,
            min_velocity: DEFAULT_MIN_VELOCITY,
            physics_damping: DEFAULT_PHYSICS_DAMPING,
            avatar_size: DEFAULT_AVATAR_SIZE,
            retarget_chance: DEFAULT_RETARGET_CHANCE,
            max_tilt_degrees: DEFAULT_MAX_TILT_DEGREES,
            pose_easing: DEFAULT_POSE_EASING,
            hover_scale: DEFAULT_HOVER_SCALE,
            selected_scale: DEFAULT_SELECTED_SCALE,
            selected_opacity: DEFAULT_SELECTED_OPACITY,
            highlight_duration: DEFAULT_HIGHLIGHT_DURATION,
            sound_duration: DEFAULT_SOUND_DURATION,
            navigation_timeout_buffer: DEFAULT_NAVIGATION_TIMEOUT_BUFFER,
            click_fx: DEFAULT_CLICK_FX.to_string(),
            comic_box_duration: DEFAULT_COMIC_BOX_DURATION,
            max_simultaneous_comic_boxes: DEFAULT_MAX_SIMULTANEOUS_COMIC_BOXES,
            comic_messages: DEFAULT_COMIC_MESSAGES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            ambient_cue_interval: DEFAULT_AMBIENT_CUE_INTERVAL,
            seed: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Same configuration with a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Time the navigation coordinator waits before navigating without a
    /// completion signal from the sound.
    pub fn navigation_timeout(&self) -> f32 {
        self.sound_duration + self.navigation_timeout_buffer
    }

    /// Most captions allowed on screen for `avatar_count` avatars.
    pub fn caption_cap(&self, avatar_count: usize) -> usize {
        self.max_simultaneous_comic_boxes
            .min(avatar_count.div_ceil(2))
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        let float = |section: &str, key: &str| -> Option<f32> {
            config.getfloat(section, key).ok().flatten().map(|v| v as f32)
        };

        // [physics] section
        if let Some(v) = float("physics", "repulsion_distance") {
            self.repulsion_distance = v;
        }
        if let Some(v) = float("physics", "repulsion_strength") {
            self.repulsion_strength = v;
        }
        if let Some(v) = float("physics", "wall_repulsion_strength") {
            self.wall_repulsion_strength = v;
        }
        if let Some(v) = float("physics", "bounds_margin") {
            self.bounds_margin = v;
        }
        if let Some(v) = float("physics", "random_drift_strength") {
            self.random_drift_strength = v;
        }
        if let Some(v) = float("physics", "max_velocity") {
            self.max_velocity = v;
        }
        if let Some(v) = float("physics", "min_velocity") {
            self.min_velocity = v;
        }
        if let Some(v) = float("physics", "damping") {
            self.physics_damping = v;
        }
        if let Some(v) = float("physics", "avatar_size") {
            self.avatar_size = v;
        }
        if let Some(v) = float("physics", "retarget_chance") {
            self.retarget_chance = v;
        }

        // [pose] section
        if let Some(v) = float("pose", "max_tilt_degrees") {
            self.max_tilt_degrees = v;
        }
        if let Some(v) = float("pose", "easing") {
            self.pose_easing = v;
        }
        if let Some(v) = float("pose", "hover_scale") {
            self.hover_scale = v;
        }
        if let Some(v) = float("pose", "selected_scale") {
            self.selected_scale = v;
        }
        if let Some(v) = float("pose", "selected_opacity") {
            self.selected_opacity = v;
        }
        if let Some(v) = float("pose", "highlight_duration") {
            self.highlight_duration = v;
        }

        // [navigation] section
        if let Some(v) = float("navigation", "sound_duration") {
            self.sound_duration = v;
        }
        if let Some(v) = float("navigation", "timeout_buffer") {
            self.navigation_timeout_buffer = v;
        }
        if let Some(v) = config.get("navigation", "click_fx") {
            self.click_fx = v.trim().to_string();
        }

        // [comic] section
        if let Some(v) = float("comic", "duration") {
            self.comic_box_duration = v;
        }
        if let Some(v) = config.getuint("comic", "max_simultaneous").ok().flatten() {
            self.max_simultaneous_comic_boxes = v as usize;
        }
        if let Some(messages) = config.get("comic", "messages") {
            let parsed: Vec<String> = messages
                .split('|')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
            if !parsed.is_empty() {
                self.comic_messages = parsed;
            }
        }

        // [ambient] section
        if let Some(v) = float("ambient", "cue_interval") {
            self.ambient_cue_interval = v;
        }

        // [random] section
        if let Some(v) = config.getuint("random", "seed").ok().flatten() {
            self.seed = Some(v);
        }

        info!(
            "Loaded config: repulsion={}@{}, velocity={}..{}, damping={}, sound={}s+{}s, comic={}x{}s, {} messages",
            self.repulsion_distance,
            self.repulsion_strength,
            self.min_velocity,
            self.max_velocity,
            self.physics_damping,
            self.sound_duration,
            self.navigation_timeout_buffer,
            self.max_simultaneous_comic_boxes,
            self.comic_box_duration,
            self.comic_messages.len()
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        // [physics] section
        set("physics", "repulsion_distance", self.repulsion_distance.to_string());
        set("physics", "repulsion_strength", self.repulsion_strength.to_string());
        set(
            "physics",
            "wall_repulsion_strength",
            self.wall_repulsion_strength.to_string(),
        );
        set("physics", "bounds_margin", self.bounds_margin.to_string());
        set(
            "physics",
            "random_drift_strength",
            self.random_drift_strength.to_string(),
        );
        set("physics", "max_velocity", self.max_velocity.to_string());
        set("physics", "min_velocity", self.min_velocity.to_string());
        set("physics", "damping", self.physics_damping.to_string());
        set("physics", "avatar_size", self.avatar_size.to_string());
        set("physics", "retarget_chance", self.retarget_chance.to_string());

        // [pose] section
        set("pose", "max_tilt_degrees", self.max_tilt_degrees.to_string());
        set("pose", "easing", self.pose_easing.to_string());
        set("pose", "hover_scale", self.hover_scale.to_string());
        set("pose", "selected_scale", self.selected_scale.to_string());
        set("pose", "selected_opacity", self.selected_opacity.to_string());
        set("pose", "highlight_duration", self.highlight_duration.to_string());

        // [navigation] section
        set("navigation", "sound_duration", self.sound_duration.to_string());
        set(
            "navigation",
            "timeout_buffer",
            self.navigation_timeout_buffer.to_string(),
        );
        set("navigation", "click_fx", self.click_fx.clone());

        // [comic] section
        set("comic", "duration", self.comic_box_duration.to_string());
        set(
            "comic",
            "max_simultaneous",
            self.max_simultaneous_comic_boxes.to_string(),
        );
        set("comic", "messages", self.comic_messages.join("|"));

        // [ambient] section
        set("ambient", "cue_interval", self.ambient_cue_interval.to_string());

        if let Some(seed) = self.seed {
            set("random", "seed", seed.to_string());
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
