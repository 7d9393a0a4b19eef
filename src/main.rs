//! Headless driver for the paradise float engine.
//!
//! Runs a roster through a fixed number of frames and prints the frames as
//! JSON lines, one object per line:
//!
//! ```text
//! {"tick":60,"frame":{"transforms":[...],"captions":[...]}}
//! {"tick":75,"caption":{"kind":"shown","index":2,"text":"Woof!"}}
//! {"tick":130,"navigate":"pet-3"}
//! ```
//!
//! Feedback sounds are simulated: every `PlayFx` the engine sends finishes
//! `sound_duration` seconds later unless it was stopped first.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde_json::json;

use paradisefloat::events::audio::AudioCmd;
use paradisefloat::resources::ambient::AmbientTrack;
use paradisefloat::resources::audio::channel_device;
use paradisefloat::resources::navigation::PlaybackId;
use paradisefloat::{Paradise, ParadiseConfig, Profile};

/// Paradise float
#[derive(Parser)]
#[command(version, about = "Headless driver for the floating pet paradise engine.")]
struct Cli {
    /// INI file with tunables (default: ./paradise.ini if present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    save_config: bool,

    /// JSON array of profiles `{id, displayName, imageRef?}`.
    #[arg(long, value_name = "PATH")]
    roster: Option<PathBuf>,

    /// Number of generated profiles when no roster file is given.
    #[arg(long, default_value_t = 8)]
    count: usize,

    #[arg(long, default_value_t = 960.0)]
    width: f32,

    #[arg(long, default_value_t = 640.0)]
    height: f32,

    /// Frames to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// RNG seed, overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Click profile ID at frame TICK. Repeatable.
    #[arg(long = "click", value_name = "ID@TICK", value_parser = parse_click)]
    clicks: Vec<(String, u64)>,

    /// Print every Nth frame (0 prints none).
    #[arg(long, default_value_t = 60)]
    print_every: u64,

    /// Do not start the ambient track; captions then never appear.
    #[arg(long)]
    no_ambient: bool,
}

fn parse_click(raw: &str) -> Result<(String, u64), String> {
    let (id, tick) = raw
        .rsplit_once('@')
        .ok_or_else(|| format!("expected ID@TICK, got '{}'", raw))?;
    let tick = tick
        .parse::<u64>()
        .map_err(|e| format!("bad tick in '{}': {}", raw, e))?;
    if id.is_empty() {
        return Err(format!("empty id in '{}'", raw));
    }
    Ok((id.to_string(), tick))
}

fn load_roster(path: &PathBuf) -> Result<Vec<Profile>, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read roster {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("bad roster {}: {}", path.display(), e))
}

fn generated_roster(count: usize) -> Vec<Profile> {
    (1..=count)
        .map(|i| Profile::new(format!("pet-{i}"), format!("Pet {i}")))
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ParadiseConfig::with_path(path),
        None => ParadiseConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        // defaults are fine when there is no file
        if cli.config.is_some() {
            warn!("{}", e);
        }
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("config written to {}", config.config_path.display());
        return;
    }

    let profiles = match &cli.roster {
        Some(path) => match load_roster(path) {
            Ok(profiles) => profiles,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => generated_roster(cli.count),
    };

    let fps = cli.fps.max(1.0);
    let dt = 1.0 / fps;
    let sound_ticks = (config.sound_duration * fps).round().max(1.0) as u64;

    let now = Rc::new(RefCell::new(0u64));
    let navigator_now = Rc::clone(&now);
    let (device, rx_cmd) = channel_device();
    let track = AmbientTrack::new();

    let mut paradise = Paradise::new(config)
        .with_sound_device(device)
        .with_ambient(track)
        .with_navigator(move |id: &str| -> Result<(), String> {
            println!("{}", json!({ "tick": *navigator_now.borrow(), "navigate": id }));
            Ok(())
        });
    paradise.set_profiles(profiles);
    paradise.set_bounds(cli.width, cli.height);
    if !cli.no_ambient && !paradise.start_ambient() {
        warn!("ambient track already playing elsewhere");
    }

    info!(
        "simulating {} avatars for {} frames at {} fps",
        paradise.avatar_count(),
        cli.ticks,
        fps
    );

    // playback -> frame it ends on
    let mut playing: FxHashMap<PlaybackId, u64> = FxHashMap::default();

    for tick in 1..=cli.ticks {
        *now.borrow_mut() = tick;

        for (id, _) in cli.clicks.iter().filter(|(_, at)| *at == tick) {
            info!("scripted click on '{}'", id);
            paradise.click(id);
        }

        let frame = paradise.tick(dt);

        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::PlayFx { playback, .. } => {
                    playing.insert(playback, tick + sound_ticks);
                }
                AudioCmd::StopFx { playback } => {
                    playing.remove(&playback);
                }
            }
        }
        let finished: Vec<PlaybackId> = playing
            .iter()
            .filter(|(_, end)| **end <= tick)
            .map(|(playback, _)| *playback)
            .collect();
        for playback in finished {
            playing.remove(&playback);
            paradise.sound_finished(playback);
        }

        for caption in paradise.drain_caption_events() {
            println!("{}", json!({ "tick": tick, "caption": caption }));
        }
        if cli.print_every > 0 && tick % cli.print_every == 0 {
            println!("{}", json!({ "tick": tick, "frame": frame }));
        }
    }

    paradise.teardown();
}
