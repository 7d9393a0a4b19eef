//! ECS resources made available to systems.
//!
//! Overview
//! - `ambient` – shared ambient track handle and the per-view cue clock
//! - `audio` – sound device seam and its channel implementation
//! - `comicbox` – caption message pool and in-use set
//! - `containerbounds` – measured container size
//! - `highlight` – temporary highlight requested by the host
//! - `interaction` – hover index and the pending-navigation lock
//! - `navigation` – listeners and fallback timer of an armed click
//! - `paradiseconfig` – tunables, loadable from an INI file
//! - `rng` – seeded random source
//! - `soundlibrary` – which feedback sound a click plays
//! - `visibility` – whether the document is visible
//! - `worldtime` – simulation time and delta
pub mod ambient;
pub mod audio;
pub mod comicbox;
pub mod containerbounds;
pub mod highlight;
pub mod interaction;
pub mod navigation;
pub mod paradiseconfig;
pub mod rng;
pub mod soundlibrary;
pub mod visibility;
pub mod worldtime;
