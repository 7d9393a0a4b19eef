//! Paradise float engine.
//!
//! Drives the floating pet-memorial "paradise" view: avatar physics, hover
//! and click handling, the click → sound → navigate sequence, and the
//! comic-box captions. Rendering and audio playback stay with the host; see
//! [`paradise::Paradise`] for the entry point.
//!
//! The ECS pieces are public so integration tests can drive the systems
//! directly.

pub mod components;
pub mod events;
pub mod math;
pub mod paradise;
pub mod resources;
pub mod systems;

pub use components::avatar::Profile;
pub use paradise::Paradise;
pub use resources::paradiseconfig::ParadiseConfig;
