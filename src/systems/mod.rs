//! Engine systems and observers.
//!
//! Submodules overview
//! - [`ambient`] – turn ambient track time into comic-box cues
//! - [`comicbox`] – show captions on cue, hide them when their timer ends
//! - [`highlight`] – expire the host-requested highlight
//! - [`interaction`] – hover and unhover observers
//! - [`navigation`] – click, sound completion and fallback timer
//! - [`physics`] – repulsion, drift, speed limits and wall bounce
//! - [`pose`] – ease each avatar's visible pose
//! - [`render`] – assemble the frame handed to the renderer
//! - [`roster`] – reconcile avatars with a new profile list

pub mod ambient;
pub mod comicbox;
pub mod highlight;
pub mod interaction;
pub mod navigation;
pub mod physics;
pub mod pose;
pub mod render;
pub mod roster;
