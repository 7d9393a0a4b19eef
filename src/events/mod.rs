//! Event and message types.
//!
//! Events (`#[derive(Event)]`) are triggered into observers and handled
//! synchronously. Messages (`#[derive(Message)]`) are queued by systems and
//! observers and drained by the [`Paradise`](crate::paradise::Paradise)
//! facade after every call.
//!
//! Submodules:
//! - [`ambient`] – periodic cue that drives the comic-box captions
//! - [`audio`] – commands to the sound device and completion events back
//! - [`caption`] – caption shown/hidden notifications for the renderer
//! - [`input`] – hover, unhover and click
//! - [`lifecycle`] – roster change and view teardown
//! - [`navigation`] – outbound navigation requests
pub mod ambient;
pub mod audio;
pub mod caption;
pub mod input;
pub mod lifecycle;
pub mod navigation;
