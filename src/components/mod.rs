//! ECS components attached to avatar entities.
//!
//! Every profile on screen is one entity carrying all of these.
//!
//! Submodules overview:
//! - [`avatar`] – the profile behind the entity and its roster slot
//! - [`caption`] – comic-box caption state with its cancellable hide timer
//! - [`kinematics`] – velocity and resting scale/rotation targets
//! - [`mapposition`] – avatar centre in container pixels
//! - [`pose`] – eased scale, rotation, opacity and stacking order
//! - [`timer`] – the one-shot countdown every timer in the engine uses

pub mod avatar;
pub mod caption;
pub mod kinematics;
pub mod mapposition;
pub mod pose;
pub mod timer;
