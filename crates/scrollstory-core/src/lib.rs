//! Scrollstory Core: shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that every context of
//! the scroll narrative depends on: section identity, the event envelope, and
//! the seams towards the external animation, smooth-scroll and sound
//! collaborators. It contains no infrastructure code.

pub mod aggregate;
pub mod animation;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod rng;
pub mod section;
pub mod sound;
