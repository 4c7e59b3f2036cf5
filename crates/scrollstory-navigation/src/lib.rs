//! Scrollstory: Navigation bounded context.
//!
//! Responsible for turning scroll progress and clicks into serialized,
//! single-step section transitions, and for keeping the forced scroll
//! position in step with the section being shown.

pub mod application;
pub mod domain;
