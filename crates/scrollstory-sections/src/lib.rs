//! Scrollstory: Sections bounded context.
//!
//! Owns everything about a section that is fixed at initialization: the
//! authored page content, the word tokens each caption is split into and the
//! scroll offset each section snaps to.

pub mod content;
pub mod registry;
pub mod splitter;
