//! Input surface of the page.

use scrollstory_core::animation::ListSide;
use serde::{Deserialize, Serialize};

/// A list item addressed by column and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    /// Column the item sits in.
    pub side: ListSide,
    /// Position in the column, which is also the section it stands for.
    pub index: usize,
}

/// One user or scroll-source input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageInput {
    /// A frame of progress through the pinned region.
    Scroll {
        /// Progress in `[0, 1]`.
        progress: f64,
    },
    /// A frame of progress through the trailing end region.
    EndScroll {
        /// Progress in `[0, 1]`.
        progress: f64,
    },
    /// A click, optionally on a list item.
    Click {
        /// Item under the pointer.
        #[serde(default)]
        item: Option<ItemRef>,
    },
    /// The pointer entered a list item.
    Hover {
        /// Item under the pointer.
        item: ItemRef,
    },
    /// A key press.
    Key {
        /// Key value as reported by the platform.
        key: String,
    },
}
