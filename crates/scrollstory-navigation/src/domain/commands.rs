//! Commands for the Navigation context.

use scrollstory_core::animation::Completion;
use scrollstory_core::command::Command;
use uuid::Uuid;

/// Command to process one scroll frame.
#[derive(Debug, Clone)]
pub struct SampleScroll {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Normalized progress through the pinned region.
    pub progress: f64,
}

impl Command for SampleScroll {
    fn command_type(&self) -> &'static str {
        "navigation.sample_scroll"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to jump to a section after a list-item click.
#[derive(Debug, Clone)]
pub struct NavigateToSection {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Requested section index.
    pub index: usize,
}

impl Command for NavigateToSection {
    fn command_type(&self) -> &'static str {
        "navigation.navigate_to_section"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to snap to a section as a scroll-driven step.
#[derive(Debug, Clone)]
pub struct SnapToSection {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Requested section index.
    pub index: usize,
}

impl Command for SnapToSection {
    fn command_type(&self) -> &'static str {
        "navigation.snap_to_section"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to apply a completion message.
#[derive(Debug, Clone)]
pub struct AcknowledgeCompletion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The completion delivered by an engine.
    pub completion: Completion,
}

impl Command for AcknowledgeCompletion {
    fn command_type(&self) -> &'static str {
        "navigation.acknowledge_completion"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
