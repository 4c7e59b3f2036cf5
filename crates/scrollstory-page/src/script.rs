//! Timed input scripts replayed against the page.

use std::path::Path;
use std::time::Duration;

use scrollstory_core::animation::ListSide;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;
use tracing::{debug, info};

use crate::error::AppError;
use crate::input::{ItemRef, PageInput};

/// One input and the wait before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds to wait after the previous step.
    #[serde(default)]
    pub delay_ms: u64,
    /// Input to deliver.
    pub input: PageInput,
}

/// A sequence of timed inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollScript {
    /// Steps in delivery order.
    pub steps: Vec<ScriptStep>,
}

impl ScrollScript {
    /// Parses a JSON script.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` if the JSON is not a valid script.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::Script(format!("invalid JSON script: {e}")))
    }

    /// Parses a YAML script.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` if the YAML is not a valid script.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(yaml).map_err(|e| AppError::Script(format!("invalid YAML script: {e}")))
    }

    /// Loads a script file; `.json` files are read as JSON, anything else as
    /// YAML.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read, or
    /// `AppError::Script` if it is not a valid script.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Scrolls down through every section, back up to the fourth, clicks the
    /// eighth category, toggles the debug overlay and scrolls through the end
    /// region.
    #[must_use]
    pub fn demo_sweep() -> Self {
        let frame = |delay_ms, progress| ScriptStep {
            delay_ms,
            input: PageInput::Scroll { progress },
        };
        let mut steps: Vec<ScriptStep> = (0..=50).map(|i| frame(40, f64::from(i) / 50.0)).collect();
        steps.extend((0..=13).map(|i| frame(60, 1.0 - f64::from(i) * 0.05)));
        let item = ItemRef {
            side: ListSide::Right,
            index: 7,
        };
        steps.extend([
            ScriptStep {
                delay_ms: 6000,
                input: PageInput::Hover { item },
            },
            ScriptStep {
                delay_ms: 200,
                input: PageInput::Click { item: Some(item) },
            },
            ScriptStep {
                delay_ms: 1500,
                input: PageInput::Key { key: "h".into() },
            },
        ]);
        steps.extend((0..=10).map(|i| ScriptStep {
            delay_ms: 50,
            input: PageInput::EndScroll {
                progress: f64::from(i) / 10.0,
            },
        }));
        Self { steps }
    }

    /// Delivers every step to `inputs`, waiting each step's delay first.
    /// Dropping the sender at the end closes the page's input channel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Script` if the page stops listening first.
    pub async fn replay(self, inputs: Sender<PageInput>) -> Result<(), AppError> {
        let total = self.steps.len();
        for (n, step) in self.steps.into_iter().enumerate() {
            tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
            debug!(step = n, input = ?step.input, "replaying input");
            inputs
                .send(step.input)
                .await
                .map_err(|_| AppError::Script(format!("page stopped listening at step {n}")))?;
        }
        info!(steps = total, "script replayed");
        Ok(())
    }
}
