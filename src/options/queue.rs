use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the controller's request queue treats incoming requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Queue", inline)]
#[serde(default)]
pub struct QueueOptions {
    /// Drop a request whose target is already the pending target.
    #[schemars(title = "Suppress Duplicate Requests")]
    pub suppress_duplicate_requests: bool,
}

impl Default for QueueOptions {
    fn default() -> Self {
        Self {
            suppress_duplicate_requests: true,
        }
    }
}
