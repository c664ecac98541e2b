use serde::{Deserialize, Serialize};

use super::defaults;

/// What reducers do with error ops found in their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorOpPolicy {
    /// Drop error ops before merging.
    #[default]
    Skip,
    /// Merge error ops like any other op.
    Keep,
    /// Fail the reduction.
    Reject,
}

/// Configuration for the reduction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// Handling of error ops in reducer inputs. Default: skip.
    pub error_ops: ErrorOpPolicy,
    /// Batches with at least this many frames are sharded across threads.
    /// Default: 64.
    pub parallel_threshold: usize,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            error_ops: ErrorOpPolicy::default(),
            parallel_threshold: defaults::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}
