//! Data models for a single Genbank conversion run.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::state::TransformState;

/// Caller-supplied parameters for one conversion.
///
/// Values are forwarded to the tool verbatim. Only presence is checked;
/// malformed URLs or paths surface through the tool's exit status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate, Serialize, Deserialize)]
pub struct TransformParams {
    /// Shock blob-store URL, needed when sequence data is externalized.
    #[validate(length(min = 1))]
    pub shock_service_url: Option<String>,

    /// KBase workspace service URL.
    #[validate(length(min = 1))]
    pub workspace_service_url: String,

    /// Workspace the objects are saved to.
    #[validate(length(min = 1))]
    pub workspace_name: String,

    /// Name of the Genome object.
    #[validate(length(min = 1))]
    pub object_name: String,

    /// Name of the ContigSet object created alongside the Genome.
    #[validate(length(min = 1))]
    pub contigset_object_name: Option<String>,

    /// A Genbank file, or a directory of partial genome files to merge.
    #[validate(length(min = 1))]
    pub input_directory: String,

    /// Scratch directory for the tool.
    #[validate(length(min = 1))]
    pub working_directory: String,
}

/// Summary of a successful conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformReport {
    /// Final state of the run.
    pub state: TransformState,
    /// Exit code reported by the tool.
    pub exit_code: i32,
    /// Wall time spent waiting on the tool.
    pub duration_ms: u64,
    /// Rendered command line, for diagnostics.
    pub command_line: String,
}
