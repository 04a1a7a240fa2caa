//! External conversion tool configuration.
//!
//! The classpath manifest lives here rather than in code so that jar
//! version upgrades are configuration edits.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How tool arguments are handed to the child process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentStyle {
    /// Every flag and value is its own argv token.
    #[default]
    Discrete,
    /// All flag/value pairs are joined by spaces into a single argv token.
    /// The tool must re-split the string itself.
    Joined,
}

/// Settings for the external Java conversion tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Interpreter used to launch the tool.
    pub java_binary: String,
    /// Fully qualified class name of the conversion entry point.
    pub entry_point: String,
    /// Required supporting libraries, relative to the installation root.
    /// Absolute entries are used as-is.
    pub classpath: Vec<PathBuf>,
    /// Argument passing style.
    pub argument_style: ArgumentStyle,
    /// Kill the tool after this many seconds. `None` waits indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            java_binary: default_java_binary(),
            entry_point: default_entry_point(),
            classpath: default_classpath(),
            argument_style: ArgumentStyle::default(),
            timeout_seconds: None,
        }
    }
}

fn default_java_binary() -> String {
    "java".to_string()
}

fn default_entry_point() -> String {
    "us.kbase.genbank.ConvertGBK".to_string()
}

/// The jars the Genbank converter was built against.
pub fn default_classpath() -> Vec<PathBuf> {
    [
        "lib/jars/kbase/transform/kbase_transform_deps.jar",
        "lib/jars/kbase/genomes/kbase-genomes-20140411.jar",
        "lib/jars/kbase/common/kbase-common-0.0.6.jar",
        "lib/jars/jackson/jackson-annotations-2.2.3.jar",
        "lib/jars/jackson/jackson-core-2.2.3.jar",
        "lib/jars/jackson/jackson-databind-2.2.3.jar",
        "lib/jars/kbase/auth/kbase-auth-1398468950-3552bb2.jar",
        "lib/jars/kbase/workspace/WorkspaceClient-0.2.0.jar",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}
