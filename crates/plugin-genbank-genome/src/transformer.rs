//! The Genbank → KBaseGenomes.Genome transform.
//!
//! Verifies the converter's classpath, composes the invocation, launches
//! the tool and maps its exit status. Nothing is retried and no partial
//! results are cleaned up; the tool owns all writes to the workspace.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use transform_core::config::TransformConfig;
use transform_core::config::tool::ToolConfig;
use transform_core::result::AppResult;

use crate::classpath::ClasspathManifest;
use crate::error::ConversionError;
use crate::executor::{ProcessExecutor, ProcessLauncher};
use crate::invocation::Invocation;
use crate::models::{TransformParams, TransformReport};
use crate::state::TransformState;

/// Drives the external converter for one installation.
#[derive(Clone)]
pub struct GenbankTransformer {
    /// Installation root the classpath is resolved against.
    root: PathBuf,
    /// Required libraries.
    manifest: ClasspathManifest,
    /// Interpreter, entry point and argument style.
    tool: ToolConfig,
    /// Process launcher.
    launcher: Arc<dyn ProcessLauncher>,
}

impl std::fmt::Debug for GenbankTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenbankTransformer")
            .field("root", &self.root)
            .field("manifest", &self.manifest)
            .field("tool", &self.tool)
            .finish_non_exhaustive()
    }
}

impl GenbankTransformer {
    /// Create a transformer that launches real processes.
    pub fn new(root: impl Into<PathBuf>, tool: ToolConfig) -> Self {
        let launcher = Arc::new(ProcessExecutor::with_timeout(tool.timeout_seconds));
        Self::with_launcher(root, tool, launcher)
    }

    /// Create a transformer with a custom launcher.
    pub fn with_launcher(
        root: impl Into<PathBuf>,
        tool: ToolConfig,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            root: root.into(),
            manifest: ClasspathManifest::from(&tool),
            tool,
            launcher,
        }
    }

    /// Build from loaded configuration. Fails if no installation root is set.
    pub fn from_config(config: &TransformConfig) -> AppResult<Self> {
        let root = config.root_path()?;
        Ok(Self::new(root, config.tool.clone()))
    }

    /// Installation root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Required libraries.
    pub fn manifest(&self) -> &ClasspathManifest {
        &self.manifest
    }

    /// Validate inputs and the classpath, then compose the invocation.
    /// No process is launched.
    pub fn prepare(&self, params: &TransformParams) -> Result<Invocation, ConversionError> {
        params.validate()?;

        let classpath = self.manifest.resolve(&self.root);
        classpath.verify()?;

        Invocation::build(&self.tool, &classpath, params)
    }

    /// Convert `params.input_directory` into Genome and ContigSet objects.
    #[instrument(skip(self, params), fields(run_id, object_name = %params.object_name))]
    pub async fn transform(
        &self,
        params: &TransformParams,
    ) -> Result<TransformReport, ConversionError> {
        let run_id = Uuid::now_v7();
        tracing::Span::current().record("run_id", run_id.to_string());

        info!("Starting transformation of Genbank to KBaseGenomes.Genome");
        let mut state = TransformState::Idle;

        let result = self.run(params, &mut state).await;
        if let Err(e) = &result {
            state.advance(TransformState::Failed);
            if e.is_precondition() {
                error!(error = %e, "Transform preconditions not met");
            } else {
                error!(error = %e, "Conversion tool failed");
            }
        }
        result
    }

    async fn run(
        &self,
        params: &TransformParams,
        state: &mut TransformState,
    ) -> Result<TransformReport, ConversionError> {
        let invocation = self.prepare(params)?;

        state.advance(TransformState::Running);
        let outcome = self.launcher.launch(&invocation).await?;

        match outcome.code {
            Some(code) => info!("Tool execution returned exit status {}", code),
            None => info!("Tool execution terminated by signal"),
        }

        if outcome.success() {
            state.advance(TransformState::Succeeded);
            info!(
                duration_ms = outcome.duration_ms,
                "Transformation from Genbank.Genome to KBaseGenomes.Genome completed."
            );
            return Ok(TransformReport {
                state: *state,
                exit_code: 0,
                duration_ms: outcome.duration_ms,
                command_line: invocation.command_line(),
            });
        }

        let input_directory = params.input_directory.clone();
        Err(match outcome.code {
            Some(code) => ConversionError::ToolFailed {
                input_directory,
                code,
            },
            None => ConversionError::ToolKilled { input_directory },
        })
    }
}
