//! Command-line construction for the external converter.

use std::ffi::OsString;

use transform_core::config::tool::{ArgumentStyle, ToolConfig};

use crate::classpath::Classpath;
use crate::error::ConversionError;
use crate::models::TransformParams;

/// Flag the tool reads the Shock URL from. Note this differs from the
/// CLI's `--shock_service_url`.
pub const SHOCK_URL_FLAG: &str = "--shock_url";
pub const WORKSPACE_SERVICE_URL_FLAG: &str = "--workspace_service_url";
pub const WORKSPACE_NAME_FLAG: &str = "--workspace_name";
pub const OBJECT_NAME_FLAG: &str = "--object_name";
pub const WORKING_DIRECTORY_FLAG: &str = "--working_directory";
pub const INPUT_DIRECTORY_FLAG: &str = "--input_directory";
pub const CONTIGSET_OBJECT_NAME_FLAG: &str = "--contigset_object_name";

/// A single flag/value pair passed to the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolArg {
    /// Flag name, including the leading dashes.
    pub flag: &'static str,
    /// Value, forwarded verbatim.
    pub value: String,
}

impl ToolArg {
    fn new(flag: &'static str, value: impl Into<String>) -> Self {
        Self {
            flag,
            value: value.into(),
        }
    }
}

/// A fully composed tool invocation: `java -classpath <cp> <entry> <args>`.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: String,
    classpath: OsString,
    entry_point: String,
    tool_args: Vec<ToolArg>,
    style: ArgumentStyle,
}

impl Invocation {
    /// Compose the invocation for `params`.
    pub fn build(
        tool: &ToolConfig,
        classpath: &Classpath,
        params: &TransformParams,
    ) -> Result<Self, ConversionError> {
        Ok(Self {
            program: tool.java_binary.clone(),
            classpath: classpath.joined()?,
            entry_point: tool.entry_point.clone(),
            tool_args: Self::tool_arguments(params),
            style: tool.argument_style,
        })
    }

    /// Flag/value pairs in the order the tool expects.
    ///
    /// The Shock pair is omitted without a URL and the ContigSet pair
    /// without a name.
    pub fn tool_arguments(params: &TransformParams) -> Vec<ToolArg> {
        let mut args = Vec::with_capacity(7);

        if let Some(url) = &params.shock_service_url {
            args.push(ToolArg::new(SHOCK_URL_FLAG, url));
        }
        args.push(ToolArg::new(
            WORKSPACE_SERVICE_URL_FLAG,
            &params.workspace_service_url,
        ));
        args.push(ToolArg::new(WORKSPACE_NAME_FLAG, &params.workspace_name));
        args.push(ToolArg::new(OBJECT_NAME_FLAG, &params.object_name));
        args.push(ToolArg::new(
            WORKING_DIRECTORY_FLAG,
            &params.working_directory,
        ));
        args.push(ToolArg::new(INPUT_DIRECTORY_FLAG, &params.input_directory));

        if let Some(name) = &params.contigset_object_name {
            args.push(ToolArg::new(CONTIGSET_OBJECT_NAME_FLAG, name));
        }

        args
    }

    /// The interpreter to launch.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Flag/value pairs forwarded to the tool.
    pub fn tool_args(&self) -> &[ToolArg] {
        &self.tool_args
    }

    /// All flag/value pairs as one space-separated string.
    pub fn joined_arguments(&self) -> String {
        self.tool_args
            .iter()
            .map(|a| format!("{} {}", a.flag, a.value))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Arguments following the program name, shaped by the argument style.
    pub fn args(&self) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec![
            "-classpath".into(),
            self.classpath.clone(),
            self.entry_point.clone().into(),
        ];

        match self.style {
            ArgumentStyle::Discrete => {
                for arg in &self.tool_args {
                    argv.push(arg.flag.into());
                    argv.push(arg.value.clone().into());
                }
            }
            ArgumentStyle::Joined => argv.push(self.joined_arguments().into()),
        }

        argv
    }

    /// Human-readable rendering of the full command line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args().iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
