//! Command-line arguments.

use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches, Parser};

use plugin_genbank_genome::TransformParams;

/// Transforms a Genbank file to KBaseGenomes.Genome and KBaseGenomes.ContigSet objects.
#[derive(Debug, Parser)]
#[command(
    name = "trns_transform_genbank_genome",
    version,
    about,
    long_about = None
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Installation root, overriding KB_TOP and the config file
    #[arg(long = "kb_top")]
    pub kb_top: Option<String>,

    /// Shock URL, for when shock references need to be made
    #[arg(
        long = "shock_service_url",
        required = true,
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub shock_service_url: Option<String>,

    /// KBase Workspace URL
    #[arg(long = "workspace_service_url")]
    pub workspace_service_url: String,

    /// Name of the workspace to save the data to
    #[arg(long = "workspace_name")]
    pub workspace_name: String,

    /// Name of the genome object to save
    #[arg(long = "object_name")]
    pub object_name: String,

    /// Name of the ContigSet object that is created with this Genome
    #[arg(long = "contigset_object_name")]
    pub contigset_object_name: Option<String>,

    /// A directory of either a genbank file or a directory of partial genome files to merge
    #[arg(long = "input_directory")]
    pub input_directory: String,

    /// A directory where you can do work
    #[arg(long = "working_directory")]
    pub working_directory: String,
}

impl Cli {
    /// Parse `args`, setting aside flags this command does not define.
    ///
    /// The transform driver passes the same flag set to every upload
    /// script, so unknown flags (and any bare values after them) are
    /// returned rather than rejected.
    pub fn try_parse_known<I, T>(args: I) -> Result<(Self, Vec<String>), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut command = Self::command();
        command.build();

        let mut args = args
            .into_iter()
            .map(|a| a.into().to_string_lossy().into_owned());
        let mut known: Vec<String> = args.next().into_iter().collect();
        let mut ignored = Vec::new();

        let mut args = args.peekable();
        while let Some(arg) = args.next() {
            let Some(takes_value) = flag_takes_value(&command, &arg) else {
                ignored.push(arg);
                while let Some(value) = args.next_if(|a| !a.starts_with('-')) {
                    ignored.push(value);
                }
                continue;
            };

            let inline_value = arg.contains('=') || is_attached_short(&arg);
            known.push(arg);
            if takes_value && !inline_value {
                if let Some(value) = args.next_if(|a| !a.starts_with('-')) {
                    known.push(value);
                }
            }
        }

        let mut matches = command.try_get_matches_from(known)?;
        let cli = Self::from_arg_matches_mut(&mut matches)?;
        Ok((cli, ignored))
    }

    /// Parameters for the transform. A bare `--shock_service_url` leaves
    /// the Shock URL unset.
    pub fn params(&self) -> TransformParams {
        TransformParams {
            shock_service_url: self
                .shock_service_url
                .clone()
                .filter(|url| !url.is_empty()),
            workspace_service_url: self.workspace_service_url.clone(),
            workspace_name: self.workspace_name.clone(),
            object_name: self.object_name.clone(),
            contigset_object_name: self.contigset_object_name.clone(),
            input_directory: self.input_directory.clone(),
            working_directory: self.working_directory.clone(),
        }
    }
}

/// `Some(takes_value)` when `token` names a flag of `command`, `None` for
/// unknown flags and stray values.
fn flag_takes_value(command: &clap::Command, token: &str) -> Option<bool> {
    let arg = if let Some(long) = token.strip_prefix("--") {
        let name = long.split_once('=').map_or(long, |(name, _)| name);
        command.get_arguments().find(|a| a.get_long() == Some(name))?
    } else if let Some(short) = token.strip_prefix('-') {
        let flag = short.chars().next()?;
        command.get_arguments().find(|a| a.get_short() == Some(flag))?
    } else {
        return None;
    };
    Some(arg.get_action().takes_values())
}

/// `-cvalue` style short flag with its value attached.
fn is_attached_short(token: &str) -> bool {
    !token.starts_with("--") && token.starts_with('-') && token.chars().count() > 2
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: &[&str] = &[
        "trns_transform_genbank_genome",
        "--shock_service_url",
        "http://shock",
        "--workspace_service_url",
        "http://ws",
        "--workspace_name",
        "my_ws",
        "--object_name",
        "myGenome",
        "--input_directory",
        "/data/in",
        "--working_directory",
        "/data/work",
    ];

    #[test]
    fn test_parses_underscore_flags() {
        let cli = Cli::try_parse_from(REQUIRED).expect("parse");
        let params = cli.params();

        assert_eq!(params.shock_service_url.as_deref(), Some("http://shock"));
        assert_eq!(params.workspace_service_url, "http://ws");
        assert_eq!(params.object_name, "myGenome");
        assert_eq!(params.input_directory, "/data/in");
        assert!(params.contigset_object_name.is_none());
        assert_eq!(cli.config, "config/default.toml");
        assert!(cli.kb_top.is_none());
    }

    #[test]
    fn test_optional_flags() {
        let mut argv = REQUIRED.to_vec();
        argv.extend(["--contigset_object_name", "myContigs", "--kb_top", "/opt/kb"]);

        let cli = Cli::try_parse_from(argv).expect("parse");
        assert_eq!(cli.params().contigset_object_name.as_deref(), Some("myContigs"));
        assert_eq!(cli.kb_top.as_deref(), Some("/opt/kb"));
    }

    #[test]
    fn test_missing_required_flag_rejected() {
        let argv: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|a| *a != "--object_name" && *a != "myGenome")
            .collect();
        assert!(Cli::try_parse_known(argv).is_err());
    }

    #[test]
    fn test_unknown_flags_are_set_aside() {
        let mut argv = REQUIRED.to_vec();
        argv.extend(["--extra_framework_flag", "v"]);

        let (cli, ignored) = Cli::try_parse_known(argv).expect("parse");
        assert_eq!(ignored, vec!["--extra_framework_flag", "v"]);
        assert_eq!(cli.params().object_name, "myGenome");
    }

    #[test]
    fn test_unknown_flags_between_known_flags() {
        let argv = [
            "trns_transform_genbank_genome",
            "--url_mapping=ignored",
            "--workspace_service_url",
            "http://ws",
            "--optional_arguments",
            "a",
            "b",
            "--shock_service_url",
            "http://shock",
            "--workspace_name",
            "my_ws",
            "--object_name",
            "myGenome",
            "--input_directory",
            "/data/in",
            "--working_directory",
            "/data/work",
            "-c",
            "custom.toml",
        ];

        let (cli, ignored) = Cli::try_parse_known(argv).expect("parse");
        assert_eq!(
            ignored,
            vec!["--url_mapping=ignored", "--optional_arguments", "a", "b"]
        );
        assert_eq!(cli.workspace_service_url, "http://ws");
        assert_eq!(cli.shock_service_url.as_deref(), Some("http://shock"));
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_known_flags_leave_nothing_ignored() {
        let (_, ignored) = Cli::try_parse_known(REQUIRED).expect("parse");
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_bare_shock_flag_leaves_url_unset() {
        let mut argv: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|a| *a != "http://shock")
            .collect();
        argv.extend(["--kb_top", "/opt/kb"]);

        let (cli, _) = Cli::try_parse_known(argv).expect("parse");
        assert!(cli.params().shock_service_url.is_none());
        assert_eq!(cli.workspace_service_url, "http://ws");
        assert_eq!(cli.kb_top.as_deref(), Some("/opt/kb"));
    }

    #[test]
    fn test_shock_flag_still_required() {
        let argv: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|a| *a != "--shock_service_url" && *a != "http://shock")
            .collect();
        assert!(Cli::try_parse_known(argv).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
