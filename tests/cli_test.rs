//! Exit status of the transform binary against a stub converter.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use transform_core::config::tool::default_classpath;

/// Installation root with every default jar and a stub `java` exiting
/// with a fixed status.
struct Install {
    temp: tempfile::TempDir,
    root: PathBuf,
    config: PathBuf,
}

impl Install {
    fn new(exit_code: i32) -> Self {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("kb");

        for rel in default_classpath() {
            let jar = root.join(rel);
            std::fs::create_dir_all(jar.parent().expect("parent")).expect("mkdir");
            std::fs::write(&jar, b"PK").expect("write jar");
        }

        let java = root.join("bin/java");
        std::fs::create_dir_all(java.parent().expect("parent")).expect("mkdir");
        std::fs::write(&java, format!("#!/bin/sh\nexit {exit_code}\n")).expect("write stub");
        std::fs::set_permissions(&java, std::fs::Permissions::from_mode(0o755)).expect("chmod");

        let config = temp.path().join("transform.toml");
        std::fs::write(
            &config,
            format!("[tool]\njava_binary = \"{}\"\n", java.display()),
        )
        .expect("write config");

        Self { temp, root, config }
    }
}

fn run(config: &Path, extra: &[&str]) -> ExitStatus {
    Command::new(env!("CARGO_BIN_EXE_trns_transform_genbank_genome"))
        .env_remove("KB_TOP")
        .env_remove("KB_TRANSFORM__ROOT_PATH")
        .arg("--config")
        .arg(config)
        .args([
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
        ])
        .args(extra)
        .status()
        .expect("run binary")
}

#[test]
fn test_exit_zero_when_tool_succeeds() {
    let install = Install::new(0);
    let root = install.root.to_string_lossy().into_owned();

    let status = run(&install.config, &["--kb_top", &root]);
    assert_eq!(status.code(), Some(0));
}

#[test]
fn test_exit_one_without_installation_root() {
    let install = Install::new(0);

    let status = run(&install.config, &[]);
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_exit_one_when_tool_fails() {
    let install = Install::new(3);
    let root = install.root.to_string_lossy().into_owned();

    let status = run(&install.config, &["--kb_top", &root]);
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_exit_one_when_libraries_missing() {
    let install = Install::new(0);
    let empty = install.temp.path().join("empty");
    std::fs::create_dir_all(&empty).expect("mkdir");
    let empty = empty.to_string_lossy().into_owned();

    let status = run(&install.config, &["--kb_top", &empty]);
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_unrecognized_flags_do_not_fail_the_run() {
    let install = Install::new(0);
    let root = install.root.to_string_lossy().into_owned();

    let status = run(
        &install.config,
        &["--kb_top", &root, "--extra_framework_flag", "v"],
    );
    assert_eq!(status.code(), Some(0));
}
