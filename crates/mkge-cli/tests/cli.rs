//! End-to-end tests driving the `mkge-picker` binary against temporary download trees.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test context that sets up a temporary downloads directory
struct TestContext {
    _temp_dir: TempDir,
    downloads: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let downloads = temp_dir.path().join("downloads");
        std::fs::create_dir_all(&downloads).expect("failed to create downloads dir");
        Self {
            _temp_dir: temp_dir,
            downloads,
        }
    }

    fn with_archives(names: &[&str]) -> Self {
        let ctx = Self::new();
        for name in names {
            ctx.add_archive(name);
        }
        ctx
    }

    /// Place `name` under `mkge-<major>.<minor>/WithMadKit/`.
    fn add_archive(&self, name: &str) {
        let series: String = name
            .trim_start_matches("mkge-")
            .splitn(3, '.')
            .take(2)
            .collect::<Vec<_>>()
            .join(".");
        let dir = self
            .downloads
            .join(format!("mkge-{series}"))
            .join("WithMadKit");
        std::fs::create_dir_all(&dir).expect("failed to create release dir");
        std::fs::write(dir.join(name), b"").expect("failed to write archive");
    }

    fn cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_mkge-picker");
        let mut cmd = Command::new(bin_path);
        cmd.env_remove("MKGE_CONFIG")
            .env_remove("MKGE_BASE_URL")
            .env("MKGE_DOWNLOADS_DIR", &self.downloads);
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("failed to run mkge-picker")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const SCENARIO: &[&str] = &[
    "mkge-1.2.3Stable+madkit-5.0.0.1.jar",
    "mkge-1.2.3Stable+madkit-5.1.0.0.jar",
];

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_url_defaults_to_most_recent() {
    let ctx = TestContext::with_archives(SCENARIO);
    let output = ctx.run(&["url"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "http://madkitgroupextension.free.fr/downloads/mkge-1.2/WithMadKit/mkge-1.2.3Stable+madkit-5.1.0.0_withsrc_withdoc.zip"
    );
}

#[test]
fn test_url_options() {
    let ctx = TestContext::with_archives(SCENARIO);

    let output = ctx.run(&["url", "--no-src", "--no-doc"]);
    assert!(stdout(&output).trim().ends_with("WithMadKit/mkge-1.2.3Stable+madkit-5.1.0.0.jar"));

    let output = ctx.run(&["url", "--madkit", "none", "--base-url", "https://mirror.example/dl"]);
    assert_eq!(
        stdout(&output).trim(),
        "https://mirror.example/dl/mkge-1.2/WithoutMadKit/mkge-1.2.3Stable_withsrc_withdoc.zip"
    );

    let output = ctx.run(&["url", "--madkit", "5.0.0.1", "--no-doc"]);
    assert!(stdout(&output).trim().ends_with("mkge-1.2.3Stable+madkit-5.0.0.1_withsrc.jar"));
}

#[test]
fn test_url_unknown_key_fails() {
    let ctx = TestContext::with_archives(SCENARIO);
    let output = ctx.run(&["url", "--major", "4"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown major '4'"));
}

#[test]
fn test_tree_json() {
    let ctx = TestContext::with_archives(SCENARIO);
    let output = ctx.run(&["tree"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let release = &json["majors"][0]["children"][0]["children"][0]["children"][0];
    assert_eq!(release["key"], "Stable");
    assert_eq!(release["children"], serde_json::json!(["5.1.0.0", "5.0.0.1"]));
}

#[test]
fn test_render_empty_page() {
    let ctx = TestContext::new();
    let output = ctx.run(&["render"]);
    assert!(output.status.success());
    let html = stdout(&output);
    assert!(html.contains("There is no version of MadKitGroupExtension to download on this server !"));
    assert!(!html.contains("<select"));
}

#[test]
fn test_render_to_file() {
    let ctx = TestContext::with_archives(SCENARIO);
    let page = ctx.downloads.join("index.html");
    let output = ctx.run(&["render", "--output", page.to_str().unwrap()]);
    assert!(output.status.success());

    let html = std::fs::read_to_string(&page).unwrap();
    assert!(html.contains("<option value=\"5.1.0.0\" selected>5.1.0.0</option>"));
}

#[test]
fn test_invalid_archive_policy() {
    let ctx = TestContext::with_archives(SCENARIO);
    ctx.add_archive("mkge-1.2.garbage.jar");

    let output = ctx.run(&["list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid file: mkge-1.2.garbage.jar"));

    let output = ctx.run(&["list", "--skip-invalid"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("2 archive(s)"));
}

#[test]
fn test_config_file() {
    let ctx = TestContext::with_archives(SCENARIO);
    let config = ctx.downloads.join("picker.toml");
    std::fs::write(&config, "base_url = \"https://cfg.example/files\"\n").unwrap();

    let output = ctx.run(&["url", "--config", path_str(&config)]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("https://cfg.example/files/mkge-1.2/"));
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 temp path")
}
