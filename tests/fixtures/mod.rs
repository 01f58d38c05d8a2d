//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Path to the palettegen binary
pub fn palettegen_bin() -> String {
    std::env::var("CARGO_BIN_EXE_palettegen")
        .unwrap_or_else(|_| "target/release/palettegen".to_string())
}

/// Creates a Command with an isolated config directory.
///
/// Pass the same directory to several commands to share config and saved
/// palettes between them.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(palettegen_bin());
    cmd.env("PALETTEGEN_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Runs a command in a fresh isolated config directory.
pub fn run_isolated(args: &[&str]) -> Output {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    isolated_command(args, config_dir.path())
        .output()
        .expect("Failed to execute command")
}

/// Runs a command feeding `input` on stdin.
pub fn run_with_stdin(args: &[&str], config_dir: &Path, input: &str) -> Output {
    let mut child = isolated_command(args, config_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for command")
}

/// Stdout as a string.
pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string.
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parses stdout as one JSON document.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout_of(output)).expect("Should parse JSON output")
}

/// Hex strings of the `colors` array in a JSON snapshot.
pub fn colors_of(snapshot: &serde_json::Value) -> Vec<String> {
    snapshot["colors"]
        .as_array()
        .expect("colors should be an array")
        .iter()
        .map(|c| c.as_str().expect("color should be a string").to_string())
        .collect()
}

/// Writes a PNG made of horizontal runs of `(count, [r, g, b])`.
pub fn write_striped_png(path: &Path, runs: &[(u32, [u8; 3])]) {
    let width: u32 = runs.iter().map(|(count, _)| count).sum();
    let mut image = image::RgbaImage::new(width, 1);
    let mut x = 0;
    for (count, [r, g, b]) in runs {
        for _ in 0..*count {
            image.put_pixel(x, 0, image::Rgba([*r, *g, *b, 255]));
            x += 1;
        }
    }
    image.save(path).expect("Failed to write PNG fixture");
}
