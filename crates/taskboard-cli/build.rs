use std::path::Path;
use std::process::Command;

const OVERRIDE: &str = "TASKBOARD_BUILD_COMMIT";

fn git_head() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string()).filter(|h| !h.is_empty())
}

fn main() {
    println!("cargo::rerun-if-env-changed={}", OVERRIDE);

    let git_dir = Path::new("../../.git");
    if git_dir.exists() {
        println!("cargo::rerun-if-changed=../../.git/HEAD");
        println!("cargo::rerun-if-changed=../../.git/refs/heads/");
    }

    let commit = std::env::var(OVERRIDE)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(git_head)
        .unwrap_or_else(|| "untracked".to_string());

    println!("cargo::rustc-env=TASKBOARD_COMMIT={}", commit);
}
