//! Embeds the short commit hash shown by `meridian --version`.
//!
//! `MERIDIAN_COMMIT_SHA` set in the build environment wins over git, which
//! lets source tarballs without a `.git` directory carry a hash.

use std::env;
use std::process::Command;

fn git_short_head() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let sha = String::from_utf8(output.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}

fn main() {
    let commit = env::var("MERIDIAN_COMMIT_SHA")
        .ok()
        .filter(|sha| !sha.is_empty())
        .or_else(git_short_head)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=MERIDIAN_COMMIT_SHA={commit}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=MERIDIAN_COMMIT_SHA");
}
