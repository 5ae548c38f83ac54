use chrono::Utc;
use std::process::Command;

/// Embed `BUILD_HASH` (short commit, `-dirty-<timestamp>` when tracked files
/// differ from HEAD) for `chantons --version`.
fn main() {
    let commit = git_output(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".into());

    let dirty = Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .is_ok_and(|status| !status.success());

    let build_hash = if dirty {
        format!("{commit}-dirty-{}", Utc::now().format("%Y%m%dT%H%M%SZ"))
    } else {
        commit
    };
    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    // .git sits at the workspace root, two levels up
    for path in ["../../.git/HEAD", "../../.git/index"] {
        println!("cargo:rerun-if-changed={path}");
    }
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
