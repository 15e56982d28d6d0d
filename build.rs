use std::process::Command;

/// Ask git for a revision; "unknown" when git or the repository is unavailable.
fn git_rev(args: &[&str]) -> String {
    match Command::new("git").args(args).output() {
        Ok(output) if output.status.success() => String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "unknown".to_string()),
        _ => "unknown".to_string(),
    }
}

fn main() {
    // shown by `abanagram --version`
    println!("cargo:rustc-env=GIT_HASH={}", git_rev(&["rev-parse", "--short", "HEAD"]));
    println!("cargo:rustc-env=GIT_HASH_FULL={}", git_rev(&["rev-parse", "HEAD"]));

    println!("cargo:rerun-if-changed=.git/HEAD");
}
