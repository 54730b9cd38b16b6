// src/commands/version.rs
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SHA: &str = env!("VERGEN_GIT_SHA");
const GIT_DIRTY: &str = env!("VERGEN_GIT_DIRTY");
const DEBUG: &str = env!("VERGEN_CARGO_DEBUG");
const TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");
const BUILD_DATE: &str = env!("VERGEN_BUILD_DATE");

fn simplify_target(target: &str) -> String {
    target
        .replace("unknown-", "")
        .replace("-gnu", "")
        .replace("-musl", "")
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

fn is_release() -> bool {
    DEBUG != "true"
}

fn is_dirty() -> bool {
    GIT_DIRTY == "true"
}

fn make_version_string(sha: &str, dirty: bool, release: bool, target: &str) -> String {
    let sha = short_sha(sha);
    let target = simplify_target(target);
    if release && !dirty {
        // 0.3.0 (abc1234 release linux-x86_64, built 2026-02-16)
        format!("{VERSION} ({sha} release {target}, built {BUILD_DATE})")
    } else {
        // 0.3.0 (abc1234+ debug linux-x86_64, built 2026-02-16)
        let dirty = if dirty { "+" } else { "" };
        let profile = if release { "release" } else { "debug" };
        format!("{VERSION} ({sha}{dirty} {profile} {target}, built {BUILD_DATE})")
    }
}

pub fn version_string() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING
        .get_or_init(|| make_version_string(GIT_SHA, is_dirty(), is_release(), TARGET_TRIPLE))
}

pub fn print_version() -> ExitCode {
    println!("hostbind {}", version_string());
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_builds_mark_dirty_trees() {
        let v = make_version_string("0123456789abcdef", true, false, "x86_64-unknown-linux-gnu");
        assert!(v.starts_with(VERSION));
        assert!(v.contains("(0123456+ debug x86_64-linux, built "), "{v}");
    }

    #[test]
    fn clean_release_builds() {
        let v = make_version_string("abc", false, true, "aarch64-apple-darwin");
        assert!(v.contains("(abc release aarch64-apple-darwin, built "), "{v}");
    }
}
