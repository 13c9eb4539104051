use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    println!(
        "cargo:rustc-env=SCREENSNAP_GIT_HASH={}",
        short_git_hash().unwrap_or_else(|| "unknown".into())
    );

    // Rebuild when the checkout moves so the embedded hash stays honest.
    if let Some(git_dir) = git_dir() {
        for name in ["HEAD", "refs", "packed-refs"] {
            let path = git_dir.join(name);
            if path.exists() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}

fn short_git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if hash.is_empty() { None } else { Some(hash) }
}

fn git_dir() -> Option<PathBuf> {
    if let Some(from_env) = std::env::var_os("GIT_DIR") {
        return Some(PathBuf::from(from_env));
    }

    let dot_git = PathBuf::from(".git");
    if dot_git.is_dir() {
        return Some(dot_git);
    }

    // Worktrees keep a `gitdir: <path>` pointer file instead of a directory.
    if dot_git.is_file()
        && let Ok(contents) = fs::read_to_string(&dot_git)
        && let Some(rest) = contents.strip_prefix("gitdir:")
    {
        let mut resolved = PathBuf::from(rest.trim());
        if resolved.is_relative()
            && let Some(parent) = dot_git.parent()
        {
            resolved = parent.join(resolved);
        }
        return Some(resolved);
    }

    None
}
