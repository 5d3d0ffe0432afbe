use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use crate::ui;

/// Run a shell command string synchronously in `cwd`. The exit status is
/// reported but not inspected: one failing command must not halt the
/// remaining directives.
pub fn run_command(command: &str, cwd: &Path) -> Result<()> {
    ui::info(&format!("Running `{}`", command));

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .status()
        .with_context(|| format!("failed to run `{}`", command))?;

    if !status.success() {
        ui::warn(&format!("`{}` exited with {}", command, status));
    }

    Ok(())
}

/// Clone a Git repo into `dest`. A failed clone warns and moves on, like any
/// other failing command.
pub fn clone_repo(url: &str, dest: &Path, cwd: &Path) -> Result<()> {
    let pb = ui::spinner(&format!("Cloning {} into {}", url, dest.display()));

    let output = Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(dest)
        .current_dir(cwd)
        .output()
        .context("failed to run git; is it installed?")?;

    pb.finish_and_clear();

    if output.status.success() {
        ui::success(&format!("Cloned {} -> {}", url, dest.display()));
    } else {
        ui::warn(&format!(
            "failed to clone {}: {}",
            url,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    Ok(())
}

/// Check whether a CLI program exists on PATH.
pub fn program_exists(program: &str) -> bool {
    which::which(program).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn commands_run_in_the_given_directory() {
        let temp = TempDir::new().unwrap();
        run_command("echo ran > marker.txt", temp.path()).unwrap();
        assert!(temp.path().join("marker.txt").exists());
    }

    #[test]
    fn failing_commands_are_not_fatal() {
        let temp = TempDir::new().unwrap();
        run_command("exit 3", temp.path()).unwrap();
    }

    #[test]
    fn program_exists_finds_the_shell() {
        assert!(program_exists("sh"));
        assert!(!program_exists("definitely-not-a-real-binary-name"));
    }
}
