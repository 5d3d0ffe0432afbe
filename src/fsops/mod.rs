use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::os::unix::fs as unix_fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ui;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("path {0} cannot be removed: it is neither a file nor a directory")]
    NotRemovable(PathBuf),
}

/// Result of a single filesystem action, tallied for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Outcome {
    Created,
    Linked,
    Copied,
    Skipped,
}

impl Outcome {
    pub fn color_str(&self) -> ColoredString {
        match self {
            Outcome::Created => "Created".cyan(),
            Outcome::Linked => "Linked".green(),
            Outcome::Copied => "Copied".blue(),
            Outcome::Skipped => "Skipped".dimmed(),
        }
    }
}

/// Create a directory recursively. An existing directory is left alone
/// unless `replace` is set, in which case it is deleted and recreated.
pub fn create_directory(path: &Path, replace: bool) -> Result<Outcome> {
    if path.is_dir() {
        if !replace {
            return Ok(Outcome::Skipped);
        }
        remove_path(path)?;
    }

    ui::info(&format!("Creating {}", path.display()));
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory {}", path.display()))?;

    Ok(Outcome::Created)
}

/// Symlink `src` (already absolute) at `dest`. A correct existing link is
/// skipped when not replacing; any other existing path is removed after the
/// overwrite negotiation.
pub fn create_symlink(src: &Path, dest: &Path, replace: bool) -> Result<Outcome> {
    if dest.exists() || dest.is_symlink() {
        let already_correct = dest.is_symlink()
            && fs::read_link(dest)
                .map(|target| target == src)
                .unwrap_or(false);

        if already_correct && !replace {
            ui::info(&format!(
                "Skipping existing {} -> {}",
                src.display(),
                dest.display()
            ));
            return Ok(Outcome::Skipped);
        }

        if !confirm_overwrite(dest, replace) {
            return Ok(Outcome::Skipped);
        }

        remove_path(dest)?;
    }

    ensure_parent(dest)?;

    ui::info(&format!("Linking {} -> {}", dest.display(), src.display()));
    unix_fs::symlink(src, dest).with_context(|| {
        format!(
            "failed to symlink {} -> {}",
            src.display(),
            dest.display()
        )
    })?;

    Ok(Outcome::Linked)
}

/// Copy a file or a directory tree from `src` (already absolute) to `dest`,
/// after the same overwrite negotiation as [`create_symlink`].
pub fn copy_path(src: &Path, dest: &Path, replace: bool) -> Result<Outcome> {
    if dest.exists() || dest.is_symlink() {
        if !confirm_overwrite(dest, replace) {
            return Ok(Outcome::Skipped);
        }
        remove_path(dest)?;
    }

    ensure_parent(dest)?;

    ui::info(&format!("Copying {} -> {}", src.display(), dest.display()));
    if src.is_dir() {
        copy_dir(src, dest)?;
    } else {
        copy_file_with_metadata(src, dest)?;
    }

    Ok(Outcome::Copied)
}

/// Remove a path, whether it is a file, a symlink, or a directory. A path
/// that is none of those is a [`PathError`].
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|_| PathError::NotRemovable(path.to_path_buf()))?;

    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory {}", path.display()))?;
    } else {
        // Plain files and symlinks, including links to directories.
        fs::remove_file(path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }

    Ok(())
}

/// Replace mode always bypasses the prompt; otherwise the user decides.
fn confirm_overwrite(dest: &Path, replace: bool) -> bool {
    if replace {
        return true;
    }
    ui::confirm(&format!("{} exists, delete it?", dest.display()), true)
}

fn ensure_parent(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent of {}", dest.display()))?;
    }
    Ok(())
}

fn copy_file_with_metadata(src: &Path, dest: &Path) -> Result<()> {
    fs::copy(src, dest)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dest.display()))?;

    let metadata = src.metadata()?;
    fs::set_permissions(dest, metadata.permissions())?;

    // Preserve modification time (best effort)
    if let Ok(mtime) = metadata.modified() {
        filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime))?;
    }

    Ok(())
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    let mut options = fs_extra::dir::CopyOptions::new();
    options.copy_inside = true;

    fs_extra::dir::copy(src, dest, &options)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dest.display()))?;

    Ok(())
}
