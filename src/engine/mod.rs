use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cfg::{self, Document, Platform};
use crate::fsops::{self, Outcome};
use crate::pkg::{self, PackageManager};
use crate::proc;
use crate::ui;

/// Which directive categories a run executes, resolved from the CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct RunOpts {
    pub replace: bool,
    pub directories: bool,
    pub link: bool,
    pub copy: bool,
    pub commands: bool,
    pub git_repos: bool,
    pub install_packages: bool,
}

/// Ambient state made explicit: paths in the config resolve against the
/// config file's directory, and OS-conditional sections are selected by the
/// detected platform.
#[derive(Debug, Clone)]
pub struct Context {
    pub base_dir: PathBuf,
    pub platform: Platform,
}

impl Context {
    pub fn new(base_dir: PathBuf, platform: Platform) -> Self {
        Context { base_dir, platform }
    }

    /// Expand `~` and resolve a relative path against the config directory.
    pub fn resolve(&self, raw: &str) -> PathBuf {
        let path = PathBuf::from(shellexpand::tilde(raw).into_owned());
        if path.is_absolute() {
            path
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Interpret the document: walk the top-level keys in declaration order and
/// execute every enabled directive. Unknown keys are ignored.
pub fn run(doc: &Document, ctx: &Context, opts: &RunOpts) -> Result<()> {
    let mut tally: BTreeMap<Outcome, usize> = BTreeMap::new();

    for key in doc.keys() {
        match key {
            "directories" if opts.directories => {
                for path in doc.list_section("directories", ctx.platform)? {
                    record(&mut tally, fsops::create_directory(&ctx.resolve(&path), opts.replace)?);
                }
            }
            "link" if opts.link => {
                for (src, dest) in doc.map_section("link", ctx.platform)? {
                    record(
                        &mut tally,
                        fsops::create_symlink(&ctx.resolve(&src), &ctx.resolve(&dest), opts.replace)?,
                    );
                }
            }
            "copy" if opts.copy => {
                for (src, dest) in doc.map_section("copy", ctx.platform)? {
                    record(
                        &mut tally,
                        fsops::copy_path(&ctx.resolve(&src), &ctx.resolve(&dest), opts.replace)?,
                    );
                }
            }
            "commands" if opts.commands => {
                for command in doc.list_section("commands", ctx.platform)? {
                    proc::run_command(&command, &ctx.base_dir)?;
                }
            }
            "git_repos" if opts.git_repos => {
                for (url, dest) in doc.map_section("git_repos", ctx.platform)? {
                    proc::clone_repo(&url, &ctx.resolve(&dest), &ctx.base_dir)?;
                }
            }
            other => {
                if let Some(manager) = PackageManager::from_key(other) {
                    if opts.install_packages {
                        let packages = doc.list_section(other, ctx.platform)?;
                        pkg::install_system_packages(manager, &packages, ctx.platform, &ctx.base_dir)?;
                    }
                }
            }
        }
    }

    print_tally(&tally);
    Ok(())
}

/// Undo a run: walk the document in reverse declaration order and delete
/// every path the path-creating directives would have made. Reverse order
/// removes nested targets (a repo cloned into a created directory) before
/// their parents. A path that is already gone is an error.
pub fn clean(doc: &Document, ctx: &Context) -> Result<()> {
    for key in doc.keys_reversed() {
        if key == cfg::SYSTEM_KEY {
            if let Some(section) = doc.system_section(ctx.platform) {
                clean(&section, ctx)?;
            }
        } else if cfg::PATH_DIRECTIVES.contains(&key) {
            clean_targets(doc, key, ctx)?;
        }
    }

    Ok(())
}

fn clean_targets(doc: &Document, key: &str, ctx: &Context) -> Result<()> {
    let mut targets: Vec<String> = if key == "directories" {
        doc.local_list(key)?
    } else {
        doc.local_map(key)?.into_iter().map(|(_, dest)| dest).collect()
    };
    targets.reverse();

    for target in targets {
        let path = ctx.resolve(&target);
        ui::info(&format!("Deleting {}", path.display()));
        fsops::remove_path(&path)?;
    }

    Ok(())
}

fn record(tally: &mut BTreeMap<Outcome, usize>, outcome: Outcome) {
    *tally.entry(outcome).or_insert(0) += 1;
}

fn print_tally(tally: &BTreeMap<Outcome, usize>) {
    if tally.is_empty() {
        return;
    }

    let summary = tally
        .iter()
        .map(|(outcome, count)| format!("{}: {}", outcome.color_str(), count))
        .collect::<Vec<_>>()
        .join(", ");

    println!("{}", summary);
}
