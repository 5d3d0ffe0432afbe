use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use dotsling::cfg::{self, Platform};
use dotsling::engine::{self, Context, RunOpts};
use dotsling::ui;

/// Dotsling - declarative machine setup from a single JSON config
#[derive(Parser)]
#[command(name = "dotsling")]
#[command(author, version, long_about = None)]
struct Cli {
    /// Path to the JSON config file
    config: PathBuf,

    /// Run every directive category and replace existing paths
    #[arg(short, long)]
    firstrun: bool,

    /// Delete existing paths instead of prompting before overwrites
    #[arg(short, long)]
    replace: bool,

    /// Skip creating symlinks
    #[arg(long)]
    no_link: bool,

    /// Skip copying paths
    #[arg(long)]
    no_copy: bool,

    /// Skip creating directories
    #[arg(long)]
    no_directories: bool,

    /// Run shell commands
    #[arg(long)]
    commands: bool,

    /// Install packages with the system package manager
    #[arg(long)]
    install_packages: bool,

    /// Clone Git repos
    #[arg(long)]
    git_repos: bool,

    /// Remove every path the config creates, in reverse order
    #[arg(long)]
    clean: bool,
}

impl Cli {
    fn run_opts(&self) -> RunOpts {
        if self.firstrun {
            return RunOpts {
                replace: true,
                directories: true,
                link: true,
                copy: true,
                commands: true,
                git_repos: true,
                install_packages: true,
            };
        }

        RunOpts {
            replace: self.replace,
            directories: !self.no_directories,
            link: !self.no_link,
            copy: !self.no_copy,
            commands: self.commands,
            git_repos: self.git_repos,
            install_packages: self.install_packages,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    ui::init();

    if let Err(e) = run(&cli) {
        ui::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let (doc, base_dir) = cfg::load(&cli.config)?;
    let ctx = Context::new(base_dir, Platform::detect());

    if cli.clean {
        engine::clean(&doc, &ctx)?;
        ui::success("Removed all files!");
        return Ok(());
    }

    engine::run(&doc, &ctx, &cli.run_opts())?;
    ui::success("Done!");

    Ok(())
}
