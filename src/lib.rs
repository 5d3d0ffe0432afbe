//! Dotsling - a declarative dotfiles bootstrapper.
//!
//! This library provides the core functionality for dotsling, including:
//! - Ordered configuration document loading and OS-conditional merging
//! - Filesystem primitives (directories, symlinks, copies, removal)
//! - Process actions (shell commands, Git clones, package installs)
//! - Directive dispatch and clean mode

pub mod cfg;
pub mod engine;
pub mod fsops;
pub mod pkg;
pub mod proc;
pub mod ui;
