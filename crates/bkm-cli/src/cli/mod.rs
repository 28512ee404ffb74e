//! CLI for the BKM bookmark manager.

mod commands;
mod feedback;

use anyhow::Result;
use bkm_core::actions;
use bkm_core::config;
use bkm_core::{BookmarkStore, FileSlot};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    run_add, run_categories, run_check, run_completions, run_list, run_remove, run_visit,
};
use feedback::ConsoleNotifier;

/// Top-level CLI for the BKM bookmark manager.
#[derive(Debug, Parser)]
#[command(name = "bkm")]
#[command(about = "BKM: keep, search and open your bookmarks", long_about = None)]
pub struct Cli {
    /// Bookmark file to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add a bookmark.
    Add {
        /// Site name (first word at least 3 characters).
        name: String,
        /// Site URL, with or without http(s)://.
        url: String,
        /// Category; the configured default when omitted.
        #[arg(long, short, default_value = "")]
        category: String,
    },

    /// List bookmarks, optionally filtered and sorted.
    List {
        /// Case-insensitive text to look for in name or URL.
        #[arg(long, short, default_value = "")]
        search: String,
        /// Only show this category (exact match).
        #[arg(long, short, default_value = "")]
        category: String,
        /// newest, oldest, nameAsc, nameDesc or none (default from config).
        #[arg(long, value_name = "KEY")]
        sort: Option<String>,
    },

    /// Delete a bookmark by its ID.
    Remove {
        /// Bookmark identifier.
        id: u64,
        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },

    /// Print the URL to open for a bookmark.
    Visit {
        /// Bookmark identifier.
        id: u64,
    },

    /// List the categories in use.
    Categories,

    /// Check a name and URL without adding them.
    Check {
        name: String,
        url: String,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let path = match cli.store {
            Some(p) => p,
            None => cfg.resolved_storage_path()?,
        };

        let (store, report) = BookmarkStore::open(FileSlot::new(&path))?;
        let mut store = store.with_default_category(cfg.default_category.as_str());
        let mut notifier = ConsoleNotifier;
        actions::report_load(&report, &mut notifier);

        match cli.command {
            CliCommand::Add {
                name,
                url,
                category,
            } => run_add(&mut store, &name, &url, &category, &mut notifier)?,
            CliCommand::List {
                search,
                category,
                sort,
            } => {
                let sort = sort.unwrap_or_else(|| cfg.default_sort.clone());
                run_list(&store, &search, &category, &sort)?;
            }
            CliCommand::Remove { id, yes } => {
                let ask = cfg.confirm_delete && !yes;
                run_remove(&mut store, id, ask, &mut notifier)?;
            }
            CliCommand::Visit { id } => run_visit(&store, id)?,
            CliCommand::Categories => run_categories(&store)?,
            CliCommand::Check { name, url } => run_check(&store, &name, &url)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
