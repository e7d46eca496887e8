//! Command-line front end: argument parsing, prompts, the commands themselves,
//! and printing their results.

pub mod args;
pub mod commands;
pub mod display;
pub mod prompt;

use anyhow::Context;
use std::path::PathBuf;

use crate::cli::args::{Args, Commands};
use crate::cli::commands::{CommandOutcome, SaveOptions, Workbench};
use crate::cli::prompt::TerminalPrompter;
use crate::config::Config;
use crate::git::GitBranchResolver;
use crate::host::EditorHost;
use crate::models::TabSetStore;

/// Runs one command against the workspace named by `args`
pub async fn execute(args: Args) -> anyhow::Result<()> {
    let workspace: Option<PathBuf> = args
        .workspace
        .clone()
        .or_else(|| std::env::current_dir().ok());

    let config = match &args.config {
        Some(path) => Config::load_from_file(path),
        None => Config::load(workspace.as_deref()),
    }
    .context("Failed to load settings")?;

    let store = TabSetStore::initialize(workspace.as_deref())?;
    let workspace = workspace.context("Failed to determine the workspace folder")?;

    let files = match &args.command {
        Commands::Save(save) => save.files.clone(),
        _ => Vec::new(),
    };
    let host = EditorHost::new(&files, &workspace).with_editor(args.editor.clone());
    let resolver = GitBranchResolver::new();
    let mut prompter = TerminalPrompter::stdio();

    let mut bench = Workbench::new(&store, &resolver, &host, &mut prompter, config, &workspace);

    let outcome = match args.command {
        Commands::Save(save) => {
            let favorite = save.favorite_flag();
            bench
                .save_tab_set(SaveOptions {
                    name: save.name,
                    scope: save.scope.map(Into::into),
                    favorite,
                    all_files: save.all,
                })
                .await
        }
        Commands::Open(open) => bench.open_tab_set(open.tab_set.as_deref(), open.replace).await,
        Commands::Restore(restore) => bench.restore_branch_tabs(restore.replace).await,
        Commands::Rename(rename) => {
            bench
                .rename_tab_set(rename.tab_set.as_deref(), rename.name.as_deref())
                .await
        }
        Commands::Delete(delete) => bench.delete_tab_set(delete.tab_set.as_deref(), delete.yes).await,
        Commands::Favorite(favorite) => bench.toggle_favorite(favorite.tab_set.as_deref()).await,
        Commands::Favorites(favorites) => {
            bench
                .list_favorites(favorites.tab_set.as_deref(), favorites.replace)
                .await
        }
        Commands::List(list) => bench.list(list.all).await,
        Commands::Show(show) => bench.show(show.tab_set.as_deref()).await,
    }
    .with_context(|| format!("Tab sets in {}", store.location().display()))?;

    match outcome {
        CommandOutcome::Listed { sets, branch } => display::print_tab_sets(&sets, branch.as_deref()),
        CommandOutcome::Shown(set) => display::print_tab_set(&set),
        _ => {}
    }

    Ok(())
}
