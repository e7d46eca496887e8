use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::Scope;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    name = "tabhero",
    about = "Save, restore and organize sets of open editor tabs",
    long_about = None
)]
pub struct Args {
    /// Workspace folder (defaults to the current directory)
    #[arg(long, short = 'w', global = true)]
    pub workspace: Option<PathBuf>,

    /// Read settings from this file only
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Editor command used to open tab sets (defaults to $VISUAL, $EDITOR)
    #[arg(long, global = true)]
    pub editor: Option<String>,

    /// Log collaborator calls to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Save the given files as a new tab set
    Save(SaveCommand),
    /// Open a tab set available on the current branch
    Open(OpenCommand),
    /// Open the most recent tab set saved on the current branch
    Restore(RestoreCommand),
    /// Rename a tab set
    Rename(RenameCommand),
    /// Delete a tab set
    #[command(visible_alias = "rm")]
    Delete(DeleteCommand),
    /// Mark or unmark a tab set as favorite
    #[command(visible_alias = "fav")]
    Favorite(FavoriteCommand),
    /// Pick a favorite tab set and open it
    Favorites(FavoritesCommand),
    /// List tab sets
    #[command(visible_alias = "ls")]
    List(ListCommand),
    /// Show the tabs in a tab set
    #[command(visible_alias = "cat")]
    Show(ShowCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    Branch,
    Project,
}

impl From<ScopeArg> for Scope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::Branch => Scope::Branch,
            ScopeArg::Project => Scope::Project,
        }
    }
}

#[derive(Debug, Parser)]
pub struct SaveCommand {
    /// Files that make up the tab set
    pub files: Vec<PathBuf>,
    #[arg(long, short)]
    pub name: Option<String>,
    #[arg(long, short, value_enum)]
    pub scope: Option<ScopeArg>,
    #[arg(long, conflicts_with = "no_favorite")]
    pub favorite: bool,
    #[arg(long)]
    pub no_favorite: bool,
    /// Keep every file without asking
    #[arg(long, short)]
    pub all: bool,
}

impl SaveCommand {
    pub fn favorite_flag(&self) -> Option<bool> {
        match (self.favorite, self.no_favorite) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Parser)]
pub struct OpenCommand {
    /// Id or name of the tab set
    pub tab_set: Option<String>,
    /// Close open tabs first
    #[arg(long, short)]
    pub replace: bool,
}

#[derive(Debug, Parser)]
pub struct RestoreCommand {
    /// Close open tabs first
    #[arg(long, short)]
    pub replace: bool,
}

#[derive(Debug, Parser)]
pub struct RenameCommand {
    pub tab_set: Option<String>,
    /// New name
    #[arg(long, short)]
    pub name: Option<String>,
}

#[derive(Debug, Parser)]
pub struct DeleteCommand {
    pub tab_set: Option<String>,
    /// Do not ask for confirmation
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Parser)]
pub struct FavoriteCommand {
    pub tab_set: Option<String>,
}

#[derive(Debug, Parser)]
pub struct FavoritesCommand {
    pub tab_set: Option<String>,
    #[arg(long, short)]
    pub replace: bool,
}

#[derive(Debug, Parser)]
pub struct ListCommand {
    /// Include sets from other branches
    #[arg(long, short)]
    pub all: bool,
}

#[derive(Debug, Parser)]
pub struct ShowCommand {
    pub tab_set: Option<String>,
}
