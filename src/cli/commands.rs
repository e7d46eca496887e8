//! The user commands. Each one asks its questions through a [`Prompter`],
//! talks to the store, and drives the host to open tabs.

use chrono::Local;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::cli::display;
use crate::cli::prompt::Prompter;
use crate::config::Config;
use crate::error::Result;
use crate::git::BranchResolver;
use crate::host::TabHost;
use crate::models::{
    DocumentBackend, NewTabSet, Scope, TabReference, TabSet, TabSetStore, sort_for_display,
};

/// What a command ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Saved(TabSet),
    Opened { tab_set: TabSet, opened: usize },
    Renamed { id: String, name: String },
    Deleted { id: String },
    FavoriteToggled { id: String, is_favorite: bool },
    Listed { sets: Vec<TabSet>, branch: Option<String> },
    Shown(TabSet),
    /// The user backed out of a prompt
    Cancelled,
    /// Nothing to act on; the message has already been shown
    Unavailable(String),
}

/// Pre-answered save questions, from command-line flags
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    pub name: Option<String>,
    pub scope: Option<Scope>,
    pub favorite: Option<bool>,
    /// Skip file selection and keep every open tab
    pub all_files: bool,
}

enum Pick {
    Chosen(TabSet),
    Cancelled,
    NotFound(String),
}

pub struct Workbench<'a, B, R, H, P> {
    store: &'a TabSetStore<B>,
    resolver: &'a R,
    host: &'a H,
    prompter: &'a mut P,
    config: Config,
    workspace: &'a Path,
}

impl<'a, B, R, H, P> Workbench<'a, B, R, H, P>
where
    B: DocumentBackend,
    R: BranchResolver,
    H: TabHost,
    P: Prompter,
{
    pub fn new(
        store: &'a TabSetStore<B>,
        resolver: &'a R,
        host: &'a H,
        prompter: &'a mut P,
        config: Config,
        workspace: &'a Path,
    ) -> Self {
        Self {
            store,
            resolver,
            host,
            prompter,
            config,
            workspace,
        }
    }

    /// Branch to scope by, or `None` when scoping is off or there is no branch
    pub async fn current_branch(&self) -> Option<String> {
        if !self.config.git_branch_scoping {
            return None;
        }
        if !self.resolver.is_repository(self.workspace).await {
            debug!(workspace = %self.workspace.display(), "workspace is not a git repository");
            return None;
        }
        self.resolver.current_branch(self.workspace).await
    }

    pub async fn save_tab_set(&mut self, options: SaveOptions) -> Result<CommandOutcome> {
        if options.favorite == Some(true) && !self.config.favorites {
            return Ok(self.unavailable("Favorites are disabled"));
        }
        let open_tabs = dedupe_by_uri(self.host.open_tabs());
        if open_tabs.is_empty() {
            return Ok(self.unavailable("No open tabs to save"));
        }

        let branch = self.current_branch().await;

        let scope = match (options.scope, branch.as_deref()) {
            (Some(Scope::Branch), None) => {
                return Ok(self.unavailable("Branch scope needs a git branch; none was detected"));
            }
            (Some(scope), _) => scope,
            (None, Some(branch)) => {
                let choices = vec![
                    format!("Branch: only on '{}'", branch),
                    "Project: on every branch".to_string(),
                ];
                match self.prompter.select("Where should this tab set be available?", &choices)? {
                    Some(0) => Scope::Branch,
                    Some(_) => Scope::Project,
                    None => return Ok(CommandOutcome::Cancelled),
                }
            }
            (None, None) => Scope::Project,
        };

        let tabs = if self.config.file_selection && !options.all_files && open_tabs.len() > 1 {
            let items: Vec<String> = open_tabs
                .iter()
                .map(|t| format!("{}  {}", t.file_name, t.uri))
                .collect();
            let Some(picked) = self.prompter.multi_select("Files to include", &items)? else {
                return Ok(CommandOutcome::Cancelled);
            };
            if picked.is_empty() {
                self.prompter.info("No files selected");
                return Ok(CommandOutcome::Cancelled);
            }
            picked.into_iter().map(|i| open_tabs[i].clone()).collect()
        } else {
            open_tabs
        };

        let suggested = default_name(branch.as_deref());
        let name = match options.name.filter(|n| !n.trim().is_empty()) {
            Some(name) => name.trim().to_string(),
            None if self.config.naming => match self.ask_name(&suggested)? {
                Some(name) => name,
                None => return Ok(CommandOutcome::Cancelled),
            },
            None => suggested,
        };

        let is_favorite = match options.favorite {
            Some(favorite) => favorite,
            None if self.config.favorites => {
                match self.prompter.confirm("Mark as favorite?", false)? {
                    Some(favorite) => favorite,
                    None => return Ok(CommandOutcome::Cancelled),
                }
            }
            None => false,
        };

        let tab_set = self.store.save(NewTabSet {
            name,
            tabs,
            branch: match scope {
                Scope::Branch => branch,
                Scope::Project => None,
            },
            is_favorite,
            scope: Some(scope),
        });

        self.prompter.info(&format!(
            "Saved tab set '{}' with {} tabs",
            tab_set.name,
            tab_set.tabs.len()
        ));
        Ok(CommandOutcome::Saved(tab_set))
    }

    pub async fn open_tab_set(
        &mut self,
        selector: Option<&str>,
        replace: bool,
    ) -> Result<CommandOutcome> {
        let branch = self.current_branch().await;
        let candidates = if self.config.git_branch_scoping {
            self.store.get_by_scope(branch.as_deref())
        } else {
            self.store.get_all()
        };

        if candidates.is_empty() {
            let message = match &branch {
                Some(branch) => format!("No tab sets available on branch '{}'", branch),
                None => "No tab sets saved in this workspace".to_string(),
            };
            return Ok(self.unavailable(&message));
        }

        match self.pick(candidates, selector, "Open which tab set?")? {
            Pick::Chosen(set) => self.open_set(set, replace).await,
            Pick::Cancelled => Ok(CommandOutcome::Cancelled),
            Pick::NotFound(message) => Ok(self.unavailable(&message)),
        }
    }

    pub async fn restore_branch_tabs(&mut self, replace: bool) -> Result<CommandOutcome> {
        if !self.config.git_branch_scoping {
            return Ok(self.unavailable("Git branch scoping is disabled"));
        }
        let Some(branch) = self.current_branch().await else {
            return Ok(self.unavailable("No git branch detected in this workspace"));
        };
        let Some(set) = self.store.get_latest_for_branch(&branch) else {
            return Ok(self.unavailable(&format!("No tab sets saved for branch '{}'", branch)));
        };

        self.open_set(set, replace).await
    }

    pub async fn rename_tab_set(
        &mut self,
        selector: Option<&str>,
        new_name: Option<&str>,
    ) -> Result<CommandOutcome> {
        let set = match self.pick_from_all(selector, "Rename which tab set?")? {
            Ok(set) => set,
            Err(outcome) => return Ok(outcome),
        };

        let name = match new_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => match self.ask_name(&set.name)? {
                Some(name) => name,
                None => return Ok(CommandOutcome::Cancelled),
            },
        };

        if !self.store.rename(&set.id, &name) {
            return Ok(self.unavailable("That tab set no longer exists"));
        }
        self.prompter
            .info(&format!("Renamed '{}' to '{}'", set.name, name));
        Ok(CommandOutcome::Renamed { id: set.id, name })
    }

    pub async fn delete_tab_set(
        &mut self,
        selector: Option<&str>,
        assume_yes: bool,
    ) -> Result<CommandOutcome> {
        let set = match self.pick_from_all(selector, "Delete which tab set?")? {
            Ok(set) => set,
            Err(outcome) => return Ok(outcome),
        };

        if !assume_yes {
            let question = format!("Delete tab set '{}'?", set.name);
            if self.prompter.confirm(&question, false)? != Some(true) {
                return Ok(CommandOutcome::Cancelled);
            }
        }

        if !self.store.delete(&set.id) {
            return Ok(self.unavailable("That tab set no longer exists"));
        }
        self.prompter.info(&format!("Deleted tab set '{}'", set.name));
        Ok(CommandOutcome::Deleted { id: set.id })
    }

    pub async fn toggle_favorite(&mut self, selector: Option<&str>) -> Result<CommandOutcome> {
        if !self.config.favorites {
            return Ok(self.unavailable("Favorites are disabled"));
        }
        let set = match self.pick_from_all(selector, "Toggle favorite on which tab set?")? {
            Ok(set) => set,
            Err(outcome) => return Ok(outcome),
        };

        let Some(is_favorite) = self.store.toggle_favorite(&set.id) else {
            return Ok(self.unavailable("That tab set no longer exists"));
        };
        let message = if is_favorite {
            format!("Added '{}' to favorites", set.name)
        } else {
            format!("Removed '{}' from favorites", set.name)
        };
        self.prompter.info(&message);
        Ok(CommandOutcome::FavoriteToggled {
            id: set.id,
            is_favorite,
        })
    }

    pub async fn list_favorites(
        &mut self,
        selector: Option<&str>,
        replace: bool,
    ) -> Result<CommandOutcome> {
        if !self.config.favorites {
            return Ok(self.unavailable("Favorites are disabled"));
        }
        let favorites = self.store.get_favorites();
        if favorites.is_empty() {
            return Ok(self.unavailable("No favorite tab sets yet"));
        }

        match self.pick(favorites, selector, "Open which favorite?")? {
            Pick::Chosen(set) => self.open_set(set, replace).await,
            Pick::Cancelled => Ok(CommandOutcome::Cancelled),
            Pick::NotFound(message) => Ok(self.unavailable(&message)),
        }
    }

    /// Sets visible on the current branch, or every set with `all`
    pub async fn list(&mut self, all: bool) -> Result<CommandOutcome> {
        let branch = self.current_branch().await;
        let mut sets = if all || !self.config.git_branch_scoping {
            self.store.get_all()
        } else {
            self.store.get_by_scope(branch.as_deref())
        };
        sort_for_display(&mut sets);
        Ok(CommandOutcome::Listed {
            sets,
            branch: if all { None } else { branch },
        })
    }

    pub async fn show(&mut self, selector: Option<&str>) -> Result<CommandOutcome> {
        match self.pick_from_all(selector, "Show which tab set?")? {
            Ok(set) => Ok(CommandOutcome::Shown(set)),
            Err(outcome) => Ok(outcome),
        }
    }

    async fn open_set(&mut self, set: TabSet, replace: bool) -> Result<CommandOutcome> {
        if set.tabs.is_empty() {
            self.prompter
                .info(&format!("Tab set '{}' has no tabs", set.name));
            return Ok(CommandOutcome::Opened {
                tab_set: set,
                opened: 0,
            });
        }

        if replace {
            self.host.close_all().await?;
        }
        let opened = self.host.open(&set.tabs).await?;

        let skipped = set.tabs.len().saturating_sub(opened);
        if skipped > 0 {
            self.prompter
                .warn(&format!("{} files from '{}' could not be opened", skipped, set.name));
        }
        self.prompter
            .info(&format!("Opened {} tabs from '{}'", opened, set.name));
        Ok(CommandOutcome::Opened {
            tab_set: set,
            opened,
        })
    }

    fn pick_from_all(
        &mut self,
        selector: Option<&str>,
        title: &str,
    ) -> Result<std::result::Result<TabSet, CommandOutcome>> {
        let all = self.store.get_all();
        if all.is_empty() {
            return Ok(Err(self.unavailable("No tab sets saved in this workspace")));
        }

        Ok(match self.pick(all, selector, title)? {
            Pick::Chosen(set) => Ok(set),
            Pick::Cancelled => Err(CommandOutcome::Cancelled),
            Pick::NotFound(message) => Err(self.unavailable(&message)),
        })
    }

    fn pick(&mut self, mut sets: Vec<TabSet>, selector: Option<&str>, title: &str) -> Result<Pick> {
        sort_for_display(&mut sets);

        if let Some(selector) = selector {
            return Ok(match find_tab_set(&sets, selector) {
                Some(idx) => Pick::Chosen(sets.swap_remove(idx)),
                None => Pick::NotFound(format!("No tab set found matching '{}'", selector)),
            });
        }

        let labels: Vec<String> = sets.iter().map(display::label).collect();
        Ok(match self.prompter.select(title, &labels)? {
            Some(idx) if idx < sets.len() => Pick::Chosen(sets.swap_remove(idx)),
            _ => Pick::Cancelled,
        })
    }

    /// Asks until a non-empty name is given
    fn ask_name(&mut self, suggested: &str) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.prompter.input("Tab set name", Some(suggested))? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(Some(answer.to_string()));
            }
            self.prompter.warn("Name cannot be empty");
        }
    }

    fn unavailable(&mut self, message: &str) -> CommandOutcome {
        self.prompter.info(message);
        CommandOutcome::Unavailable(message.to_string())
    }
}

/// Drops repeated URIs, keeping the first occurrence
pub fn dedupe_by_uri(tabs: Vec<TabReference>) -> Vec<TabReference> {
    let mut seen = HashSet::new();
    tabs.into_iter()
        .filter(|tab| seen.insert(tab.uri.clone()))
        .collect()
}

/// Exact id, then exact name, then partial name; names compare case-insensitively
pub fn find_tab_set(sets: &[TabSet], selector: &str) -> Option<usize> {
    if let Some(idx) = sets.iter().position(|s| s.id == selector) {
        return Some(idx);
    }

    let wanted = selector.to_lowercase();
    sets.iter()
        .position(|s| s.name.to_lowercase() == wanted)
        .or_else(|| {
            sets.iter()
                .position(|s| s.name.to_lowercase().contains(&wanted))
        })
}

pub fn default_name(branch: Option<&str>) -> String {
    format!(
        "{} {}",
        branch.unwrap_or("Tabs"),
        Local::now().format("%Y-%m-%d %H:%M")
    )
}
