use chrono::Local;
use colored::Colorize;

use crate::models::{Scope, TabSet};

/// Plain one-line description used in pick lists
pub fn label(set: &TabSet) -> String {
    let star = if set.is_favorite { "★ " } else { "" };
    format!(
        "{}{} ({}, {} {})",
        star,
        set.name,
        scope_text(set),
        set.tabs.len(),
        if set.tabs.len() == 1 { "tab" } else { "tabs" }
    )
}

fn scope_text(set: &TabSet) -> String {
    match (set.effective_scope(), &set.branch) {
        (Scope::Branch, Some(branch)) => format!("branch {}", branch),
        (Scope::Branch, None) => "branch ?".to_string(),
        (Scope::Project, _) => "project".to_string(),
    }
}

/// Lists tab sets, one entry per set
pub fn print_tab_sets(sets: &[TabSet], current_branch: Option<&str>) {
    let heading = match current_branch {
        Some(branch) => format!("TAB SETS ON {}", branch),
        None => "TAB SETS".to_string(),
    };
    println!("{}  {}", "┃".bright_magenta(), heading.bold());

    if sets.is_empty() {
        println!("{}  No tab sets saved yet.", "┃".bright_magenta());
        return;
    }

    for (idx, set) in sets.iter().enumerate() {
        let star = if set.is_favorite {
            "★ ".yellow()
        } else {
            "".normal()
        };

        println!(
            "{}  {}. {}{} [{}] {} tabs",
            "┃".bright_magenta(),
            (idx + 1).to_string().bright_yellow(),
            star,
            set.name.bright_white().bold(),
            scope_text(set).bright_blue(),
            set.tabs.len()
        );
        println!(
            "{}     {}: {}",
            "┃".bright_magenta(),
            "Updated".bright_green(),
            set.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        );
        println!(
            "{}     {}: {}",
            "┃".bright_magenta(),
            "ID".bright_black(),
            set.id
        );

        if idx < sets.len() - 1 {
            println!(
                "{}  {}",
                "┃".bright_magenta(),
                "─".repeat(40).bright_black()
            );
        }
    }
}

/// Shows one tab set with its tabs as a tree
pub fn print_tab_set(set: &TabSet) {
    println!(
        "{}  {} {}",
        "┃".bright_magenta(),
        "TAB SET".bright_green().bold(),
        set.name.bold()
    );
    println!("{}", "─".repeat(60).bright_magenta());

    let scope = if set.is_legacy() {
        format!("{} (inferred)", scope_text(set))
    } else {
        scope_text(set)
    };
    println!("{}  {}: {}", "┃".bright_magenta(), "Scope".bright_blue(), scope);
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "Favorite".bright_yellow(),
        if set.is_favorite { "yes" } else { "no" }
    );
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "Created".bright_cyan(),
        set.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "Updated".bright_cyan(),
        set.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    println!("{}  {}: {}", "┃".bright_magenta(), "ID".bright_black(), set.id);
    println!("{}", "─".repeat(60).bright_magenta());

    if set.tabs.is_empty() {
        println!("{}  (no tabs)", "┃".bright_magenta());
        return;
    }

    for (i, tab) in set.tabs.iter().enumerate() {
        let connector = if i == set.tabs.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        println!(
            "{}  {}{} [{}] {}",
            "┃".bright_magenta(),
            connector,
            tab.file_name.bright_white(),
            tab.language_id.bright_black(),
            tab.uri.bright_black().italic()
        );
    }
}
