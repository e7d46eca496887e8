use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::TabReference;

/// Where a tab set is offered for restore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Only on the branch the set was saved from
    Branch,
    /// On every branch, and outside version control
    Project,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Branch => "branch",
            Scope::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, persisted group of tabs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub branch: Option<String>,
    /// Absent on records written before scopes existed; never backfilled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub tabs: Vec<TabReference>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Input for creating a new tab set
#[derive(Debug, Clone, Default)]
pub struct NewTabSet {
    pub name: String,
    pub tabs: Vec<TabReference>,
    pub branch: Option<String>,
    pub is_favorite: bool,
    pub scope: Option<Scope>,
}

impl TabSet {
    pub fn new(input: NewTabSet) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            branch: input.branch,
            scope: input.scope,
            tabs: input.tabs,
            created_at: now,
            updated_at: now,
            is_favorite: input.is_favorite,
        }
    }

    /// Marks the set as modified. The new stamp is always strictly later than the old one.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::milliseconds(1)
        };
    }

    pub fn rename(&mut self, name: String) {
        self.name = name;
        self.touch();
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.touch();
        self.is_favorite
    }

    /// The scope the set behaves as. Legacy sets with a branch act branch-scoped,
    /// legacy sets without one act project-scoped.
    pub fn effective_scope(&self) -> Scope {
        match (self.scope, &self.branch) {
            (Some(scope), _) => scope,
            (None, Some(_)) => Scope::Branch,
            (None, None) => Scope::Project,
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.scope.is_none()
    }

    /// Whether the set is offered when `current_branch` is checked out.
    /// `None` means no branch could be determined.
    pub fn is_visible_on(&self, current_branch: Option<&str>) -> bool {
        match self.effective_scope() {
            Scope::Project => true,
            Scope::Branch => match (self.branch.as_deref(), current_branch) {
                (Some(own), Some(current)) => own == current,
                _ => false,
            },
        }
    }
}

/// Orders sets for pick lists: favorites first, then most recently updated.
/// Stable, so equal keys keep document order.
pub fn sort_for_display(sets: &mut [TabSet]) {
    sets.sort_by(|a, b| {
        b.is_favorite
            .cmp(&a.is_favorite)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(DateTime<Utc>),
    Millis(i64),
}

// Older documents stored epoch milliseconds
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(stamp) => Ok(stamp),
        RawTimestamp::Millis(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", millis))),
    }
}
