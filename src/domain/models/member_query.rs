use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Member, MemberKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Salary,
    /// Sorts by last name, then first name.
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Filtering and ordering applied to the squad listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberQuery {
    kind: Option<MemberKind>,
    name: Option<String>,
    sort: Option<(SortKey, SortOrder)>,
}

impl MemberQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: MemberKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Case-insensitive substring match on the full name. Blank input is ignored.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = if name.trim().is_empty() {
            None
        } else {
            Some(name.trim().to_lowercase())
        };
        self
    }

    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some((key, order));
        self
    }

    pub fn kind(&self) -> Option<MemberKind> {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn sort(&self) -> Option<(SortKey, SortOrder)> {
        self.sort
    }

    pub fn matches(&self, member: &Member) -> bool {
        if let Some(kind) = self.kind {
            if member.kind() != kind {
                return false;
            }
        }

        if let Some(name) = &self.name {
            if !member.full_name().to_lowercase().contains(name.as_str()) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, members: Vec<Member>) -> Vec<Member> {
        let mut selected: Vec<Member> = members.into_iter().filter(|m| self.matches(m)).collect();

        if let Some((key, order)) = self.sort {
            selected.sort_by(|a, b| {
                let ordering = match key {
                    SortKey::Salary => a.salary().partial_cmp(&b.salary()).unwrap_or(Ordering::Equal),
                    SortKey::Name => a
                        .last_name()
                        .to_lowercase()
                        .cmp(&b.last_name().to_lowercase())
                        .then_with(|| a.first_name().to_lowercase().cmp(&b.first_name().to_lowercase())),
                };
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        selected
    }
}
