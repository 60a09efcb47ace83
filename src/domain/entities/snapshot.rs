//! Full in-memory image of the persisted document.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{LinkRecord, UserAccount};

/// Both tables of the backing document.
///
/// A snapshot is loaded whole at the start of every operation and written back
/// whole after every mutation. Lookups are linear scans; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users_table: Vec<UserAccount>,
    #[serde(default)]
    pub links_table: Vec<LinkRecord>,
}

impl Snapshot {
    pub fn find_link_by_slug(&self, slug: &str) -> Option<&LinkRecord> {
        self.links_table.iter().find(|l| l.short_slug == slug)
    }

    pub fn find_link_by_slug_mut(&mut self, slug: &str) -> Option<&mut LinkRecord> {
        self.links_table.iter_mut().find(|l| l.short_slug == slug)
    }

    pub fn find_link_by_url(&self, url: &str) -> Option<&LinkRecord> {
        self.links_table.iter().find(|l| l.original_url == url)
    }

    pub fn find_user(&self, username: &str) -> Option<&UserAccount> {
        self.users_table.iter().find(|u| u.username == username)
    }

    /// Every slug currently in use.
    pub fn slugs(&self) -> HashSet<&str> {
        self.links_table
            .iter()
            .map(|l| l.short_slug.as_str())
            .collect()
    }
}
