//! Contact list ordering and filtering.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::types::Contact;

/// How the contact list is presented to the current user.
#[derive(Debug, Clone, Default)]
pub struct ContactView {
    /// The signed-in user's id; never listed
    pub self_id: Option<String>,
    /// Ids currently reported online by the presence service
    pub online: HashSet<String>,
    /// Hide offline contacts
    pub online_only: bool,
}

impl ContactView {
    pub fn new(self_id: Option<String>, online: impl IntoIterator<Item = String>) -> Self {
        Self {
            self_id,
            online: online.into_iter().collect(),
            online_only: false,
        }
    }

    pub fn online_only(mut self, online_only: bool) -> Self {
        self.online_only = online_only;
        self
    }

    pub fn is_online(&self, contact: &Contact) -> bool {
        self.online.contains(&contact.id)
    }

    /// Drop the current user, put online contacts first, then sort by name.
    pub fn arrange(&self, contacts: &[Contact]) -> Vec<Contact> {
        let mut arranged: Vec<Contact> = contacts
            .iter()
            .filter(|c| self.self_id.as_deref() != Some(c.id.as_str()))
            .filter(|c| !self.online_only || self.is_online(c))
            .cloned()
            .collect();

        arranged.sort_by(|a, b| {
            self.is_online(b)
                .cmp(&self.is_online(a))
                .then_with(|| compare_names(&a.full_name, &b.full_name))
        });
        arranged
    }

    /// Online users, not counting the current user.
    pub fn online_count(&self) -> usize {
        self.online
            .iter()
            .filter(|id| self.self_id.as_deref() != Some(id.as_str()))
            .count()
    }
}

/// Case-insensitive name order with a stable tie-break on the raw string.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
