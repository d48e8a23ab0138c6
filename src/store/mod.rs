//! The state container. Owns every persisted list and is the only writer of
//! them; each mutation mirrors the affected list back to storage before it
//! returns.

mod accounts;
mod assignments;
mod submissions;

pub use accounts::Registration;
pub use assignments::{AssignmentDraft, AssignmentEdit};
pub use submissions::Score;

use crate::identity;
use crate::kv::{self, KeyValueStore};
use crate::model::{Account, Assignment, Submission};

pub struct Tracker {
    kv: Box<dyn KeyValueStore>,
    accounts: Vec<Account>,
    assignments: Vec<Assignment>,
    submissions: Vec<Submission>,
}

impl Tracker {
    /// Loads all lists and applies the one-time owner-key migration.
    pub fn load(kv: Box<dyn KeyValueStore>) -> Self {
        let accounts = kv::load_list(kv.as_ref(), kv::ACCOUNTS_KEY);
        let assignments = kv::load_list(kv.as_ref(), kv::ASSIGNMENTS_KEY);
        let submissions = kv::load_list(kv.as_ref(), kv::SUBMISSIONS_KEY);
        let mut tracker = Self {
            kv,
            accounts,
            assignments,
            submissions,
        };
        if identity::migrate_assignments(&mut tracker.assignments) {
            tracing::info!("migrated legacy assignment owner keys");
            tracker.persist_assignments();
        }
        tracing::debug!(
            accounts = tracker.accounts.len(),
            assignments = tracker.assignments.len(),
            submissions = tracker.submissions.len(),
            "tracker loaded"
        );
        tracker
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    fn persist_accounts(&mut self) {
        kv::save_list(self.kv.as_mut(), kv::ACCOUNTS_KEY, &self.accounts);
    }

    fn persist_assignments(&mut self) {
        kv::save_list(self.kv.as_mut(), kv::ASSIGNMENTS_KEY, &self.assignments);
    }

    fn persist_submissions(&mut self) {
        kv::save_list(self.kv.as_mut(), kv::SUBMISSIONS_KEY, &self.submissions);
    }
}

/// `max(existing) + 1`, or 1 for an empty list. `None` once the maximum is `i64::MAX`.
fn next_id(ids: impl Iterator<Item = i64>) -> Option<i64> {
    match ids.max() {
        Some(m) => m.checked_add(1),
        None => Some(1),
    }
}
