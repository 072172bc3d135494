use std::collections::BTreeSet;

use crate::{Identity, Posting};

/// Identities of postings that were already notified.
///
/// Backed by a `BTreeSet` so iteration is sorted, which keeps the persisted
/// form stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeenSet {
    ids: BTreeSet<Identity>,
}

/// Result of diffing extracted postings against a [`SeenSet`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    /// Not seen before, in extraction order.
    pub fresh: Vec<Posting>,
    /// Already notified on an earlier run.
    pub known: Vec<Posting>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.ids.contains(identity)
    }

    /// Returns `true` if the identity was not present yet.
    pub fn insert(&mut self, identity: Identity) -> bool {
        self.ids.insert(identity)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sorted ascending.
    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.ids.iter()
    }

    pub fn partition(&self, postings: Vec<Posting>) -> Partition {
        let (known, fresh) = postings
            .into_iter()
            .partition(|posting| self.contains(&posting.identity));
        Partition { fresh, known }
    }

    /// Marks every posting as seen, listed in a message or not.
    pub fn mark_seen<'a>(&mut self, postings: impl IntoIterator<Item = &'a Posting>) {
        for posting in postings {
            self.ids.insert(posting.identity.clone());
        }
    }
}

impl FromIterator<Identity> for SeenSet {
    fn from_iter<I: IntoIterator<Item = Identity>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
