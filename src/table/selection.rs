//! Checkbox selection over ticket ids

use std::collections::BTreeSet;

use crate::types::TicketId;

/// Set of ticket ids ticked in the results table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<TicketId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one checkbox change.
    pub fn set(&mut self, id: &TicketId, checked: bool) {
        if checked {
            self.ids.insert(id.clone());
        } else {
            self.ids.remove(id);
        }
    }

    pub fn contains(&self, id: &TicketId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the whole selection.
    pub fn replace<I: IntoIterator<Item = TicketId>>(&mut self, ids: I) {
        self.ids = ids.into_iter().collect();
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&TicketId) -> bool) {
        self.ids.retain(|id| keep(id));
    }

    pub fn iter(&self) -> impl Iterator<Item = &TicketId> {
        self.ids.iter()
    }
}

impl FromIterator<TicketId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = TicketId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TicketId {
        TicketId::new_unchecked(s)
    }

    #[test]
    fn test_set_and_unset() {
        let mut selection = SelectionSet::new();
        selection.set(&id("1"), true);
        selection.set(&id("2"), true);
        selection.set(&id("1"), false);
        assert_eq!(selection.len(), 1);
        assert!(selection.contains(&id("2")));
        assert!(!selection.contains(&id("1")));
    }

    #[test]
    fn test_replace_and_retain() {
        let mut selection: SelectionSet = [id("1"), id("2"), id("3")].into_iter().collect();
        selection.retain(|t| t.as_str() != "2");
        assert_eq!(
            selection.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
            vec!["1", "3"]
        );

        selection.replace([id("9")]);
        assert_eq!(selection.len(), 1);
        selection.clear();
        assert!(selection.is_empty());
    }
}
