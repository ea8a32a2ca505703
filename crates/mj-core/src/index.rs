//! Identifier lookup over an auxiliary dataset

use crate::record::RowRecord;
use std::collections::HashMap;
use tracing::debug;

/// Maps a member identifier to the row that carries it.
///
/// Borrows the rows of the dataset it was built from, so it cannot outlive
/// them and cannot be modified after construction.
#[derive(Debug, Clone, Default)]
pub struct MemberIndex<'a> {
    by_member: HashMap<&'a str, &'a RowRecord>,
}

impl<'a> MemberIndex<'a> {
    /// Index `rows` by the value of `key_field`.
    ///
    /// A later row with the same identifier replaces the earlier one. Rows
    /// whose key is absent are skipped: they could never match anything.
    pub fn build(rows: &'a [RowRecord], key_field: &str) -> Self {
        let mut by_member = HashMap::with_capacity(rows.len());
        let mut replaced = 0usize;
        let mut unkeyed = 0usize;

        for row in rows {
            match row.get(key_field) {
                Some(member) => {
                    if by_member.insert(member, row).is_some() {
                        replaced += 1;
                    }
                }
                None => unkeyed += 1,
            }
        }

        debug!(
            key_field,
            indexed = by_member.len(),
            replaced,
            unkeyed,
            "built member index"
        );

        Self { by_member }
    }

    /// Look up a member. An absent identifier never matches.
    pub fn get(&self, member: Option<&str>) -> Option<&'a RowRecord> {
        member.and_then(|m| self.by_member.get(m).copied())
    }

    /// Number of distinct identifiers
    pub fn len(&self) -> usize {
        self.by_member.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }
}
