//! Member directory
//!
//! The representative/client directory is a black-box collaborator: the
//! console only reads base records from it. [`StaticDirectory`] covers the
//! in-memory case; production wiring can substitute anything implementing
//! [`MemberDirectory`].

use indexmap::IndexMap;
use plandesk_patch::MemberRecord;

/// Read-only source of base member records
pub trait MemberDirectory: Send + Sync {
    /// Base record for a representative id, if known
    fn member(&self, rep_id: &str) -> Option<MemberRecord>;

    /// All base records, in directory order
    fn members(&self) -> Vec<MemberRecord>;
}

/// In-memory directory seeded at construction
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    records: IndexMap<String, MemberRecord>,
}

impl StaticDirectory {
    /// Empty directory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the given records
    #[must_use]
    pub fn seeded(records: impl IntoIterator<Item = MemberRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }

    /// Add or replace a record
    pub fn insert(&mut self, record: MemberRecord) {
        self.records.insert(record.id.clone(), record);
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MemberDirectory for StaticDirectory {
    fn member(&self, rep_id: &str) -> Option<MemberRecord> {
        self.records.get(rep_id).cloned()
    }

    fn members(&self) -> Vec<MemberRecord> {
        self.records.values().cloned().collect()
    }
}
