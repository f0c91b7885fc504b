//! Review outcomes
//!
//! Per-field bookkeeping from the most recent review of a representative,
//! kept for UI feedback until the next review replaces it.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use plandesk_patch::FieldPath;
use serde::{Deserialize, Serialize};

use crate::pending::ChangeStatus;

/// Decision on one proposed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum FieldDecision {
    /// Field was applied
    Accepted,
    /// Field was dropped, with the reviewer's reason
    Rejected { reason: String },
}

impl FieldDecision {
    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Result of one review pass over a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewOutcome {
    /// Terminal status the review produced
    pub status: ChangeStatus,
    /// Decision per proposed field, in proposal order
    pub fields: IndexMap<FieldPath, FieldDecision>,
    /// Whole-proposal rejection comment, if any
    pub comment: Option<String>,
    /// When the review happened
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewOutcome {
    /// Outcome for a fully approved proposal
    #[must_use]
    pub fn approved(fields: impl IntoIterator<Item = FieldPath>) -> Self {
        Self {
            status: ChangeStatus::Approved,
            fields: fields
                .into_iter()
                .map(|path| (path, FieldDecision::Accepted))
                .collect(),
            comment: None,
            reviewed_at: Utc::now(),
        }
    }

    /// Outcome from per-field decisions
    ///
    /// The status is `Approved` when every field was accepted, `Rejected`
    /// when none was, `PartiallyApproved` otherwise.
    #[must_use]
    pub fn partial(fields: IndexMap<FieldPath, FieldDecision>) -> Self {
        let accepted = fields.values().filter(|d| d.is_accepted()).count();
        let status = if accepted == fields.len() && !fields.is_empty() {
            ChangeStatus::Approved
        } else if accepted == 0 {
            ChangeStatus::Rejected
        } else {
            ChangeStatus::PartiallyApproved
        };
        Self {
            status,
            fields,
            comment: None,
            reviewed_at: Utc::now(),
        }
    }

    /// Outcome for a proposal rejected outright
    #[must_use]
    pub fn rejected(
        fields: impl IntoIterator<Item = FieldPath>,
        comment: impl Into<String>,
    ) -> Self {
        let comment = comment.into();
        Self {
            status: ChangeStatus::Rejected,
            fields: fields
                .into_iter()
                .map(|path| {
                    (
                        path,
                        FieldDecision::Rejected {
                            reason: comment.clone(),
                        },
                    )
                })
                .collect(),
            comment: Some(comment),
            reviewed_at: Utc::now(),
        }
    }

    /// Paths of accepted fields, in proposal order
    #[must_use]
    pub fn accepted_paths(&self) -> Vec<FieldPath> {
        self.fields
            .iter()
            .filter(|(_, decision)| decision.is_accepted())
            .map(|(path, _)| path.clone())
            .collect()
    }
}
