//! Member records and typed patches
//!
//! A [`MemberRecord`] is the immutable base view of a representative.
//! A [`MemberPatch`] carries the fields someone wants to change — every
//! field optional, nested sub-objects patched through their own partial
//! types. The merge semantics (recurse into sub-objects, replace scalars)
//! come from [`crate::deep_merge`]; the typed layer exists so callers can
//! name fields explicitly instead of shuttling loose JSON around.

use crate::error::PatchError;
use crate::merge::deep_merge;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Postal address on a member record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

/// Emergency contact on a member record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// Base representative record
///
/// The directory owns these; the review workflow never mutates one in
/// place, it layers applied edits on top via [`MemberPatch::apply_to`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub preferred_language: String,
    pub address: Address,
    pub emergency_contact: EmergencyContact,
}

impl MemberRecord {
    /// Create a record with the given identity; remaining fields default.
    #[must_use]
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }
}

/// Partial address patch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl AddressPatch {
    /// Whether no field is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.province.is_none()
            && self.postal_code.is_none()
    }
}

/// Partial emergency-contact patch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactPatch {
    /// Whether no field is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.relationship.is_none() && self.phone.is_none()
    }
}

/// Dotted path naming one patchable field, e.g. `first_name` or
/// `address.city`. Review decisions are keyed by these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPath(pub String);

impl FieldPath {
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

/// Proposed edits to one member record
///
/// Identity (`id`) is never patchable. An all-`None` patch is valid and
/// detectable via [`MemberPatch::is_empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<ContactPatch>,
}

impl MemberPatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.preferred_language.is_none()
            && self.address.as_ref().map_or(true, AddressPatch::is_empty)
            && self
                .emergency_contact
                .as_ref()
                .map_or(true, ContactPatch::is_empty)
    }

    /// Project to a JSON value with absent fields omitted
    ///
    /// # Errors
    /// Returns [`PatchError::Serialization`] if serialization fails (does
    /// not happen for this shape in practice).
    pub fn to_value(&self) -> Result<JsonValue, PatchError> {
        serde_json::to_value(self).map_err(PatchError::Serialization)
    }

    /// Fold `newer` onto `self`, newer fields winning
    ///
    /// Nested sub-patches merge field-by-field, matching [`deep_merge`]
    /// over the serialized forms.
    #[must_use]
    pub fn merge(&self, newer: &Self) -> Self {
        let merge_addr = |older: &Option<AddressPatch>, newer: &Option<AddressPatch>| match (older, newer) {
            (Some(o), Some(n)) => Some(AddressPatch {
                street: n.street.clone().or_else(|| o.street.clone()),
                city: n.city.clone().or_else(|| o.city.clone()),
                province: n.province.clone().or_else(|| o.province.clone()),
                postal_code: n.postal_code.clone().or_else(|| o.postal_code.clone()),
            }),
            (o, n) => n.clone().or_else(|| o.clone()),
        };
        let merge_contact = |older: &Option<ContactPatch>, newer: &Option<ContactPatch>| match (older, newer) {
            (Some(o), Some(n)) => Some(ContactPatch {
                name: n.name.clone().or_else(|| o.name.clone()),
                relationship: n.relationship.clone().or_else(|| o.relationship.clone()),
                phone: n.phone.clone().or_else(|| o.phone.clone()),
            }),
            (o, n) => n.clone().or_else(|| o.clone()),
        };

        Self {
            first_name: newer.first_name.clone().or_else(|| self.first_name.clone()),
            last_name: newer.last_name.clone().or_else(|| self.last_name.clone()),
            email: newer.email.clone().or_else(|| self.email.clone()),
            phone: newer.phone.clone().or_else(|| self.phone.clone()),
            preferred_language: newer
                .preferred_language
                .clone()
                .or_else(|| self.preferred_language.clone()),
            address: merge_addr(&self.address, &newer.address),
            emergency_contact: merge_contact(&self.emergency_contact, &newer.emergency_contact),
        }
    }

    /// Apply the patch to a base record, returning the effective record
    ///
    /// # Errors
    /// Returns [`PatchError`] if the value round-trip fails.
    pub fn apply_to(&self, base: &MemberRecord) -> Result<MemberRecord, PatchError> {
        let base_value = serde_json::to_value(base).map_err(PatchError::Serialization)?;
        let merged = deep_merge(&base_value, &self.to_value()?);
        serde_json::from_value(merged).map_err(PatchError::InvalidShape)
    }

    /// Paths of every field the patch sets, in record order
    #[must_use]
    pub fn field_paths(&self) -> Vec<FieldPath> {
        let mut paths = Vec::new();
        let mut top = |set: bool, name: &str| {
            if set {
                paths.push(FieldPath::new(name));
            }
        };
        top(self.first_name.is_some(), "first_name");
        top(self.last_name.is_some(), "last_name");
        top(self.email.is_some(), "email");
        top(self.phone.is_some(), "phone");
        top(self.preferred_language.is_some(), "preferred_language");

        if let Some(addr) = &self.address {
            for (set, leaf) in [
                (addr.street.is_some(), "street"),
                (addr.city.is_some(), "city"),
                (addr.province.is_some(), "province"),
                (addr.postal_code.is_some(), "postal_code"),
            ] {
                if set {
                    paths.push(FieldPath::new(format!("address.{leaf}")));
                }
            }
        }
        if let Some(contact) = &self.emergency_contact {
            for (set, leaf) in [
                (contact.name.is_some(), "name"),
                (contact.relationship.is_some(), "relationship"),
                (contact.phone.is_some(), "phone"),
            ] {
                if set {
                    paths.push(FieldPath::new(format!("emergency_contact.{leaf}")));
                }
            }
        }
        paths
    }

    /// Keep only the fields named by `paths`; everything else becomes `None`
    ///
    /// Paths never add fields: a path absent from the patch stays absent.
    /// Used to build the approved subset during a partial review.
    #[must_use]
    pub fn retain(&self, paths: &[FieldPath]) -> Self {
        let keep = |name: &str| paths.iter().any(|p| p.as_str() == name);

        let address = self.address.as_ref().map(|addr| AddressPatch {
            street: addr.street.clone().filter(|_| keep("address.street")),
            city: addr.city.clone().filter(|_| keep("address.city")),
            province: addr.province.clone().filter(|_| keep("address.province")),
            postal_code: addr
                .postal_code
                .clone()
                .filter(|_| keep("address.postal_code")),
        });
        let emergency_contact = self.emergency_contact.as_ref().map(|contact| ContactPatch {
            name: contact.name.clone().filter(|_| keep("emergency_contact.name")),
            relationship: contact
                .relationship
                .clone()
                .filter(|_| keep("emergency_contact.relationship")),
            phone: contact
                .phone
                .clone()
                .filter(|_| keep("emergency_contact.phone")),
        });

        Self {
            first_name: self.first_name.clone().filter(|_| keep("first_name")),
            last_name: self.last_name.clone().filter(|_| keep("last_name")),
            email: self.email.clone().filter(|_| keep("email")),
            phone: self.phone.clone().filter(|_| keep("phone")),
            preferred_language: self
                .preferred_language
                .clone()
                .filter(|_| keep("preferred_language")),
            address: address.filter(|a| !a.is_empty()),
            emergency_contact: emergency_contact.filter(|c| !c.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_patch() -> MemberPatch {
        MemberPatch {
            first_name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            address: Some(AddressPatch {
                city: Some("Ottawa".to_string()),
                ..AddressPatch::default()
            }),
            ..MemberPatch::default()
        }
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(MemberPatch::default().is_empty());
        assert!(!sample_patch().is_empty());
    }

    #[test]
    fn patch_with_only_empty_subobject_is_empty() {
        let patch = MemberPatch {
            address: Some(AddressPatch::default()),
            ..MemberPatch::default()
        };
        assert!(patch.is_empty());
    }

    #[test]
    fn to_value_skips_absent_fields() {
        let value = sample_patch().to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "first_name": "Jane",
                "email": "jane@example.com",
                "address": {"city": "Ottawa"},
            })
        );
    }

    #[test]
    fn apply_to_overlays_base() {
        let mut base = MemberRecord::new("R1", "Janet", "Doe");
        base.address.city = "Toronto".to_string();
        base.address.postal_code = "M5V 2T6".to_string();

        let effective = sample_patch().apply_to(&base).unwrap();
        assert_eq!(effective.first_name, "Jane");
        assert_eq!(effective.last_name, "Doe");
        assert_eq!(effective.address.city, "Ottawa");
        // Untouched nested field survives the merge.
        assert_eq!(effective.address.postal_code, "M5V 2T6");
    }

    #[test]
    fn merge_newer_wins_and_nested_fields_combine() {
        let older = sample_patch();
        let newer = MemberPatch {
            first_name: Some("Janey".to_string()),
            address: Some(AddressPatch {
                province: Some("ON".to_string()),
                ..AddressPatch::default()
            }),
            ..MemberPatch::default()
        };

        let merged = older.merge(&newer);
        assert_eq!(merged.first_name.as_deref(), Some("Janey"));
        assert_eq!(merged.email.as_deref(), Some("jane@example.com"));
        let addr = merged.address.unwrap();
        assert_eq!(addr.city.as_deref(), Some("Ottawa"));
        assert_eq!(addr.province.as_deref(), Some("ON"));
    }

    #[test]
    fn merge_matches_value_level_deep_merge() {
        let older = sample_patch();
        let newer = MemberPatch {
            phone: Some("555-0100".to_string()),
            address: Some(AddressPatch {
                city: Some("Kingston".to_string()),
                ..AddressPatch::default()
            }),
            ..MemberPatch::default()
        };

        let typed = older.merge(&newer).to_value().unwrap();
        let untyped = crate::deep_merge(&older.to_value().unwrap(), &newer.to_value().unwrap());
        assert_eq!(typed, untyped);
    }

    #[test]
    fn field_paths_cover_nested_fields() {
        let paths = sample_patch().field_paths();
        let names: Vec<&str> = paths.iter().map(FieldPath::as_str).collect();
        assert_eq!(names, vec!["first_name", "email", "address.city"]);
    }

    #[test]
    fn retain_keeps_only_named_fields() {
        let retained = sample_patch().retain(&[FieldPath::new("email")]);
        assert_eq!(retained.email.as_deref(), Some("jane@example.com"));
        assert!(retained.first_name.is_none());
        assert!(retained.address.is_none());
    }

    #[test]
    fn retain_nested_path() {
        let retained = sample_patch().retain(&[FieldPath::new("address.city")]);
        assert!(retained.first_name.is_none());
        assert_eq!(
            retained.address.unwrap().city.as_deref(),
            Some("Ottawa")
        );
    }

    #[test]
    fn retain_never_adds_fields() {
        let retained = sample_patch().retain(&[
            FieldPath::new("last_name"),
            FieldPath::new("address.province"),
        ]);
        assert!(retained.is_empty());
    }

    #[test]
    fn patch_roundtrips_through_json() {
        let patch = sample_patch();
        let value = patch.to_value().unwrap();
        let back: MemberPatch = serde_json::from_value(value).unwrap();
        assert_eq!(back, patch);
    }
}
