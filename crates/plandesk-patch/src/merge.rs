//! JSON deep merge
//!
//! The single merge primitive shared by the whole workflow: computing
//! effective member details (base + applied edits) and folding a new
//! proposal onto an outstanding one both go through [`deep_merge`].

use serde_json::Value as JsonValue;

/// Deep-merge `patch` onto `base`, returning a new value.
///
/// For each key present in `patch`: if both sides hold objects at that key,
/// the merge recurses; otherwise the patch value replaces the base value
/// outright. Arrays are atomic — a patch array replaces the base array, it
/// is never merged element-wise. Neither input is mutated.
///
/// Absent fields cannot appear in `patch` (typed patches skip `None` when
/// serializing), so a key in the patch always carries an intentional value.
#[must_use]
pub fn deep_merge(base: &JsonValue, patch: &JsonValue) -> JsonValue {
    match (base, patch) {
        (JsonValue::Object(base_map), JsonValue::Object(patch_map)) => {
            let mut result = base_map.clone();
            for (key, patch_val) in patch_map {
                result.insert(
                    key.clone(),
                    if let Some(base_val) = result.get(key) {
                        deep_merge(base_val, patch_val)
                    } else {
                        patch_val.clone()
                    },
                );
            }
            JsonValue::Object(result)
        }
        // For everything else the patch side wins.
        (_, patch_val) => patch_val.clone(),
    }
}
