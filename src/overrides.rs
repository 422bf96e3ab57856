//! Raw `--field path=value` overrides.
//!
//! Overrides bypass the flag registry entirely and are merged over the
//! computed request last. Unknown paths are accepted and create new structure
//! in the body.

use tracing::debug;

use crate::field_registry::{
    PATH_BANK_BRANCH, PATH_BANK_CODE, PATH_BRANCH_CODE, PATH_CLABE, PATH_IBAN, PATH_ROUTING_TYPE_1,
    PATH_ROUTING_TYPE_2, PATH_ROUTING_VALUE_1, PATH_ROUTING_VALUE_2, PATH_SWIFT_CODE,
    ROUTING_FIELD_PREFIX,
};
use crate::request_error::RequestError;
use crate::request_tree::{build_nested_map, FlatFieldMap, RequestTree};

/// Paths that count as a routing method even though they sit outside the
/// routing-slot prefix.
const DIRECT_ROUTING_PATHS: &[&str] = &[
    PATH_SWIFT_CODE,
    PATH_IBAN,
    PATH_CLABE,
    PATH_BANK_CODE,
    PATH_BRANCH_CODE,
    PATH_BANK_BRANCH,
];

/// Parsed overrides. Later entries for the same path win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideMap {
    fields: FlatFieldMap,
}

impl OverrideMap {
    pub fn fields(&self) -> &FlatFieldMap {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when any override writes a routing slot or a bank identifier.
    pub fn touches_routing(&self) -> bool {
        self.fields
            .keys()
            .any(|path| path.starts_with(ROUTING_FIELD_PREFIX) || DIRECT_ROUTING_PATHS.contains(&path))
    }

    /// True when an override writes the type or value of routing slot 1 or 2.
    pub fn overrides_slot(&self, slot: u8) -> bool {
        let (type_path, value_path) = match slot {
            1 => (PATH_ROUTING_TYPE_1, PATH_ROUTING_VALUE_1),
            2 => (PATH_ROUTING_TYPE_2, PATH_ROUTING_VALUE_2),
            _ => return false,
        };
        self.fields
            .keys()
            .any(|path| path == type_path || path == value_path)
    }

    pub fn to_tree(&self) -> RequestTree {
        build_nested_map(&self.fields)
    }
}

/// Parse repeatable `--field path=value` entries.
///
/// The entry is split at the first `=`, so values may themselves contain `=`.
/// The path is kept exactly as typed; a blank path is rejected.
pub fn parse_field_overrides<S: AsRef<str>>(entries: &[S]) -> Result<OverrideMap, RequestError> {
    let mut fields = FlatFieldMap::new();
    for entry in entries {
        let entry = entry.as_ref();
        let (path, value) = entry
            .split_once('=')
            .ok_or_else(|| RequestError::OverrideParse {
                entry: entry.to_string(),
            })?;
        if path.trim().is_empty() {
            return Err(RequestError::OverrideParse {
                entry: entry.to_string(),
            });
        }
        debug!("Field override: {}", path);
        fields.insert(path, value);
    }
    Ok(OverrideMap { fields })
}
