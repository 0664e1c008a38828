use sha2::{Digest, Sha256};
use std::collections::HashMap;

use crate::features::reports::models::{Report, ReportSchema};

/// Digest bytes kept in an id (12 hex chars)
const ID_PREFIX_BYTES: usize = 6;

/// Derive a selection key for every report.
///
/// The key is a digest of the row's persisted cells plus an ordinal that
/// separates identical rows (`<hex>-0`, `<hex>-1`, ...). It only changes when
/// the row's own content changes, so ids survive re-sorting and unrelated
/// writes between listing and deleting.
pub fn derive_ids(schema: &ReportSchema, reports: &[Report]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    reports
        .iter()
        .map(|report| {
            let digest = Sha256::digest(schema.cells(report).join("\u{1f}").as_bytes());
            let prefix = hex::encode(&digest[..ID_PREFIX_BYTES]);
            let ordinal = seen.entry(prefix.clone()).or_insert(0);
            let id = format!("{}-{}", prefix, ordinal);
            *ordinal += 1;
            id
        })
        .collect()
}
