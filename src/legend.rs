//! Legend rows derived from the shared depth bucket table.

use serde::Serialize;

use crate::depth::BUCKETS;

/// One legend row: swatch color plus a human-readable depth range in km.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegendEntry {
    pub color: &'static str,
    pub label: String,
}

/// Legend rows in ascending bucket order, rebuilt from the table on every
/// call. Internal ranges read "floor–ceiling"; the last row is open-ended.
pub fn entries() -> Vec<LegendEntry> {
    BUCKETS
        .iter()
        .map(|bucket| {
            let label = match bucket.ceiling {
                Some(edge) => format!("{}–{}", fmt_km(bucket.floor), fmt_km(edge)),
                None => format!("{}+", fmt_km(bucket.floor)),
            };
            LegendEntry { color: bucket.color, label }
        })
        .collect()
}

/// Whole kilometers render without a trailing ".0".
fn fmt_km(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
