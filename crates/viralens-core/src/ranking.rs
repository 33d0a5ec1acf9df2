//! Pure ranking and filter stage over joined catalog items.
//!
//! No I/O here: the pipeline produces [`CatalogItem`]s, this module decides
//! which survive the user's viral-ratio threshold and how a display-only
//! ranking is derived from them.

use crate::types::CatalogItem;

/// Derive the view-to-subscriber ratio with the denominator floored at 1.
///
/// Channels reporting zero (or missing) subscribers deliberately produce
/// large ratios rather than being excluded; the ranking semantics depend
/// on that.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn performance_ratio(view_count: u64, subscriber_count: u64) -> f64 {
    view_count as f64 / subscriber_count.max(1) as f64
}

/// Retain items whose ratio (missing treated as 0) is at or above
/// `min_ratio`, preserving the original relative order.
#[must_use]
pub fn filter_by_ratio(items: &[CatalogItem], min_ratio: f64) -> Vec<CatalogItem> {
    items
        .iter()
        .filter(|item| item.performance_ratio.unwrap_or(0.0) >= min_ratio)
        .cloned()
        .collect()
}

/// Sorted copy for summary charting, descending by ratio.
///
/// The canonical sequence passed in is left untouched; only the returned
/// copy is reordered.
#[must_use]
pub fn rank_by_ratio(items: &[CatalogItem]) -> Vec<CatalogItem> {
    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| {
        b.performance_ratio
            .unwrap_or(0.0)
            .total_cmp(&a.performance_ratio.unwrap_or(0.0))
    });
    ranked
}
