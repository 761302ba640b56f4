use crate::data::model::Item;

use super::Dataset;

/// Project a ranked item list onto one attribute.
///
/// Rank is the item's 1-based position. Missing or non-numeric attribute
/// values become NaN rather than failing the call.
pub fn scatter_data(ranked: &[Item], attribute: &str) -> Dataset {
    Dataset::from_values(ranked.iter().map(|item| item.numeric(attribute)))
}
