// ABOUTME: Extraction strategies for vehicle listing pages.
// ABOUTME: Groups the label table, the field extractor and the selector cache.

//! Listing extraction module.
//!
//! Submodules:
//! - `compiled`: process-wide cache of parsed CSS selectors.
//! - `labels`: the label text for each optional vehicle attribute.
//! - `listing`: the field extractor producing a `VehicleRecord`.

pub mod compiled;
pub mod labels;
pub mod listing;
