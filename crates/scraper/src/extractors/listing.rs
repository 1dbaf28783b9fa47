// ABOUTME: Field extractor turning a listing document into a VehicleRecord.
// ABOUTME: Title and price are required; every other attribute falls back to the "None" sentinel.

//! Vehicle listing field extraction.
//!
//! Key behaviors:
//! - Title comes from the page heading, price from the `itemprop=price`
//!   meta annotation. Either one missing aborts extraction.
//! - Detail attributes are found by label: the first `li` whose text
//!   contains the label, then the next `span` after it.
//! - Absent detail attributes and an empty feature list become `"None"`.

use crate::document::ListingDocument;
use crate::error::FieldError;
use crate::extractors::labels::VehicleAttribute;
use crate::record::{VehicleRecord, SENTINEL};

/// Primary heading of the listing.
pub const TITLE_SELECTOR: &str = "h1#viewad-title";
/// Machine-readable price annotation; the value lives in `content`.
pub const PRICE_SELECTOR: &str = "meta[itemprop='price']";
/// One element per equipment tag.
pub const FEATURE_SELECTOR: &str = ".checktaglist .checktag";
/// Element type of a detail-list entry carrying a label.
pub const LABEL_ITEM_TAG: &str = "li";
/// Element type holding the value that follows a label.
pub const LABEL_VALUE_TAG: &str = "span";

/// Every selector the extractor issues, for cache warm-up.
pub const LISTING_SELECTORS: [&str; 4] =
    [TITLE_SELECTOR, PRICE_SELECTOR, FEATURE_SELECTOR, LABEL_ITEM_TAG];

/// Extracts a complete record from `doc`, fetched from `url`.
///
/// Fails on the first required field that is missing or malformed; no
/// partial record is ever produced.
pub fn extract_vehicle<D>(doc: &D, url: &str) -> Result<VehicleRecord, FieldError>
where
    D: ListingDocument + ?Sized,
{
    let title = extract_title(doc)?;
    let price = extract_price(doc)?;

    Ok(VehicleRecord {
        title,
        price,
        year: extract_year(doc),
        mileage: label_value(doc, VehicleAttribute::Mileage),
        fuel_type: label_value(doc, VehicleAttribute::FuelType),
        transmission: label_value(doc, VehicleAttribute::Transmission),
        power: label_value(doc, VehicleAttribute::Power),
        body_type: label_value(doc, VehicleAttribute::BodyType),
        door_count: label_value(doc, VehicleAttribute::DoorCount),
        color: label_value(doc, VehicleAttribute::Color),
        condition: label_value(doc, VehicleAttribute::Condition),
        features: extract_features(doc),
        source_url: url.to_string(),
    })
}

/// Trimmed heading text. An empty heading counts as missing.
pub fn extract_title<D>(doc: &D) -> Result<String, FieldError>
where
    D: ListingDocument + ?Sized,
{
    doc.first_text(TITLE_SELECTOR)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| FieldError::missing("title"))
}

/// Price from the meta annotation's `content` attribute.
pub fn extract_price<D>(doc: &D) -> Result<f64, FieldError>
where
    D: ListingDocument + ?Sized,
{
    let content = doc
        .first_attr(PRICE_SELECTOR, "content")
        .ok_or_else(|| FieldError::missing("price"))?
        .ok_or_else(|| FieldError::malformed("price", ""))?;

    parse_price(&content).ok_or_else(|| FieldError::malformed("price", content.as_str()))
}

/// Parses a non-negative, finite number.
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
}

/// Value following `attr`'s label, or the sentinel when absent.
pub fn label_value<D>(doc: &D, attr: VehicleAttribute) -> String
where
    D: ListingDocument + ?Sized,
{
    match doc.text_after_label(LABEL_ITEM_TAG, attr.label(), LABEL_VALUE_TAG) {
        Some(value) => value,
        None => {
            tracing::debug!(label = attr.label(), "label not found, using sentinel");
            SENTINEL.to_string()
        }
    }
}

/// Four-digit year from the first-registration entry, or the sentinel.
pub fn extract_year<D>(doc: &D) -> String
where
    D: ListingDocument + ?Sized,
{
    let text = label_value(doc, VehicleAttribute::FirstRegistration);
    year_from_text(&text).unwrap_or(SENTINEL).to_string()
}

/// First token made of exactly four ASCII digits.
///
/// Tokens are split on whitespace and on date punctuation, so `03/2019`
/// yields `2019`.
pub fn year_from_text(text: &str) -> Option<&str> {
    if text == SENTINEL {
        return None;
    }
    text.split(|c: char| !c.is_alphanumeric())
        .find(|token| token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()))
}

/// Feature tags in document order; `["None"]` when the page has none.
pub fn extract_features<D>(doc: &D) -> Vec<String>
where
    D: ListingDocument + ?Sized,
{
    let features = doc.all_texts(FEATURE_SELECTOR);
    if features.is_empty() {
        vec![SENTINEL.to_string()]
    } else {
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// In-memory document keyed by selector and label.
    #[derive(Default)]
    struct FakeDocument {
        texts: HashMap<&'static str, String>,
        attrs: HashMap<(&'static str, &'static str), Option<String>>,
        lists: HashMap<&'static str, Vec<String>>,
        labels: HashMap<&'static str, String>,
    }

    impl FakeDocument {
        fn listing(title: &str, price: &str) -> Self {
            let mut doc = FakeDocument::default();
            doc.texts.insert(TITLE_SELECTOR, title.to_string());
            doc.attrs
                .insert((PRICE_SELECTOR, "content"), Some(price.to_string()));
            doc
        }

        fn with_label(mut self, label: &'static str, value: &str) -> Self {
            self.labels.insert(label, value.to_string());
            self
        }

        fn with_features(mut self, tags: &[&str]) -> Self {
            self.lists
                .insert(FEATURE_SELECTOR, tags.iter().map(|t| t.to_string()).collect());
            self
        }
    }

    impl ListingDocument for FakeDocument {
        fn first_text(&self, selector: &str) -> Option<String> {
            self.texts.get(selector).cloned()
        }

        fn first_attr(&self, selector: &str, attr: &str) -> Option<Option<String>> {
            self.attrs
                .iter()
                .find(|((s, a), _)| *s == selector && *a == attr)
                .map(|(_, value)| value.clone())
        }

        fn all_texts(&self, selector: &str) -> Vec<String> {
            self.lists.get(selector).cloned().unwrap_or_default()
        }

        fn text_after_label(
            &self,
            _item_tag: &str,
            label: &str,
            _value_tag: &str,
        ) -> Option<String> {
            self.labels.get(label).cloned()
        }
    }

    #[test]
    fn test_required_fields_extracted() {
        let doc = FakeDocument::listing("Audi A4 Avant", "12500");
        let record = extract_vehicle(&doc, "https://example.com/ad/1").unwrap();
        assert_eq!(record.title, "Audi A4 Avant");
        assert_eq!(record.price, 12500.0);
        assert_eq!(record.source_url, "https://example.com/ad/1");
    }

    #[test]
    fn test_missing_title() {
        let mut doc = FakeDocument::listing("ignored", "100").with_label("Kilometerstand", "1 km");
        doc.texts.clear();
        let err = extract_vehicle(&doc, "u").unwrap_err();
        assert_eq!(err, FieldError::missing("title"));
    }

    #[test]
    fn test_missing_title_wins_over_missing_price() {
        let doc = FakeDocument::default();
        assert_eq!(
            extract_vehicle(&doc, "u").unwrap_err(),
            FieldError::missing("title")
        );
    }

    #[test]
    fn test_empty_title_is_missing() {
        let doc = FakeDocument::listing("", "100");
        assert_eq!(extract_title(&doc).unwrap_err(), FieldError::missing("title"));
    }

    #[test]
    fn test_missing_price() {
        let mut doc = FakeDocument::listing("BMW 320d", "0");
        doc.attrs.clear();
        assert_eq!(
            extract_vehicle(&doc, "u").unwrap_err(),
            FieldError::missing("price")
        );
    }

    #[test]
    fn test_malformed_price() {
        let doc = FakeDocument::listing("BMW 320d", "N/A");
        let err = extract_vehicle(&doc, "u").unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err, FieldError::malformed("price", "N/A"));
    }

    #[test]
    fn test_price_without_content_attribute_is_malformed() {
        let mut doc = FakeDocument::listing("BMW 320d", "0");
        doc.attrs.insert((PRICE_SELECTOR, "content"), None);
        assert_eq!(
            extract_price(&doc).unwrap_err(),
            FieldError::malformed("price", "")
        );
    }

    #[test]
    fn test_price_rejects_negative_and_non_finite() {
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("inf"), None);
        assert_eq!(parse_price(" 15999.50 "), Some(15999.5));
        assert_eq!(parse_price("0"), Some(0.0));
    }

    #[test]
    fn test_optional_fields_fall_back_to_sentinel() {
        let doc = FakeDocument::listing("Opel Corsa", "3000");
        let record = extract_vehicle(&doc, "u").unwrap();
        for (label, value) in record.attributes() {
            assert_eq!(value, SENTINEL, "{} should be the sentinel", label);
        }
        assert_eq!(record.features, vec![SENTINEL.to_string()]);
    }

    #[test]
    fn test_each_label_maps_to_its_field() {
        let doc = FakeDocument::listing("Skoda Octavia", "9900")
            .with_label("Kilometerstand", "120.000 km")
            .with_label("Erstzulassung", "Juni 2016")
            .with_label("Kraftstoffart", "Diesel")
            .with_label("Getriebe", "Automatik")
            .with_label("Leistung", "150 PS")
            .with_label("Fahrzeugtyp", "Kombi")
            .with_label("Anzahl Türen", "4/5")
            .with_label("Außenfarbe", "Grau")
            .with_label("Fahrzeugzustand", "Unbeschädigtes Fahrzeug");
        let record = extract_vehicle(&doc, "u").unwrap();

        assert_eq!(record.mileage, "120.000 km");
        assert_eq!(record.year, "2016");
        assert_eq!(record.fuel_type, "Diesel");
        assert_eq!(record.transmission, "Automatik");
        assert_eq!(record.power, "150 PS");
        assert_eq!(record.body_type, "Kombi");
        assert_eq!(record.door_count, "4/5");
        assert_eq!(record.color, "Grau");
        assert_eq!(record.condition, "Unbeschädigtes Fahrzeug");
        assert_eq!(record.known_attributes(), 9);
    }

    #[test]
    fn test_year_token_selection() {
        assert_eq!(year_from_text("Erstzulassung: 03/2019 Fahrzeug"), Some("2019"));
        assert_eq!(year_from_text("2015 (Facelift 2017)"), Some("2015"));
        assert_eq!(year_from_text("unbekannt"), None);
        assert_eq!(year_from_text("12345 201"), None);
        assert_eq!(year_from_text(SENTINEL), None);
    }

    #[test]
    fn test_year_unparseable_label_is_sentinel() {
        let doc = FakeDocument::listing("Fiat Punto", "800").with_label("Erstzulassung", "unbekannt");
        assert_eq!(extract_year(&doc), SENTINEL);
    }

    #[test]
    fn test_features_keep_document_order() {
        let doc = FakeDocument::listing("Seat Leon", "7000")
            .with_features(&["Klimaanlage", "ABS", "Navi"]);
        assert_eq!(
            extract_features(&doc),
            vec!["Klimaanlage".to_string(), "ABS".to_string(), "Navi".to_string()]
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = FakeDocument::listing("Ford Focus", "4500")
            .with_label("Kilometerstand", "99.000 km")
            .with_features(&["ABS"]);
        let first = extract_vehicle(&doc, "u").unwrap();
        let second = extract_vehicle(&doc, "u").unwrap();
        assert_eq!(first, second);
    }
}
