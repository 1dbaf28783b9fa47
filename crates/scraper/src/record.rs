// ABOUTME: VehicleRecord struct holding the attributes extracted from one listing page.
// ABOUTME: Includes the "None" sentinel and formatting helpers for the CLI.

use serde::{Deserialize, Serialize};

/// Value stored in an optional field when the page does not carry it.
pub const SENTINEL: &str = "None";

/// Returns true if `value` is the absent-field sentinel.
pub fn is_sentinel(value: &str) -> bool {
    value == SENTINEL
}

/// The structured data extracted from a single vehicle listing.
///
/// Every optional attribute is always populated, either with the trimmed
/// value from the page or with [`SENTINEL`], so records line up as rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub title: String,
    pub price: f64,
    pub year: String,
    pub mileage: String,
    pub fuel_type: String,
    pub transmission: String,
    pub power: String,
    pub body_type: String,
    pub door_count: String,
    pub color: String,
    pub condition: String,
    pub features: Vec<String>,
    pub source_url: String,
}

impl VehicleRecord {
    /// The optional single-value attributes, paired with display names.
    pub fn attributes(&self) -> [(&'static str, &str); 9] {
        [
            ("Erstzulassung", self.year.as_str()),
            ("Kilometerstand", self.mileage.as_str()),
            ("Kraftstoffart", self.fuel_type.as_str()),
            ("Getriebe", self.transmission.as_str()),
            ("Leistung", self.power.as_str()),
            ("Fahrzeugtyp", self.body_type.as_str()),
            ("Anzahl Türen", self.door_count.as_str()),
            ("Außenfarbe", self.color.as_str()),
            ("Fahrzeugzustand", self.condition.as_str()),
        ]
    }

    /// Number of optional attributes holding a real value.
    pub fn known_attributes(&self) -> usize {
        self.attributes()
            .iter()
            .filter(|(_, value)| !is_sentinel(value))
            .count()
    }

    /// Returns true if the listing carried at least one feature tag.
    pub fn has_features(&self) -> bool {
        !(self.features.len() == 1 && is_sentinel(&self.features[0]))
    }

    /// Short two-line summary: title and source URL.
    pub fn format_summary(&self) -> String {
        format!("Titel: {}\nURL: {}", self.title, self.source_url)
    }

    /// Every field on its own labeled line.
    pub fn format_text(&self) -> String {
        let mut lines = vec![
            format!("Titel: {}", self.title),
            format!("Preis: {}", self.price),
        ];
        for (label, value) in self.attributes() {
            lines.push(format!("{}: {}", label, value));
        }
        lines.push(format!("Ausstattung: {}", self.features.join(", ")));
        lines.push(format!("URL: {}", self.source_url));
        lines.join("\n")
    }
}
