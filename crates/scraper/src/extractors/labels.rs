// ABOUTME: Label table mapping each optional vehicle attribute to its German list label.
// ABOUTME: Labels are fixed to the listing site's current markup and wording.

/// An optional attribute read from the listing's detail list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleAttribute {
    Mileage,
    FirstRegistration,
    FuelType,
    Transmission,
    Power,
    BodyType,
    DoorCount,
    Color,
    Condition,
}

impl VehicleAttribute {
    pub const ALL: [VehicleAttribute; 9] = [
        VehicleAttribute::Mileage,
        VehicleAttribute::FirstRegistration,
        VehicleAttribute::FuelType,
        VehicleAttribute::Transmission,
        VehicleAttribute::Power,
        VehicleAttribute::BodyType,
        VehicleAttribute::DoorCount,
        VehicleAttribute::Color,
        VehicleAttribute::Condition,
    ];

    /// The label text that precedes the value on the page.
    pub const fn label(self) -> &'static str {
        match self {
            VehicleAttribute::Mileage => "Kilometerstand",
            VehicleAttribute::FirstRegistration => "Erstzulassung",
            VehicleAttribute::FuelType => "Kraftstoffart",
            VehicleAttribute::Transmission => "Getriebe",
            VehicleAttribute::Power => "Leistung",
            VehicleAttribute::BodyType => "Fahrzeugtyp",
            VehicleAttribute::DoorCount => "Anzahl Türen",
            VehicleAttribute::Color => "Außenfarbe",
            VehicleAttribute::Condition => "Fahrzeugzustand",
        }
    }
}
