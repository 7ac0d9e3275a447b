//! Geographic location attached to a content record.

use crate::model::AdditionalFields;

/// Wire discriminant emitted for location objects.
pub(crate) const TYPE_PLACE: &str = "Place";

/// Declared wire members of a location object.
pub(crate) const LOCATION_FIELDS: &[&str] = &[
    "type",
    "name",
    "accuracy",
    "altitude",
    "latitude",
    "longitude",
    "radius",
    "units",
];

/// Units for a location's radius and altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationUnit {
    Centimeter,
    Feet,
    Inches,
    Kilometer,
    Meter,
    Miles,
}

impl LocationUnit {
    /// Returns the wire name of this unit.
    pub fn wire_name(&self) -> &'static str {
        match self {
            LocationUnit::Centimeter => "cm",
            LocationUnit::Feet => "feet",
            LocationUnit::Inches => "inches",
            LocationUnit::Kilometer => "km",
            LocationUnit::Meter => "m",
            LocationUnit::Miles => "miles",
        }
    }

    /// Maps a wire name onto the unit set.
    pub fn from_wire(name: &str) -> Option<LocationUnit> {
        match name {
            "cm" => Some(LocationUnit::Centimeter),
            "feet" => Some(LocationUnit::Feet),
            "inches" => Some(LocationUnit::Inches),
            "km" => Some(LocationUnit::Kilometer),
            "m" => Some(LocationUnit::Meter),
            "miles" => Some(LocationUnit::Miles),
            _ => None,
        }
    }
}

/// A WGS84 coordinate with optional precision metadata.
///
/// Latitude/longitude bounds and the non-negativity of accuracy, altitude
/// and radius are validator rules, not construction-time checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: Option<String>,
    /// Latitude in degrees (-90 to +90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to +180).
    pub longitude: f64,
    /// Accuracy of the coordinates as a percentage.
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    /// The area around the coordinate that comprises the location.
    pub radius: Option<f64>,
    /// Units for radius and altitude.
    pub unit: LocationUnit,
    pub additional_fields: AdditionalFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_wire_round_trip() {
        for unit in [
            LocationUnit::Centimeter,
            LocationUnit::Feet,
            LocationUnit::Inches,
            LocationUnit::Kilometer,
            LocationUnit::Meter,
            LocationUnit::Miles,
        ] {
            assert_eq!(LocationUnit::from_wire(unit.wire_name()), Some(unit));
        }
        assert_eq!(LocationUnit::from_wire("furlongs"), None);
    }
}
