//! Sustainability suggestions keyed by building type.

use crate::building::BuildingType;

/// Appended for every building type, always last
pub const SUPPLEMENTARY_CEMENTITIOUS_TIP: &str = "Use fly ash or ground granulated blast furnace slag as partial cement replacement to reduce CO2 emissions.";

const RESIDENTIAL_TIPS: [&str; 2] = [
    "Consider using recycled concrete aggregates for non-structural elements.",
    "Implement rainwater harvesting systems to reduce water consumption.",
];

const COMMERCIAL_TIPS: [&str; 2] = [
    "Install solar panels on the roof to offset energy consumption.",
    "Use low-VOC paints and adhesives to improve indoor air quality.",
];

const INDUSTRIAL_TIPS: [&str; 2] = [
    "Incorporate natural lighting solutions to reduce energy costs.",
    "Consider using prefabricated elements to reduce on-site waste.",
];

/// Type-specific tips first, then the universal cement-replacement tip.
pub fn sustainability_suggestions(building_type: BuildingType) -> Vec<String> {
    let specific = match building_type {
        BuildingType::Residential => RESIDENTIAL_TIPS,
        BuildingType::Commercial => COMMERCIAL_TIPS,
        BuildingType::Industrial => INDUSTRIAL_TIPS,
    };

    specific
        .iter()
        .chain(std::iter::once(&SUPPLEMENTARY_CEMENTITIOUS_TIP))
        .map(|tip| tip.to_string())
        .collect()
}
