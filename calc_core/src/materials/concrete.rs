//! Concrete Grades and Mix Designs (IS 10262:2019)
//!
//! Nominal mix proportions per cubic meter of concrete for the six grades
//! the estimator supports. The table is constant data; grade lookups never
//! fail because unrecognized codes fall back to [`ConcreteGrade::DEFAULT`].

use serde::{Deserialize, Deserializer, Serialize};

/// Concrete grade designation (characteristic compressive strength in MPa).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteGrade {
    M15,
    M20,
    M25,
    M30,
    M35,
    M40,
}

impl ConcreteGrade {
    /// All grades, weakest first
    pub const ALL: [ConcreteGrade; 6] = [
        ConcreteGrade::M15,
        ConcreteGrade::M20,
        ConcreteGrade::M25,
        ConcreteGrade::M30,
        ConcreteGrade::M35,
        ConcreteGrade::M40,
    ];

    /// Grade used when the requested code is not in the table
    pub const DEFAULT: ConcreteGrade = ConcreteGrade::M25;

    /// Code string as it appears on the wire ("M25")
    pub fn code(&self) -> &'static str {
        match self {
            ConcreteGrade::M15 => "M15",
            ConcreteGrade::M20 => "M20",
            ConcreteGrade::M25 => "M25",
            ConcreteGrade::M30 => "M30",
            ConcreteGrade::M35 => "M35",
            ConcreteGrade::M40 => "M40",
        }
    }

    /// Wire codes of every grade, for error messages
    pub fn codes() -> [&'static str; 6] {
        Self::ALL.map(|g| g.code())
    }

    /// Exact lookup by wire code. Case-sensitive, like the wire contract.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }

    /// Lookup with the M25 fallback rule applied
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::DEFAULT)
    }

    /// Parse from loose user input ("m25", " M 25 ", "25")
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        let normalized = s.to_uppercase().replace([' ', '-', '_'], "");
        let code = if normalized.starts_with('M') {
            normalized
        } else {
            format!("M{}", normalized)
        };
        Self::from_code(&code)
    }

    /// Mix design for this grade
    pub fn mix_design(&self) -> MixDesign {
        match self {
            ConcreteGrade::M15 => MixDesign::new(15.0, 300.0, 720.0, 0.55),
            ConcreteGrade::M20 => MixDesign::new(20.0, 330.0, 700.0, 0.50),
            ConcreteGrade::M25 => MixDesign::new(25.0, 360.0, 680.0, 0.46),
            ConcreteGrade::M30 => MixDesign::new(30.0, 390.0, 660.0, 0.42),
            ConcreteGrade::M35 => MixDesign::new(35.0, 420.0, 640.0, 0.39),
            ConcreteGrade::M40 => MixDesign::new(40.0, 450.0, 620.0, 0.37),
        }
    }
}

impl Default for ConcreteGrade {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Deserialize a grade code, applying the M25 fallback to unknown codes.
///
/// Used on [`crate::building::BuildingParameters`] so that a grade which
/// bypassed boundary validation still yields a usable mix.
pub fn deserialize_grade_or_default<'de, D>(deserializer: D) -> Result<ConcreteGrade, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    Ok(ConcreteGrade::from_code_or_default(&code))
}

/// Mix proportions per cubic meter of concrete.
///
/// ## JSON Example
///
/// ```json
/// {
///   "strength": 25.0,
///   "cement": 360.0,
///   "water": 165.0,
///   "fineAggregate": 680.0,
///   "coarseAggregate": 1265.0,
///   "waterCementRatio": 0.46
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixDesign {
    /// Characteristic compressive strength (MPa)
    pub strength: f64,
    /// Cement content (kg/m³)
    pub cement: f64,
    /// Water content (kg/m³)
    pub water: f64,
    /// Fine aggregate / sand (kg/m³)
    pub fine_aggregate: f64,
    /// Coarse aggregate (kg/m³)
    pub coarse_aggregate: f64,
    /// Water-cement ratio
    pub water_cement_ratio: f64,
}

/// Water content is the same for every grade in the table
const WATER_KG_PER_M3: f64 = 165.0;

/// Coarse aggregate content is the same for every grade in the table
const COARSE_AGGREGATE_KG_PER_M3: f64 = 1265.0;

impl MixDesign {
    const fn new(strength: f64, cement: f64, fine_aggregate: f64, water_cement_ratio: f64) -> Self {
        MixDesign {
            strength,
            cement,
            water: WATER_KG_PER_M3,
            fine_aggregate,
            coarse_aggregate: COARSE_AGGREGATE_KG_PER_M3,
            water_cement_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        let m15 = ConcreteGrade::M15.mix_design();
        assert_eq!(m15.strength, 15.0);
        assert_eq!(m15.cement, 300.0);
        assert_eq!(m15.fine_aggregate, 720.0);
        assert_eq!(m15.water_cement_ratio, 0.55);

        let m40 = ConcreteGrade::M40.mix_design();
        assert_eq!(m40.cement, 450.0);
        assert_eq!(m40.fine_aggregate, 620.0);
        assert_eq!(m40.water_cement_ratio, 0.37);
    }

    #[test]
    fn test_constant_water_and_coarse_aggregate() {
        for grade in ConcreteGrade::ALL {
            let mix = grade.mix_design();
            assert_eq!(mix.water, 165.0, "{grade}");
            assert_eq!(mix.coarse_aggregate, 1265.0, "{grade}");
        }
    }

    #[test]
    fn test_cement_increases_with_grade() {
        let cements: Vec<f64> = ConcreteGrade::ALL.iter().map(|g| g.mix_design().cement).collect();
        assert!(cements.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_fallback_to_m25() {
        assert_eq!(ConcreteGrade::from_code("M99"), None);
        assert_eq!(ConcreteGrade::from_code_or_default("M99"), ConcreteGrade::M25);
        assert_eq!(ConcreteGrade::from_code_or_default(""), ConcreteGrade::M25);
        assert_eq!(ConcreteGrade::from_code_or_default("M30"), ConcreteGrade::M30);
        // Codes are case-sensitive on the wire
        assert_eq!(ConcreteGrade::from_code("m30"), None);
    }

    #[test]
    fn test_flexible_parse() {
        assert_eq!(ConcreteGrade::from_str_flexible("m 35"), Some(ConcreteGrade::M35));
        assert_eq!(ConcreteGrade::from_str_flexible("20"), Some(ConcreteGrade::M20));
        assert_eq!(ConcreteGrade::from_str_flexible("M50"), None);
    }

    #[test]
    fn test_mix_design_serialization() {
        let json = serde_json::to_value(ConcreteGrade::M25.mix_design()).unwrap();
        assert_eq!(json["fineAggregate"], 680.0);
        assert_eq!(json["coarseAggregate"], 1265.0);
        assert_eq!(json["waterCementRatio"], 0.46);
    }

    #[test]
    fn test_lenient_deserializer() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(deserialize_with = "deserialize_grade_or_default")]
            grade: ConcreteGrade,
        }

        let h: Holder = serde_json::from_str(r#"{"grade": "M40"}"#).unwrap();
        assert_eq!(h.grade, ConcreteGrade::M40);
        let h: Holder = serde_json::from_str(r#"{"grade": "C30/37"}"#).unwrap();
        assert_eq!(h.grade, ConcreteGrade::M25);
    }
}
