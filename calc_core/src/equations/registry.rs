//! # Formula Registry
//!
//! Every formula the estimator applies, with enough metadata to print it in
//! a report appendix: a plain-text form, Typst math, the code it cites, its
//! variables and its simplifying assumptions.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::{Formula, ALL_FORMULAS};
//!
//! let meta = Formula::SteelMass.metadata();
//! assert!(meta.formula_plain.contains("7850"));
//! assert!(ALL_FORMULAS.contains(&Formula::SteelMass));
//! ```

use serde::Serialize;

use crate::pdf::escape_typst;

// ============================================================================
// Code References
// ============================================================================

/// Source a formula is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// IS 456:2000 - Plain and Reinforced Concrete, Code of Practice
    IS456 { clause: &'static str },
    /// IS 10262:2019 - Concrete Mix Proportioning, Guidelines
    IS10262 { table: &'static str },
    /// Rule of thumb with no code backing
    Assumption,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::IS456 { clause } => format!("IS 456:2000, {}", clause),
            CodeReference::IS10262 { table } => format!("IS 10262:2019, {}", table),
            CodeReference::Assumption => "Estimating assumption".to_string(),
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Groups for the report appendix, in print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FormulaCategory {
    Geometry,
    ConcreteVolumes,
    Materials,
    Structure,
    Labor,
}

impl FormulaCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::Geometry => "Structural Grid",
            FormulaCategory::ConcreteVolumes => "Concrete Volumes",
            FormulaCategory::Materials => "Material Quantities",
            FormulaCategory::Structure => "Structural Details",
            FormulaCategory::Labor => "Labor",
        }
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// A symbol used in a formula.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    /// Symbol in Typst math notation
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

/// Everything needed to print a formula.
#[derive(Debug, Clone, Serialize)]
pub struct FormulaMetadata {
    pub name: &'static str,
    pub description: &'static str,
    /// Typst math, including the surrounding `$`
    pub formula_typst: &'static str,
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: FormulaCategory,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// Formulas applied by [`crate::calculations::estimate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Formula {
    /// Grid lines per direction at 5 m spacing
    GridLines,
    /// Beams = lines along length x lines along width
    BeamCount,
    /// Columns per floor times floors
    ColumnCount,
    BeamVolume,
    ColumnVolume,
    SlabVolume,
    WallVolume,
    FoundationVolume,
    TotalVolume,
    /// Mix ingredient mass from volume and mix design
    MixQuantities,
    /// 1% reinforcement by volume
    SteelMass,
    LoadBearingCapacity,
    LaborDays,
    LaborCount,
    LaborCost,
}

impl Formula {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            Formula::GridLines => FormulaMetadata {
                name: "Grid Lines",
                description: "Number of beam lines along each plan dimension",
                formula_typst: r#"$n_L = ceil(L / 5) + 1, quad n_W = ceil(W / 5) + 1$"#,
                formula_plain: "nL = ceil(L/5) + 1, nW = ceil(W/5) + 1",
                reference: CodeReference::Assumption,
                variables: vec![
                    Variable::new("L", "Building length", "m"),
                    Variable::new("W", "Building width", "m"),
                    Variable::new("n_L", "Beam lines along the length", "count"),
                    Variable::new("n_W", "Beam lines along the width", "count"),
                ],
                assumptions: vec!["Uniform 5 m grid in both directions"],
                category: FormulaCategory::Geometry,
            },

            Formula::BeamCount => FormulaMetadata {
                name: "Beam Count",
                description: "Beams at grid intersections",
                formula_typst: r#"$N_"beams" = n_L times n_W$"#,
                formula_plain: "Nbeams = nL x nW",
                reference: CodeReference::Assumption,
                variables: vec![Variable::new("N_\"beams\"", "Number of beams", "count")],
                assumptions: vec![],
                category: FormulaCategory::Geometry,
            },

            Formula::ColumnCount => FormulaMetadata {
                name: "Column Count",
                description: "Columns over all floors",
                formula_typst: r#"$N_"col" = ((n_L - 1) n_W + (n_W - 1) n_L) times F$"#,
                formula_plain: "Ncol = ((nL - 1) x nW + (nW - 1) x nL) x F",
                reference: CodeReference::Assumption,
                variables: vec![
                    Variable::new("N_\"col\"", "Number of columns", "count"),
                    Variable::new("F", "Number of floors", "count"),
                ],
                assumptions: vec!["Same column layout on every floor"],
                category: FormulaCategory::Geometry,
            },

            Formula::BeamVolume => FormulaMetadata {
                name: "Beam Volume",
                description: "Concrete in beams over the full building height",
                formula_typst: r#"$V_"beam" = 0.25 times 0.4 times H times N_"beams"$"#,
                formula_plain: "Vbeam = 0.25 x 0.4 x H x Nbeams",
                reference: CodeReference::IS456 { clause: "Clause 23" },
                variables: vec![
                    Variable::new("H", "Building height, floors x 3", "m"),
                    Variable::new("V_\"beam\"", "Beam concrete volume", "m³"),
                ],
                assumptions: vec!["Beam section 250 x 400 mm", "Floor height 3 m"],
                category: FormulaCategory::ConcreteVolumes,
            },

            Formula::ColumnVolume => FormulaMetadata {
                name: "Column Volume",
                description: "Concrete in columns, one storey height each",
                formula_typst: r#"$V_"col" = N_"col" times 0.3^2 times 3$"#,
                formula_plain: "Vcol = Ncol x 0.3^2 x 3",
                reference: CodeReference::IS456 { clause: "Clause 25" },
                variables: vec![Variable::new("V_\"col\"", "Column concrete volume", "m³")],
                assumptions: vec!["Column section 300 x 300 mm"],
                category: FormulaCategory::ConcreteVolumes,
            },

            Formula::SlabVolume => FormulaMetadata {
                name: "Slab Volume",
                description: "Concrete in floor slabs",
                formula_typst: r#"$V_"slab" = L times W times 0.125 times F$"#,
                formula_plain: "Vslab = L x W x 0.125 x F",
                reference: CodeReference::IS456 { clause: "Clause 24" },
                variables: vec![Variable::new("V_\"slab\"", "Slab concrete volume", "m³")],
                assumptions: vec!["Slab thickness 125 mm", "No openings deducted"],
                category: FormulaCategory::ConcreteVolumes,
            },

            Formula::WallVolume => FormulaMetadata {
                name: "Wall Volume",
                description: "Concrete in perimeter walls",
                formula_typst: r#"$V_"wall" = 2(L + W) times 0.2 times H$"#,
                formula_plain: "Vwall = 2(L + W) x 0.2 x H",
                reference: CodeReference::Assumption,
                variables: vec![Variable::new("V_\"wall\"", "Wall concrete volume", "m³")],
                assumptions: vec!["Perimeter walls only, 200 mm thick"],
                category: FormulaCategory::ConcreteVolumes,
            },

            Formula::FoundationVolume => FormulaMetadata {
                name: "Foundation Volume",
                description: "Raft under the full footprint",
                formula_typst: r#"$V_"fdn" = L times W times 1.0$"#,
                formula_plain: "Vfdn = L x W x 1.0",
                reference: CodeReference::Assumption,
                variables: vec![Variable::new("V_\"fdn\"", "Foundation concrete volume", "m³")],
                assumptions: vec!["Foundation depth 1 m"],
                category: FormulaCategory::ConcreteVolumes,
            },

            Formula::TotalVolume => FormulaMetadata {
                name: "Total Concrete Volume",
                description: "Sum of the element volumes",
                formula_typst: r#"$V = V_"beam" + V_"col" + V_"slab" + V_"wall" + V_"fdn"$"#,
                formula_plain: "V = Vbeam + Vcol + Vslab + Vwall + Vfdn",
                reference: CodeReference::Assumption,
                variables: vec![Variable::new("V", "Total concrete volume", "m³")],
                assumptions: vec!["No wastage allowance"],
                category: FormulaCategory::ConcreteVolumes,
            },

            Formula::MixQuantities => FormulaMetadata {
                name: "Mix Ingredients",
                description: "Cement, water, sand and aggregate from the mix design",
                formula_typst: r#"$m_i = V times c_i / 1000$"#,
                formula_plain: "mi = V x ci / 1000",
                reference: CodeReference::IS10262 { table: "Table 5" },
                variables: vec![
                    Variable::new("c_i", "Ingredient content of the mix", "kg/m³"),
                    Variable::new("m_i", "Ingredient quantity (water in m³)", "t"),
                ],
                assumptions: vec!["Water 165 kg/m³ and coarse aggregate 1265 kg/m³ for every grade"],
                category: FormulaCategory::Materials,
            },

            Formula::SteelMass => FormulaMetadata {
                name: "Reinforcement Steel",
                description: "Steel mass at 1% of concrete volume",
                formula_typst: r#"$m_"steel" = V times 0.01 times 7850$"#,
                formula_plain: "msteel = V x 0.01 x 7850",
                reference: CodeReference::IS456 { clause: "Clause 26.5" },
                variables: vec![Variable::new("m_\"steel\"", "Reinforcement mass", "kg")],
                assumptions: vec!["Reinforcement ratio 1% by volume", "Steel density 7850 kg/m³"],
                category: FormulaCategory::Materials,
            },

            Formula::LoadBearingCapacity => FormulaMetadata {
                name: "Load Bearing Capacity",
                description: "Indicative capacity from grade strength and beam sections",
                formula_typst: r#"$P = f_"ck" times N_"beams" times 0.25 times 0.4 times 1000$"#,
                formula_plain: "P = fck x Nbeams x 0.25 x 0.4 x 1000",
                reference: CodeReference::Assumption,
                variables: vec![
                    Variable::new("f_\"ck\"", "Characteristic compressive strength", "MPa"),
                    Variable::new("P", "Load bearing capacity", "kN"),
                ],
                assumptions: vec!["Indicative figure only, not a design check"],
                category: FormulaCategory::Structure,
            },

            Formula::LaborDays => FormulaMetadata {
                name: "Labor Days",
                description: "Laborer-days to build the floor area",
                formula_typst: r#"$D = (L times W times F) / r$"#,
                formula_plain: "D = (L x W x F) / r",
                reference: CodeReference::Assumption,
                variables: vec![
                    Variable::new("r", "Productivity per laborer", "m²/day"),
                    Variable::new("D", "Labor days required", "days"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Labor,
            },

            Formula::LaborCount => FormulaMetadata {
                name: "Laborers",
                description: "Crew size to finish within the project duration",
                formula_typst: r#"$N = ceil(D / T)$"#,
                formula_plain: "N = ceil(D / T)",
                reference: CodeReference::Assumption,
                variables: vec![
                    Variable::new("T", "Project duration", "days"),
                    Variable::new("N", "Number of laborers", "count"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Labor,
            },

            Formula::LaborCost => FormulaMetadata {
                name: "Labor Cost",
                description: "Crew paid for the whole project duration",
                formula_typst: r#"$C = N times w times T$"#,
                formula_plain: "C = N x w x T",
                reference: CodeReference::Assumption,
                variables: vec![Variable::new("w", "Daily wage", "INR/day")],
                assumptions: vec!["Every laborer is paid for the full duration"],
                category: FormulaCategory::Labor,
            },
        }
    }
}

/// All formulas in appendix order
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::GridLines,
    Formula::BeamCount,
    Formula::ColumnCount,
    Formula::BeamVolume,
    Formula::ColumnVolume,
    Formula::SlabVolume,
    Formula::WallVolume,
    Formula::FoundationVolume,
    Formula::TotalVolume,
    Formula::MixQuantities,
    Formula::SteelMass,
    Formula::LoadBearingCapacity,
    Formula::LaborDays,
    Formula::LaborCount,
    Formula::LaborCost,
];

// ============================================================================
// Typst Appendix Generation
// ============================================================================

/// Generate Typst markup for the "Formulas Used" appendix.
///
/// Formulas are grouped by category; within a category they keep the order
/// of `formulas`.
///
/// ```rust
/// use calc_core::equations::registry::{generate_appendix_typst, ALL_FORMULAS};
///
/// let typst = generate_appendix_typst(ALL_FORMULAS);
/// assert!(typst.contains("Formulas Used"));
/// assert!(typst.contains("Reinforcement Steel"));
/// ```
pub fn generate_appendix_typst(formulas: &[Formula]) -> String {
    let mut output = String::new();

    output.push_str(
        r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Appendix: Formulas Used]
  ]
]

#v(12pt)
"##,
    );

    if formulas.is_empty() {
        output.push_str("#text(style: \"italic\")[No formulas recorded.]\n");
        return output;
    }

    let mut categories: Vec<FormulaCategory> =
        formulas.iter().map(|f| f.metadata().category).collect();
    categories.sort();
    categories.dedup();

    for category in categories {
        output.push_str(&format!("\n== {}\n\n", category.display_name()));

        for formula in formulas.iter().filter(|f| f.metadata().category == category) {
            let meta = formula.metadata();

            output.push_str(&format!("=== {}\n\n", escape_typst(meta.name)));
            output.push_str(&format!(
                "#text(size: 10pt)[{}]\n\n",
                escape_typst(meta.description)
            ));
            output.push_str(&format!("*Formula:* {}\n\n", meta.formula_typst));
            output.push_str(&format!(
                "*Reference:* {}\n\n",
                escape_typst(&meta.reference.citation())
            ));

            if !meta.variables.is_empty() {
                output.push_str("#table(\n");
                output.push_str("  columns: (auto, 1fr, auto),\n");
                output.push_str("  inset: 6pt,\n");
                output.push_str("  stroke: 0.5pt,\n");
                output.push_str("  table.header([*Symbol*], [*Description*], [*Units*]),\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "  [${}$], [{}], [{}],\n",
                        var.symbol,
                        escape_typst(var.description),
                        escape_typst(var.units)
                    ));
                }
                output.push_str(")\n\n");
            }

            if !meta.assumptions.is_empty() {
                output.push_str("*Assumptions:*\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", escape_typst(assumption)));
                }
                output.push('\n');
            }

            output.push_str("#line(length: 100%, stroke: 0.25pt + gray)\n\n");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formulas_have_metadata() {
        assert_eq!(ALL_FORMULAS.len(), 15);
        for formula in ALL_FORMULAS {
            let meta = formula.metadata();
            assert!(!meta.name.is_empty(), "{:?} has no name", formula);
            assert!(meta.formula_typst.starts_with('$'), "{:?} math not delimited", formula);
            assert!(meta.formula_typst.ends_with('$'), "{:?} math not delimited", formula);
            assert!(!meta.variables.is_empty(), "{:?} has no variables", formula);
        }
    }

    #[test]
    fn test_key_formulas() {
        assert!(Formula::SteelMass.metadata().formula_plain.contains("0.01 x 7850"));
        assert!(Formula::LaborCount.metadata().formula_plain.contains("ceil"));
        assert!(Formula::BeamVolume.metadata().formula_plain.contains("0.25 x 0.4"));
    }

    #[test]
    fn test_citations() {
        assert_eq!(
            CodeReference::IS456 { clause: "Clause 26.5" }.citation(),
            "IS 456:2000, Clause 26.5"
        );
        assert_eq!(
            CodeReference::IS10262 { table: "Table 5" }.citation(),
            "IS 10262:2019, Table 5"
        );
        assert_eq!(CodeReference::Assumption.citation(), "Estimating assumption");
    }

    #[test]
    fn test_appendix_grouped_by_category() {
        let typst = generate_appendix_typst(ALL_FORMULAS);
        let grid = typst.find("== Structural Grid").unwrap();
        let volumes = typst.find("== Concrete Volumes").unwrap();
        let labor = typst.find("== Labor").unwrap();
        assert!(grid < volumes && volumes < labor);
        assert!(typst.contains("IS 10262:2019"));
    }

    #[test]
    fn test_appendix_escapes_text() {
        let typst = generate_appendix_typst(&[Formula::SteelMass]);
        assert!(typst.contains("Reinforcement ratio 1% by volume"));
        assert!(!typst.contains("== Labor"));
    }

    #[test]
    fn test_empty_appendix() {
        let typst = generate_appendix_typst(&[]);
        assert!(typst.contains("No formulas recorded"));
    }
}
