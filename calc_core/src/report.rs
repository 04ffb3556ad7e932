//! # Report Model
//!
//! A [`Report`] wraps an [`EstimationResult`] with an id and a generation
//! time, and lays it out as ordered sections of label/value rows. The PDF
//! renderer, the email body and the terminal front end all print the same
//! sections, so they stay in agreement on wording and rounding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::EstimationResult;

/// Title used on the PDF and in the email subject
pub const REPORT_TITLE: &str = "Building Material Calculation Report";

/// Attachment / download file name
pub const REPORT_FILE_NAME: &str = "building_material_calculation.pdf";

/// Currency label for cost rows
pub const CURRENCY: &str = "INR";

/// One label/value line of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

impl ReportRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        ReportRow {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A titled block of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

/// An estimate prepared for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub result: EstimationResult,
}

impl Report {
    /// Stamp a fresh id and the current time on a result.
    pub fn new(result: EstimationResult) -> Self {
        Report {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            result,
        }
    }

    /// Sections in print order.
    ///
    /// ```rust
    /// use calc_core::building::{BuildingParameters, BuildingType};
    /// use calc_core::calculations::estimate;
    /// use calc_core::materials::ConcreteGrade;
    /// use calc_core::report::Report;
    ///
    /// let params = BuildingParameters::new(20.0, 15.0, 3, BuildingType::Residential, ConcreteGrade::M25);
    /// let report = Report::new(estimate(&params));
    /// let sections = report.sections();
    ///
    /// assert_eq!(sections[0].title, "Building Dimensions");
    /// assert_eq!(sections[0].rows[3].value, "9.00 m");
    /// ```
    pub fn sections(&self) -> Vec<ReportSection> {
        let r = &self.result;
        let d = &r.dimensions;
        let q = &r.quantities;
        let c = &r.costs;
        let l = &r.labor;
        let s = &r.structural_details;

        vec![
            ReportSection {
                title: "Building Dimensions".to_string(),
                rows: vec![
                    ReportRow::new("Length", format!("{:.2} m", d.length)),
                    ReportRow::new("Width", format!("{:.2} m", d.width)),
                    ReportRow::new("Floors", d.floors.to_string()),
                    ReportRow::new("Building Height", format!("{:.2} m", d.building_height)),
                ],
            },
            ReportSection {
                title: "Material Quantities".to_string(),
                rows: vec![
                    ReportRow::new(
                        "Total Concrete Volume",
                        format!("{:.2} m³", q.total_concrete_volume),
                    ),
                    ReportRow::new("Cement", format!("{:.2} tons", q.cement)),
                    ReportRow::new("Water", format!("{:.2} m³", q.water)),
                    ReportRow::new("Sand", format!("{:.2} tons", q.sand)),
                    ReportRow::new("Aggregate", format!("{:.2} tons", q.aggregate)),
                    ReportRow::new("Steel", format!("{:.2} kg", q.steel)),
                ],
            },
            ReportSection {
                title: "Costs".to_string(),
                rows: vec![
                    ReportRow::new("Cement", money(c.cement)),
                    ReportRow::new("Sand", money(c.sand)),
                    ReportRow::new("Aggregate", money(c.aggregate)),
                    ReportRow::new("Steel", money(c.steel)),
                    ReportRow::new("Water", money(c.water)),
                    ReportRow::new("Labor", money(c.labor)),
                    ReportRow::new("Total", money(c.total)),
                ],
            },
            ReportSection {
                title: "Labor Details".to_string(),
                rows: vec![
                    ReportRow::new("Number of Laborers", l.number_of_laborers.to_string()),
                    ReportRow::new(
                        "Labor Days Required",
                        format!("{:.2} days", l.labor_days_required),
                    ),
                    ReportRow::new("Total Labor Cost", money(l.total_labor_cost)),
                ],
            },
            ReportSection {
                title: "Structural Details".to_string(),
                rows: vec![
                    ReportRow::new("Number of Columns", s.num_columns.to_string()),
                    ReportRow::new("Number of Beams", s.num_beams.to_string()),
                    ReportRow::new("Beam Spacing", format!("{:.2} m", s.beam_spacing)),
                    ReportRow::new("Slab Type", s.slab_type.label()),
                    ReportRow::new(
                        "Load Bearing Capacity",
                        format!("{:.2} kN", s.load_bearing_capacity),
                    ),
                ],
            },
            ReportSection {
                title: "Sustainability Suggestions".to_string(),
                rows: r
                    .sustainability_suggestions
                    .iter()
                    .enumerate()
                    .map(|(i, tip)| ReportRow::new(format!("{}", i + 1), tip.clone()))
                    .collect(),
            },
        ]
    }

    /// Plain-text rendering for terminals and logs.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n", REPORT_TITLE);
        out.push_str(&format!(
            "Generated {}  (report {})\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC"),
            self.id
        ));
        for section in self.sections() {
            out.push_str(&format!("\n{}\n", section.title));
            out.push_str(&format!("{}\n", "-".repeat(section.title.chars().count())));
            for row in &section.rows {
                out.push_str(&format!("  {:<24} {}\n", row.label, row.value));
            }
        }
        out
    }

    /// HTML body used for email delivery.
    pub fn to_html(&self) -> String {
        let mut html = format!("<h1>{}</h1>\n", escape_html(REPORT_TITLE));
        html.push_str(&format!(
            "<p>Generated {}</p>\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        for section in self.sections() {
            html.push_str(&format!("<h2>{}</h2>\n<table>\n", escape_html(&section.title)));
            for row in &section.rows {
                html.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&row.label),
                    escape_html(&row.value)
                ));
            }
            html.push_str("</table>\n");
        }
        html.push_str("<p>The full report is attached as a PDF.</p>\n");
        html
    }
}

fn money(amount: f64) -> String {
    format!("{} {:.2}", CURRENCY, amount)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::{BuildingParameters, BuildingType};
    use crate::calculations::estimate;
    use crate::materials::ConcreteGrade;
    use pretty_assertions::assert_eq;

    fn reference_report() -> Report {
        let params =
            BuildingParameters::new(20.0, 15.0, 3, BuildingType::Residential, ConcreteGrade::M25);
        Report::new(estimate(&params))
    }

    #[test]
    fn test_section_order() {
        let titles: Vec<String> = reference_report()
            .sections()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Building Dimensions",
                "Material Quantities",
                "Costs",
                "Labor Details",
                "Structural Details",
                "Sustainability Suggestions",
            ]
        );
    }

    #[test]
    fn test_two_decimal_values() {
        let sections = reference_report().sections();
        assert_eq!(sections[0].rows[0].value, "20.00 m");
        assert_eq!(sections[0].rows[2].value, "3");
        assert_eq!(sections[1].rows[0].value, "581.61 m³");
        assert_eq!(sections[2].rows[5].value, "INR 450000.00");
        assert_eq!(sections[3].rows[0].value, "5");
        assert_eq!(sections[4].rows[3].value, "One-way slab");
        assert_eq!(sections[4].rows[4].value, "50000.00 kN");
    }

    #[test]
    fn test_suggestions_numbered() {
        let sections = reference_report().sections();
        let tips = &sections[5].rows;
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[0].label, "1");
        assert!(tips[2].value.contains("fly ash"));
    }

    #[test]
    fn test_reports_get_distinct_ids() {
        assert_ne!(reference_report().id, reference_report().id);
    }

    #[test]
    fn test_text_and_html_contain_sections() {
        let report = reference_report();
        let text = report.to_text();
        assert!(text.starts_with(REPORT_TITLE));
        assert!(text.contains("Labor Details"));

        let html = report.to_html();
        assert!(html.contains("<h2>Structural Details</h2>"));
        assert!(html.contains("INR 450000.00"));
    }

    #[test]
    fn test_html_escaping() {
        assert_eq!(escape_html("<a & b>"), "&lt;a &amp; b&gt;");
    }
}
