//! # PDF Generation Module
//!
//! Renders a [`Report`] to PDF using Typst.
//!
//! ## Architecture
//!
//! - The page template is an embedded string constant
//! - Report sections are injected via string formatting before compilation
//! - Fonts come from `typst-assets` and are loaded once per process
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::building::{BuildingParameters, BuildingType};
//! use calc_core::calculations::estimate;
//! use calc_core::materials::ConcreteGrade;
//! use calc_core::pdf::render_report_pdf;
//! use calc_core::report::Report;
//!
//! let params = BuildingParameters::new(20.0, 15.0, 3, BuildingType::Residential, ConcreteGrade::M25);
//! let report = Report::new(estimate(&params));
//! let pdf_bytes = render_report_pdf(&report).unwrap();
//! std::fs::write("building_material_calculation.pdf", pdf_bytes).unwrap();
//! ```

use std::time::Instant;

use chrono::{DateTime, Datelike, Utc};
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::equations::registry::{generate_appendix_typst, ALL_FORMULAS};
use crate::errors::{CalcError, CalcResult};
use crate::report::{Report, ReportSection, REPORT_TITLE};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, parsed on first use
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let mut fonts = Vec::new();
    for font_bytes in typst_assets::fonts() {
        let buffer = Bytes::new(font_bytes.to_vec());
        for font in Font::iter(buffer) {
            fonts.push(font);
        }
    }
    tracing::debug!(count = fonts.len(), "loaded bundled fonts");
    fonts
});

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    book: LazyHash<FontBook>,
    library: LazyHash<Library>,
    /// Date shown by `datetime.today()`
    today: DateTime<Utc>,
}

impl PdfWorld {
    fn new(source: String, today: DateTime<Utc>) -> Self {
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
            today,
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        Datetime::from_ymd(
            self.today.year(),
            self.today.month() as u8,
            self.today.day() as u8,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

const REPORT_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2.5cm, bottom: 2.5cm, left: 2cm, right: 2cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[{{TITLE}}]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 8pt)[Report {{REPORT_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "DejaVu Sans Mono", size: 10pt)

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[{{TITLE}}]
    #v(4pt)
    #text(size: 11pt)[{{SUBTITLE}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Report Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Generated:], [{{GENERATED}}],
      [Grade:], [{{GRADE_SUMMARY}}],
    )
  ],
  [
    *Code References*
    #v(4pt)
    {{CONCRETE_CODE}} (concrete design) \
    {{MIX_CODE}} (mix design)
  ]
)

#v(12pt)
#line(length: 100%, stroke: 0.5pt)

{{SECTIONS}}

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Quantities are preliminary estimates based on simplified rules of thumb. \
  Structural design must be verified by a qualified engineer.
]
{{APPENDIX}}
"##;

// ============================================================================
// PDF Rendering Functions
// ============================================================================

/// Render a report to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::Internal)` - if Typst compilation or export fails
pub fn render_report_pdf(report: &Report) -> CalcResult<Vec<u8>> {
    let started = Instant::now();
    let source = report_typst_source(report);

    let world = PdfWorld::new(source, report.generated_at);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::internal(format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::internal(format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })?;

    tracing::debug!(
        report_id = %report.id,
        bytes = pdf_bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "rendered report pdf"
    );

    Ok(pdf_bytes)
}

/// Typst source for a report, including the formula appendix.
pub fn report_typst_source(report: &Report) -> String {
    let result = &report.result;
    let mix = &result.mix_design;

    REPORT_TEMPLATE
        .replace("{{TITLE}}", REPORT_TITLE)
        .replace(
            "{{SUBTITLE}}",
            &escape_typst(&format!(
                "{:.2} m x {:.2} m, {} floor(s)",
                result.dimensions.length, result.dimensions.width, result.dimensions.floors
            )),
        )
        .replace("{{REPORT_ID}}", &report.id.to_string())
        .replace("{{DATE}}", &report.generated_at.format("%Y-%m-%d").to_string())
        .replace(
            "{{GENERATED}}",
            &report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
        .replace(
            "{{GRADE_SUMMARY}}",
            &format!(
                "{:.0} MPa, w/c {:.2}",
                mix.strength, mix.water_cement_ratio
            ),
        )
        .replace("{{CONCRETE_CODE}}", &escape_typst(&result.code_references.concrete_design))
        .replace("{{MIX_CODE}}", &escape_typst(&result.code_references.mix_design))
        .replace("{{SECTIONS}}", &build_sections(&report.sections()))
        .replace("{{APPENDIX}}", &generate_appendix_typst(ALL_FORMULAS))
}

/// Escape special Typst characters in user-provided text
pub(crate) fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            '/' => "\\/".to_string(),
            '~' => "\\~".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// One heading and two-column table per section
fn build_sections(sections: &[ReportSection]) -> String {
    sections
        .iter()
        .map(|section| {
            let rows = section
                .rows
                .iter()
                .map(|row| {
                    format!(
                        "  [{}], [{}],",
                        escape_typst(&row.label),
                        escape_typst(&row.value)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                r#"
== {}

#table(
  columns: (auto, 1fr),
  inset: 6pt,
  stroke: 0.5pt,
  align: (left, left),
{}
)

#v(8pt)
"#,
                escape_typst(&section.title),
                rows
            )
        })
        .collect()
}
