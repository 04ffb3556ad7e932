//! # Building Estimator CLI
//!
//! Terminal front end for the estimator. Prompts for the building in three
//! steps (defaults in brackets, Enter accepts), prints the report and the
//! JSON result, and optionally writes the PDF report.
//!
//! ```text
//! calc_cli                      # interactive
//! calc_cli --defaults --pdf out.pdf
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use calc_core::building::{BuildingType, LaborCosts, MaterialPrices};
use calc_core::calculations::estimate;
use calc_core::materials::ConcreteGrade;
use calc_core::pdf::render_report_pdf;
use calc_core::report::Report;
use calc_core::units::UnitSystem;
use calc_core::validation::BuildingRequest;

#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(about = "Estimate concrete, materials, cost and labor for a building")]
struct Args {
    /// Write the PDF report to this path
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Skip the prompts and use every default
    #[arg(long)]
    defaults: bool,

    /// Do not print the JSON result
    #[arg(long)]
    no_json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================================
// Prompts
// ============================================================================

struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Raw answer; `None` on empty line or end of input
    fn ask(&mut self, prompt: &str, default: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} [{}]: ", prompt, default)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let answer = line.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }

    /// Ask until the answer parses; Enter or end of input gives the default
    fn choose<T: Copy + std::fmt::Display>(
        &mut self,
        prompt: &str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        loop {
            match self.ask(prompt, &default.to_string())? {
                None => return Ok(default),
                Some(answer) => match parse(&answer) {
                    Some(value) => return Ok(value),
                    None => writeln!(self.output, "  '{}' not recognized, try again", answer)?,
                },
            }
        }
    }

    fn number(&mut self, prompt: &str, default: f64) -> io::Result<f64> {
        self.choose(prompt, default, |s| s.parse::<f64>().ok())
    }

    fn heading(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", text)?;
        writeln!(self.output, "{}", "-".repeat(text.chars().count()))
    }
}

/// Three-step wizard producing an unvalidated request
fn run_wizard<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> io::Result<BuildingRequest> {
    prompter.heading("Step 1/3: Dimensions")?;
    let unit = prompter.choose("Unit system (metric/imperial)", UnitSystem::Metric, UnitSystem::from_str_flexible)?;
    let symbol = unit.length_symbol();
    let length = prompter.number(&format!("Length ({})", symbol), 20.0)?;
    let width = prompter.number(&format!("Width ({})", symbol), 15.0)?;

    prompter.heading("Step 2/3: Building")?;
    let floors = prompter.number("Floors", 3.0)?;
    let building_type = prompter.choose(
        "Building type (Residential/Commercial/Industrial)",
        BuildingType::Residential,
        BuildingType::from_str_flexible,
    )?;
    let grade = prompter.choose(
        "Concrete grade (M15-M40)",
        ConcreteGrade::DEFAULT,
        ConcreteGrade::from_str_flexible,
    )?;

    prompter.heading("Step 3/3: Prices and labor")?;
    let defaults = MaterialPrices::default();
    let material_prices = MaterialPrices {
        cement: prompter.number("Cement price per tonne", defaults.cement)?,
        sand: prompter.number("Sand price per tonne", defaults.sand)?,
        aggregate: prompter.number("Aggregate price per tonne", defaults.aggregate)?,
        steel: prompter.number("Steel price per kg", defaults.steel)?,
        water: prompter.number("Water price per m³", defaults.water)?,
    };
    let defaults = LaborCosts::default();
    let labor_costs = LaborCosts {
        daily_wage: prompter.number("Daily wage per laborer", defaults.daily_wage)?,
        productivity_rate: prompter.number("Productivity (m² per laborer per day)", defaults.productivity_rate)?,
        project_duration: prompter.number("Project duration (days)", defaults.project_duration)?,
    };

    Ok(BuildingRequest {
        length: Some(length),
        width: Some(width),
        floors: Some(floors),
        building_type: Some(building_type.name().to_string()),
        concrete_grade: Some(grade.code().to_string()),
        unit: Some(unit),
        material_prices: Some(material_prices),
        labor_costs: Some(labor_costs),
    })
}

fn default_request() -> BuildingRequest {
    BuildingRequest {
        length: Some(20.0),
        width: Some(15.0),
        floors: Some(3.0),
        building_type: Some(BuildingType::Residential.name().to_string()),
        concrete_grade: Some(ConcreteGrade::DEFAULT.code().to_string()),
        ..BuildingRequest::default()
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(io::stderr)
        .init();

    println!("Building Material Estimator");
    println!("===========================");

    let request = if args.defaults {
        default_request()
    } else {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        run_wizard(&mut prompter)?
    };

    let params = request.validate()?;
    let report = Report::new(estimate(&params));

    println!();
    print!("{}", report.to_text());

    if !args.no_json {
        println!();
        println!("{}", serde_json::to_string_pretty(&report.result)?);
    }

    if let Some(path) = args.pdf {
        let pdf = render_report_pdf(&report)?;
        std::fs::write(&path, pdf)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!();
        println!("PDF report written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wizard(input: &str) -> (BuildingRequest, String) {
        let mut output = Vec::new();
        let request = {
            let mut prompter = Prompter::new(Cursor::new(input.as_bytes()), &mut output);
            run_wizard(&mut prompter).unwrap()
        };
        (request, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_all_defaults_on_empty_input() {
        let (request, output) = wizard("");
        let params = request.validate().unwrap();
        assert_eq!(params.length, 20.0);
        assert_eq!(params.floors, 3);
        assert_eq!(params.building_type, BuildingType::Residential);
        assert_eq!(params.material_prices, MaterialPrices::default());
        assert!(output.contains("Step 1/3"));
        assert!(output.contains("Step 3/3"));
    }

    #[test]
    fn test_answers_override_defaults() {
        let (request, _) = wizard("imperial\n65\n50\n2\ncom\nM30\n7000\n\n\n\n\n\n\n\n");
        let params = request.validate().unwrap();
        assert_eq!(params.unit, UnitSystem::Imperial);
        assert_eq!(params.length, 65.0);
        assert_eq!(params.building_type, BuildingType::Commercial);
        assert_eq!(params.concrete_grade, ConcreteGrade::M30);
        assert_eq!(params.material_prices.cement, 7000.0);
        assert_eq!(params.material_prices.sand, 1800.0);
    }

    #[test]
    fn test_unrecognized_answer_reprompts() {
        let (request, output) = wizard("\n\n\n\nHospital\nind\n");
        assert_eq!(request.building_type.as_deref(), Some("Industrial"));
        assert!(output.contains("'Hospital' not recognized"));
    }

    #[test]
    fn test_zero_floors_fail_validation() {
        let (request, _) = wizard("\n\n\n0\n");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_default_request_is_valid() {
        assert!(default_request().validate().is_ok());
    }
}
