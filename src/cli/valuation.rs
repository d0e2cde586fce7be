use super::ui;
use crate::core::config::AppConfig;
use crate::core::valuation::{FundingStage, Industry, Location, ValuationInput, ValuationResult};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use comfy_table::Cell;
use tracing::{debug, warn};

/// Inputs given on the command line. Anything left out is taken from the
/// configured profile.
#[derive(Debug, Clone, Default)]
pub struct ValuationOptions {
    pub stage: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub founded: Option<String>,
    pub as_of: Option<String>,
    pub json: bool,
}

impl ValuationOptions {
    fn to_input(&self, config: &AppConfig) -> ValuationInput {
        let profile = config.profile.as_ref().map(|p| p.valuation_input());
        let pick = |given: &Option<String>, from_profile: Option<&String>, name: &str| {
            given.clone().or_else(|| from_profile.cloned()).unwrap_or_else(|| {
                warn!("No {name} given and none in profile, using the default");
                String::new()
            })
        };

        ValuationInput {
            stage: pick(&self.stage, profile.as_ref().map(|p| &p.stage), "stage"),
            industry: pick(&self.industry, profile.as_ref().map(|p| &p.industry), "industry"),
            location: pick(&self.location, profile.as_ref().map(|p| &p.location), "location"),
            founded_date: pick(
                &self.founded,
                profile.as_ref().map(|p| &p.founded_date),
                "founding date",
            ),
        }
    }

    fn now(&self) -> Result<DateTime<Utc>> {
        match &self.as_of {
            Some(date) => parse_as_of(date),
            None => Ok(Utc::now()),
        }
    }
}

fn parse_as_of(date: &str) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid --as-of date, expected YYYY-MM-DD: {date}"))?;
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .context("Invalid --as-of date")
}

/// Resolves the inputs against the profile and estimates at the requested
/// point in time.
pub fn estimate(
    config: &AppConfig,
    options: &ValuationOptions,
) -> Result<(ValuationInput, ValuationResult)> {
    let input = options.to_input(config);
    let now = options.now()?;
    debug!(?input, %now, "Estimating valuation");

    let result = input.estimate(now);
    Ok((input, result))
}

pub fn run(config: &AppConfig, options: &ValuationOptions) -> Result<()> {
    let (input, result) = estimate(config, options)?;
    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to encode valuation")?
        );
    } else {
        println!("{}", render(&input, &result));
    }
    Ok(())
}

fn factor_label<T: std::fmt::Display>(raw: &str, parsed: Result<T>) -> String {
    match parsed {
        Ok(known) => known.to_string(),
        Err(_) if raw.trim().is_empty() => "(not set)".to_string(),
        Err(_) => format!("{raw} (unrecognized)"),
    }
}

/// Renders the estimate with every factor that went into it.
pub fn render(input: &ValuationInput, result: &ValuationResult) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Factor"),
        ui::header_cell("Value"),
        ui::header_cell("Effect"),
    ]);

    let (base_low, base_high) = result.base_range;
    table.add_row(vec![
        Cell::new("Stage"),
        Cell::new(factor_label(&input.stage, input.stage.parse::<FundingStage>())),
        ui::number_cell(format!("${base_low:.2}M - ${base_high:.2}M")),
    ]);
    table.add_row(vec![
        Cell::new("Industry"),
        Cell::new(factor_label(&input.industry, input.industry.parse::<Industry>())),
        ui::multiplier_cell(result.industry_multiplier),
    ]);
    table.add_row(vec![
        Cell::new("Location"),
        Cell::new(factor_label(&input.location, input.location.parse::<Location>())),
        ui::multiplier_cell(result.location_multiplier),
    ]);

    let age_text = if result.age_assumed {
        format!("{} years (assumed)", result.age_years)
    } else {
        format!("{} years", result.age_years)
    };
    table.add_row(vec![
        Cell::new("Company age"),
        Cell::new(age_text),
        ui::multiplier_cell(result.age_multiplier),
    ]);
    table.add_row(vec![
        Cell::new("Combined"),
        Cell::new(""),
        ui::multiplier_cell(result.combined_multiplier),
    ]);

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Valuation estimate", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}: {}\n{}",
        ui::style_text("Estimated valuation", ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("${:.2}M - ${:.2}M", result.low, result.high),
            ui::StyleType::TotalValue
        ),
        ui::style_text(
            "A rule of thumb from stage, sector, city and age. Not a substitute for market comparables.",
            ui::StyleType::Subtle
        ),
    ));
    output
}

/// Lists the stages, industries and locations the estimator recognizes.
pub fn list_factors() {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Stage"), ui::header_cell("Base range")]);
    for stage in FundingStage::ALL {
        let (low, high) = stage.base_range();
        table.add_row(vec![
            Cell::new(stage.label()),
            ui::number_cell(format!("${low:.0}M - ${high:.0}M")),
        ]);
    }
    println!("{table}\n");

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Industry"), ui::header_cell("Multiplier")]);
    for industry in Industry::ALL {
        table.add_row(vec![
            Cell::new(industry.label()),
            ui::multiplier_cell(industry.multiplier()),
        ]);
    }
    println!("{table}\n");

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Location"), ui::header_cell("Multiplier")]);
    for location in Location::ALL {
        table.add_row(vec![
            Cell::new(location.label()),
            ui::multiplier_cell(location.multiplier()),
        ]);
    }
    println!("{table}");
}
