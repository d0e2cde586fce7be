//! Heuristic valuation estimate for an early stage company.
//!
//! The estimate is a base range keyed on the funding stage, scaled by three
//! multipliers (industry, location, company age). Every factor is returned so
//! the caller can show how the number was built.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

/// Base range in millions of dollars used when the stage is not recognized.
pub const DEFAULT_BASE_RANGE: (f64, f64) = (5.0, 20.0);
/// Age assumed when the founding date cannot be parsed.
pub const DEFAULT_AGE_YEARS: i64 = 3;

const DAYS_PER_YEAR: f64 = 365.25;
const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum FundingStage {
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    SeriesC,
    SeriesD,
    SeriesE,
    LateStage,
    Ipo,
}

impl FundingStage {
    pub const ALL: [FundingStage; 9] = [
        FundingStage::PreSeed,
        FundingStage::Seed,
        FundingStage::SeriesA,
        FundingStage::SeriesB,
        FundingStage::SeriesC,
        FundingStage::SeriesD,
        FundingStage::SeriesE,
        FundingStage::LateStage,
        FundingStage::Ipo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FundingStage::PreSeed => "Pre-Seed",
            FundingStage::Seed => "Seed",
            FundingStage::SeriesA => "Series A",
            FundingStage::SeriesB => "Series B",
            FundingStage::SeriesC => "Series C",
            FundingStage::SeriesD => "Series D",
            FundingStage::SeriesE => "Series E",
            FundingStage::LateStage => "Late Stage",
            FundingStage::Ipo => "IPO",
        }
    }

    /// Valuation range in millions of dollars.
    pub fn base_range(&self) -> (f64, f64) {
        match self {
            FundingStage::PreSeed => (1.0, 5.0),
            FundingStage::Seed => (5.0, 15.0),
            FundingStage::SeriesA => (15.0, 50.0),
            FundingStage::SeriesB => (50.0, 150.0),
            FundingStage::SeriesC => (150.0, 400.0),
            FundingStage::SeriesD => (400.0, 800.0),
            FundingStage::SeriesE => (800.0, 1500.0),
            FundingStage::LateStage => (1500.0, 3000.0),
            FundingStage::Ipo => (3000.0, 10000.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Fintech,
    AiMl,
    Saas,
    Healthtech,
    Biotech,
    Cleantech,
    ECommerce,
    Edtech,
}

impl Industry {
    pub const ALL: [Industry; 8] = [
        Industry::Fintech,
        Industry::AiMl,
        Industry::Saas,
        Industry::Healthtech,
        Industry::Biotech,
        Industry::Cleantech,
        Industry::ECommerce,
        Industry::Edtech,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Industry::Fintech => "Fintech",
            Industry::AiMl => "AI/ML",
            Industry::Saas => "SaaS",
            Industry::Healthtech => "Healthtech",
            Industry::Biotech => "Biotech",
            Industry::Cleantech => "Cleantech",
            Industry::ECommerce => "E-commerce",
            Industry::Edtech => "Edtech",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Industry::Fintech => 1.3,
            Industry::AiMl => 1.5,
            Industry::Saas => 1.4,
            Industry::Healthtech => 1.2,
            Industry::Biotech => 1.25,
            Industry::Cleantech => 1.1,
            Industry::ECommerce => 0.9,
            Industry::Edtech => 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    SanFrancisco,
    NewYork,
    Boston,
    LosAngeles,
    Seattle,
    Austin,
    London,
    Singapore,
    Bangalore,
}

impl Location {
    pub const ALL: [Location; 9] = [
        Location::SanFrancisco,
        Location::NewYork,
        Location::Boston,
        Location::LosAngeles,
        Location::Seattle,
        Location::Austin,
        Location::London,
        Location::Singapore,
        Location::Bangalore,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Location::SanFrancisco => "San Francisco",
            Location::NewYork => "New York",
            Location::Boston => "Boston",
            Location::LosAngeles => "Los Angeles",
            Location::Seattle => "Seattle",
            Location::Austin => "Austin",
            Location::London => "London",
            Location::Singapore => "Singapore",
            Location::Bangalore => "Bangalore",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            Location::SanFrancisco => 1.3,
            Location::NewYork => 1.2,
            Location::Boston => 1.1,
            Location::LosAngeles => 1.1,
            Location::Seattle => 1.1,
            Location::Austin => 1.05,
            Location::London => 1.1,
            Location::Singapore => 1.0,
            Location::Bangalore => 0.8,
        }
    }
}

macro_rules! label_impls {
    ($ty:ident, $kind:literal) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl FromStr for $ty {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| anyhow::anyhow!("Unknown {}: {}", $kind, s))
            }
        }
    };
}

label_impls!(FundingStage, "funding stage");
label_impls!(Industry, "industry");
label_impls!(Location, "location");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationInput {
    pub stage: String,
    pub industry: String,
    pub location: String,
    pub founded_date: String,
}

/// An estimated valuation range in millions of dollars, with every factor that
/// went into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub low: f64,
    pub high: f64,
    pub base_range: (f64, f64),
    pub industry_multiplier: f64,
    pub location_multiplier: f64,
    pub age_years: i64,
    /// True when the founding date could not be parsed and `age_years` is
    /// the default.
    pub age_assumed: bool,
    pub age_multiplier: f64,
    pub combined_multiplier: f64,
}

impl ValuationInput {
    pub fn estimate(&self, now: DateTime<Utc>) -> ValuationResult {
        estimate_valuation(
            &self.stage,
            &self.industry,
            &self.location,
            &self.founded_date,
            now,
        )
    }
}

/// Estimates a valuation range. Unknown inputs degrade to neutral defaults,
/// so this never fails.
pub fn estimate_valuation(
    stage: &str,
    industry: &str,
    location: &str,
    founded_date: &str,
    now: DateTime<Utc>,
) -> ValuationResult {
    let base_range = stage
        .parse::<FundingStage>()
        .map(|s| s.base_range())
        .unwrap_or(DEFAULT_BASE_RANGE);
    let industry_multiplier = industry
        .parse::<Industry>()
        .map(|i| i.multiplier())
        .unwrap_or(1.0);
    let location_multiplier = location
        .parse::<Location>()
        .map(|l| l.multiplier())
        .unwrap_or(1.0);

    let (age_years, age_assumed, age_multiplier) = match company_age_years(founded_date, now) {
        Some(age) => (age, false, age_multiplier(age)),
        None => {
            debug!(founded_date, "Unparseable founding date, assuming default age");
            (DEFAULT_AGE_YEARS, true, 1.0)
        }
    };

    let combined_multiplier = industry_multiplier * location_multiplier * age_multiplier;
    debug!(
        ?base_range,
        industry_multiplier, location_multiplier, age_years, age_multiplier, combined_multiplier,
        "Computed valuation factors"
    );

    ValuationResult {
        low: round2(base_range.0 * combined_multiplier),
        high: round2(base_range.1 * combined_multiplier),
        base_range,
        industry_multiplier,
        location_multiplier,
        age_years,
        age_assumed,
        age_multiplier,
        combined_multiplier,
    }
}

/// Whole years between the founding date and `now`. Only the part before the
/// first space is parsed, as `YYYY-MM-DD`.
pub fn company_age_years(founded_date: &str, now: DateTime<Utc>) -> Option<i64> {
    let date_part = founded_date.trim().split(' ').next()?;
    let founded = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let founded = founded.and_hms_opt(0, 0, 0)?.and_utc();

    let elapsed_days = (now - founded).num_seconds() as f64 / SECONDS_PER_DAY;
    Some((elapsed_days / DAYS_PER_YEAR).floor() as i64)
}

pub fn age_multiplier(age_years: i64) -> f64 {
    match age_years {
        a if a < 1 => 0.8,
        a if a < 3 => 1.0,
        a if a < 6 => 1.1,
        a if a < 10 => 1.2,
        _ => 1.0,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
