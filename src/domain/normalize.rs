// src/domain/normalize.rs

use crate::domain::listing::NormalizedListing;
use crate::scraper::RawListing;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

static BHK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*bhk").expect("valid bhk pattern"));
static BATHROOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*bathroom").expect("valid bathroom pattern"));
static AREA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(sqft|ft)").expect("valid area pattern"));

const INFO_DELIMITER: &str = " - ";

/// How an area given in a unit other than `sqft` is turned into a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AreaPolicy {
    /// Square the value. This is dimensionally wrong for "850 ft", but it is
    /// what every row already in the dataset was computed with.
    #[default]
    LegacySquare,
    /// Read "ft" as shorthand for square feet and keep the value.
    FtAsSqft,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    #[error("no price in listing")]
    Missing,
    #[error("price '{0}' is not a whole number")]
    Invalid(String),
}

/// Fields parsed out of the free-text info line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InfoFields {
    pub bhk: Option<u32>,
    pub bathroom: Option<u32>,
    pub area: Option<f64>,
}

/// "₹ 45,000" -> 45000
pub fn coerce_price(raw: &str) -> Result<u64, PriceError> {
    let cleaned: String = raw.chars().filter(|c| *c != '₹' && *c != ',').collect();
    let cleaned = cleaned.trim();

    cleaned
        .parse::<u64>()
        .map_err(|_| PriceError::Invalid(raw.to_string()))
}

/// Parse "3 BHK - 2 Bathroom - 1450 sqft".
///
/// Each segment is classified by the first marker it contains, checked in the
/// order bhk, bathroom, sqft/ft. The first value found for a category is kept.
pub fn parse_info(info: Option<&str>, policy: AreaPolicy) -> InfoFields {
    let mut fields = InfoFields::default();
    let Some(info) = info else {
        return fields;
    };

    for segment in info.split(INFO_DELIMITER) {
        let segment = segment.trim().to_lowercase();

        if segment.contains("bhk") {
            if fields.bhk.is_none() {
                fields.bhk = capture_count(&BHK_RE, &segment);
            }
        } else if segment.contains("bathroom") {
            if fields.bathroom.is_none() {
                fields.bathroom = capture_count(&BATHROOM_RE, &segment);
            }
        } else if segment.contains("ft") && fields.area.is_none() {
            // "sqft" contains "ft", one test covers both
            fields.area = capture_area(&segment, policy);
        }
    }

    fields
}

/// Text before the first comma, or the whole string.
pub fn locality(location: &str) -> &str {
    location.split(',').next().unwrap_or(location)
}

/// Blank text is stored as an empty cell and reads back as null, so it is
/// null in memory too.
fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

pub fn normalize(raw: &RawListing, policy: AreaPolicy) -> Result<NormalizedListing, PriceError> {
    let price = coerce_price(raw.raw_price.as_deref().ok_or(PriceError::Missing)?)?;
    let info = parse_info(raw.raw_info.as_deref(), policy);
    let location = non_blank(raw.location.as_deref());

    Ok(NormalizedListing {
        title: non_blank(raw.title.as_deref()),
        locality: non_blank(location.as_deref().map(locality)),
        location,
        price,
        link: non_blank(raw.link.as_deref()),
        image: non_blank(raw.image.as_deref()),
        info: non_blank(raw.raw_info.as_deref()),
        bhk: info.bhk,
        bathroom: info.bathroom,
        area: info.area,
    })
}

#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub listings: Vec<NormalizedListing>,
    pub rejected: Vec<(RawListing, PriceError)>,
}

/// Normalize a scraped batch. Rows whose price can't be read are set aside
/// with the reason instead of failing the batch.
pub fn normalize_batch(raw: &[RawListing], policy: AreaPolicy) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for listing in raw {
        match normalize(listing, policy) {
            Ok(row) => report.listings.push(row),
            Err(e) => {
                warn!(
                    "Dropping listing '{}': {e}",
                    listing.title.as_deref().unwrap_or("<untitled>")
                );
                report.rejected.push((listing.clone(), e));
            }
        }
    }

    report
}

fn capture_count(re: &Regex, segment: &str) -> Option<u32> {
    re.captures(segment)?.get(1)?.as_str().parse().ok()
}

fn capture_area(segment: &str, policy: AreaPolicy) -> Option<f64> {
    let caps = AREA_RE.captures(segment)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str();

    let area = match (unit, policy) {
        ("sqft", _) | (_, AreaPolicy::FtAsSqft) => value,
        (_, AreaPolicy::LegacySquare) => value * value,
    };
    Some(round2(area))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
