use serde::{Deserialize, Deserializer, Serialize};

/// Column order of the persisted dataset.
pub const COLUMNS: [&str; 10] = [
    "Title", "Location", "Price", "Link", "Image", "Info", "BHK", "Bathroom", "Area", "Locality",
];

/// A listing with typed price and the fields derived from the info line.
/// Nulls are kept as-is; consumers decide which columns they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedListing {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Price")]
    pub price: u64,
    #[serde(rename = "Link")]
    pub link: Option<String>,
    #[serde(rename = "Image")]
    pub image: Option<String>,
    #[serde(rename = "Info")]
    pub info: Option<String>,
    #[serde(rename = "BHK", deserialize_with = "de_opt_count")]
    pub bhk: Option<u32>,
    #[serde(rename = "Bathroom", deserialize_with = "de_opt_count")]
    pub bathroom: Option<u32>,
    #[serde(rename = "Area")]
    pub area: Option<f64>,
    #[serde(rename = "Locality", default)]
    pub locality: Option<String>,
}

/// Hashable stand-in for a row; two rows are duplicates iff their keys match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    title: Option<String>,
    location: Option<String>,
    price: u64,
    link: Option<String>,
    image: Option<String>,
    info: Option<String>,
    bhk: Option<u32>,
    bathroom: Option<u32>,
    area_bits: Option<u64>,
    locality: Option<String>,
}

impl NormalizedListing {
    pub fn row_key(&self) -> RowKey {
        RowKey {
            title: self.title.clone(),
            location: self.location.clone(),
            price: self.price,
            link: self.link.clone(),
            image: self.image.clone(),
            info: self.info.clone(),
            bhk: self.bhk,
            bathroom: self.bathroom,
            // 0.0 and -0.0 must collapse
            area_bits: self.area.map(|a| (a + 0.0).to_bits()),
            locality: self.locality.clone(),
        }
    }
}

// Older files were written by a dataframe library that stores nullable
// integer columns as floats ("3.0").
fn de_opt_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    if let Ok(n) = raw.parse::<u32>() {
        return Ok(Some(n));
    }
    match raw.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Ok(Some(f as u32)),
        _ => Err(serde::de::Error::custom(format!("not a count: '{raw}'"))),
    }
}
