use serde::{Deserialize, Serialize};

// One advertisement container on a search results page:
//
// li._1DNjI
//  ├── a[href]            -> link (relative, absolutized against the origin)
//  ├── img._3vnjf | _2hBzJ -> image
//  ├── span._2Ks63        -> raw price ("₹ 45,000")
//  ├── span._2poNJ        -> title
//  ├── span.YBbhy         -> info ("2 BHK - 1 Bathroom - 850 sqft")
//  └── span._2VQu4        -> location ("Dwarka, New Delhi")

/// A listing as found in the markup. Every field is independently optional;
/// a missing marker becomes `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Price")]
    pub raw_price: Option<String>,
    #[serde(rename = "Link")]
    pub link: Option<String>,
    #[serde(rename = "Image")]
    pub image: Option<String>,
    #[serde(rename = "Info")]
    pub raw_info: Option<String>,
}

impl RawListing {
    /// Names of the fields that came back empty, for debug logging.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("title", self.title.is_none()),
            ("location", self.location.is_none()),
            ("price", self.raw_price.is_none()),
            ("link", self.link.is_none()),
            ("image", self.image.is_none()),
            ("info", self.raw_info.is_none()),
        ];
        fields
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }
}
