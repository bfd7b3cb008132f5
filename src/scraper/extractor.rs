// extractor.rs
use crate::errors::{PipelineError, Result};
use crate::scraper::RawListing;
use ::scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// Finds one field inside an advertisement container.
/// A miss is `None`; locators never fail the whole listing.
pub trait FieldLocator {
    fn locate(&self, ad: ElementRef<'_>) -> Option<String>;
}

/// What to pull out of a matched element.
#[derive(Debug, Clone)]
pub enum Extract {
    /// Text nodes, each trimmed, concatenated.
    Text,
    Attr(&'static str),
}

/// Ordered CSS selectors; the first one that yields a non-empty value wins.
pub struct SelectorLocator {
    selectors: Vec<Selector>,
    extract: Extract,
}

impl SelectorLocator {
    pub fn new(selectors: &[&str], extract: Extract) -> Result<Self> {
        let selectors = selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors, extract })
    }

    pub fn text(selector: &str) -> Result<Self> {
        Self::new(&[selector], Extract::Text)
    }
}

impl FieldLocator for SelectorLocator {
    fn locate(&self, ad: ElementRef<'_>) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            let element = ad.select(selector).next()?;
            match self.extract {
                Extract::Text => non_empty(stripped_text(element)),
                Extract::Attr(name) => element
                    .value()
                    .attr(name)
                    .and_then(|v| non_empty(v.trim().to_string())),
            }
        })
    }
}

/// The structural markers of one site layout.
pub struct ListingLayout {
    container: Selector,
    origin: Url,
    pub title: Box<dyn FieldLocator>,
    pub location: Box<dyn FieldLocator>,
    pub price: Box<dyn FieldLocator>,
    pub link: Box<dyn FieldLocator>,
    pub image: Box<dyn FieldLocator>,
    pub info: Box<dyn FieldLocator>,
}

impl ListingLayout {
    /// Markers used by the OLX search results page.
    pub fn olx(origin: Url) -> Result<Self> {
        Ok(Self {
            container: parse_selector("li._1DNjI")?,
            origin,
            title: Box::new(SelectorLocator::text("span._2poNJ")?),
            location: Box::new(SelectorLocator::text("span._2VQu4")?),
            price: Box::new(SelectorLocator::text("span._2Ks63")?),
            link: Box::new(SelectorLocator::new(&["a[href]"], Extract::Attr("href"))?),
            // Two templates are in circulation.
            image: Box::new(SelectorLocator::new(
                &["img._3vnjf", "img._2hBzJ"],
                Extract::Attr("src"),
            )?),
            info: Box::new(SelectorLocator::text("span.YBbhy")?),
        })
    }

    #[cfg(test)]
    pub fn with_container(mut self, selector: &str) -> Result<Self> {
        self.container = parse_selector(selector)?;
        Ok(self)
    }

    /// Parse one page into raw listings, in document order.
    pub fn extract(&self, html: &str) -> Vec<RawListing> {
        let document = Html::parse_document(html);

        document
            .select(&self.container)
            .map(|ad| {
                let listing = RawListing {
                    title: self.title.locate(ad),
                    location: self.location.locate(ad),
                    raw_price: self.price.locate(ad),
                    link: self.link.locate(ad).and_then(|href| self.absolutize(&href)),
                    image: self.image.locate(ad),
                    raw_info: self.info.locate(ad),
                };

                let missing = listing.missing_fields();
                if !missing.is_empty() {
                    debug!("Listing missing fields: {}", missing.join(", "));
                }
                listing
            })
            .collect()
    }

    fn absolutize(&self, href: &str) -> Option<String> {
        match self.origin.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                debug!("Dropping unresolvable link '{href}': {e}");
                None
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PipelineError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
