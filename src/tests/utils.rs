use crate::domain::NormalizedListing;
use crate::scraper::{FetchError, PageSource};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// One advertisement container; `None` leaves that marker out entirely.
#[derive(Clone, Default)]
pub struct AdFixture {
    pub title: Option<&'static str>,
    pub location: Option<&'static str>,
    pub price: Option<&'static str>,
    pub href: Option<&'static str>,
    /// (class, src)
    pub image: Option<(&'static str, &'static str)>,
    pub info: Option<&'static str>,
}

impl AdFixture {
    pub fn full(title: &'static str, price: &'static str) -> Self {
        Self {
            title: Some(title),
            location: Some("Dwarka, New Delhi"),
            price: Some(price),
            href: Some("/item/2bhk-flat-iid-1790000001"),
            image: Some(("_3vnjf", "https://apollo.olx.in/v1/files/abc/image")),
            info: Some("2 BHK - 1 Bathroom - 850 sqft"),
        }
    }

    pub fn to_html(&self) -> String {
        let mut inner = String::new();
        if let Some(href) = self.href {
            inner.push_str(&format!(r#"<a href="{href}">"#));
        } else {
            inner.push_str("<div>");
        }
        if let Some((class, src)) = self.image {
            inner.push_str(&format!(r#"<figure><img class="{class}" src="{src}" alt=""></figure>"#));
        }
        if let Some(price) = self.price {
            inner.push_str(&format!(r#"<span class="_2Ks63" data-aut-id="itemPrice">{price}</span>"#));
        }
        if let Some(info) = self.info {
            inner.push_str(&format!(r#"<span class="YBbhy">{info}</span>"#));
        }
        if let Some(title) = self.title {
            inner.push_str(&format!(r#"<span class="_2poNJ">{title}</span>"#));
        }
        if let Some(location) = self.location {
            inner.push_str(&format!(
                r#"<div class="_3rmDx"><span class="_2VQu4">{location}</span><span>Today</span></div>"#
            ));
        }
        inner.push_str(if self.href.is_some() { "</a>" } else { "</div>" });

        format!(r#"<li class="_1DNjI" data-aut-id="itemBox">{inner}</li>"#)
    }
}

pub fn page_html(ads: &[AdFixture]) -> String {
    let items: String = ads.iter().map(AdFixture::to_html).collect();
    format!(
        r#"<!DOCTYPE html><html><head><title>Flats for rent</title></head>
<body><div id="container"><ul class="_266Ly _10aCo" data-aut-id="itemsList">{items}</ul></div></body></html>"#
    )
}

/// In-memory stand-in for the listing site.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<u32, String>,
    timeouts: HashSet<u32>,
    pub requested: RefCell<Vec<u32>>,
}

impl FakeSite {
    pub fn with_page(mut self, page: u32, html: String) -> Self {
        self.pages.insert(page, html);
        self
    }

    pub fn with_timeout(mut self, page: u32) -> Self {
        self.timeouts.insert(page);
        self
    }
}

impl PageSource for FakeSite {
    fn fetch_page(&self, page: u32) -> Result<String, FetchError> {
        self.requested.borrow_mut().push(page);
        if self.timeouts.contains(&page) {
            return Err(FetchError::Timeout(60));
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}

pub fn listing(title: &str, price: u64) -> NormalizedListing {
    NormalizedListing {
        title: Some(title.to_string()),
        location: Some("Rohini, Delhi".to_string()),
        price,
        link: Some(format!("https://www.olx.in/item/{}", title.to_lowercase().replace(' ', "-"))),
        image: None,
        info: Some("2 BHK - 2 Bathroom - 900 sqft".to_string()),
        bhk: Some(2),
        bathroom: Some(2),
        area: Some(900.0),
        locality: Some("Rohini".to_string()),
    }
}
