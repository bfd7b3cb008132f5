// src/dataset/summary.rs

use crate::dataset::Dataset;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Serialize, PartialEq)]
pub struct LocalityStats {
    pub locality: String,
    pub listings: usize,
    pub avg_price: u64,
}

/// Headline numbers for a dataset. Price figures only count rows that have
/// an area, the same subset the overview page shows.
#[derive(Debug, Serialize, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub complete_rows: usize,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub mean_price: Option<u64>,
    pub locations: usize,
    pub top_localities: Vec<LocalityStats>,
}

pub fn summarize(dataset: &Dataset, top: usize) -> DatasetSummary {
    let complete: Vec<_> = dataset.rows.iter().filter(|r| r.area.is_some()).collect();

    let min_price = complete.iter().map(|r| r.price).min();
    let max_price = complete.iter().map(|r| r.price).max();
    let mean_price = if complete.is_empty() {
        None
    } else {
        let total: u128 = complete.iter().map(|r| r.price as u128).sum();
        Some((total / complete.len() as u128) as u64)
    };

    let locations: HashSet<&str> = complete
        .iter()
        .filter_map(|r| r.location.as_deref())
        .collect();

    let mut by_locality: HashMap<&str, (usize, u128)> = HashMap::new();
    for row in &dataset.rows {
        if let Some(loc) = row.locality.as_deref() {
            let entry = by_locality.entry(loc).or_default();
            entry.0 += 1;
            entry.1 += row.price as u128;
        }
    }

    let mut top_localities: Vec<LocalityStats> = by_locality
        .into_iter()
        .map(|(locality, (listings, total))| LocalityStats {
            locality: locality.to_string(),
            listings,
            avg_price: (total / listings as u128) as u64,
        })
        .collect();
    top_localities.sort_by(|a, b| {
        b.listings
            .cmp(&a.listings)
            .then_with(|| a.locality.cmp(&b.locality))
    });
    top_localities.truncate(top);

    DatasetSummary {
        rows: dataset.len(),
        complete_rows: complete.len(),
        min_price,
        max_price,
        mean_price,
        locations: locations.len(),
        top_localities,
    }
}

impl DatasetSummary {
    pub fn print(&self) {
        println!("Rows:          {}", self.rows);
        println!("With area:     {}", self.complete_rows);
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => println!("Price range:   ₹{min} – ₹{max}"),
            _ => println!("Price range:   -"),
        }
        if let Some(mean) = self.mean_price {
            println!("Mean price:    ₹{mean}");
        }
        println!("Locations:     {}", self.locations);

        if !self.top_localities.is_empty() {
            println!();
            println!("{:<28} | {:>8} | {:>10}", "Locality", "Listings", "Avg price");
            println!("{}", "-".repeat(52));
            for l in &self.top_localities {
                println!("{:<28} | {:>8} | {:>10}", l.locality, l.listings, l.avg_price);
            }
        }
    }
}
