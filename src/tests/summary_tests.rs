use super::utils::listing;
use crate::dataset::summary::LocalityStats;
use crate::dataset::{summarize, Dataset};

#[test]
fn summary_over_mixed_dataset() {
    let mut no_area = listing("No area", 99_000);
    no_area.area = None;
    let mut saket = listing("Saket flat", 30_000);
    saket.location = Some("Saket, South Delhi".into());
    saket.locality = Some("Saket".into());

    let dataset = Dataset::new(vec![
        listing("A", 10_000),
        listing("B", 20_000),
        saket,
        no_area,
    ]);

    let s = summarize(&dataset, 5);
    assert_eq!(s.rows, 4);
    assert_eq!(s.complete_rows, 3);
    assert_eq!(s.min_price, Some(10_000));
    assert_eq!(s.max_price, Some(30_000));
    assert_eq!(s.mean_price, Some(20_000));
    assert_eq!(s.locations, 2);
    assert_eq!(
        s.top_localities,
        vec![
            LocalityStats { locality: "Rohini".into(), listings: 3, avg_price: 43_000 },
            LocalityStats { locality: "Saket".into(), listings: 1, avg_price: 30_000 },
        ]
    );

    assert_eq!(summarize(&dataset, 1).top_localities.len(), 1);
}

#[test]
fn summary_of_empty_dataset() {
    let s = summarize(&Dataset::default(), 10);
    assert_eq!(s.rows, 0);
    assert_eq!(s.min_price, None);
    assert_eq!(s.mean_price, None);
    assert!(s.top_localities.is_empty());
}
