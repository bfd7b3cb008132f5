use crate::domain::normalize::{
    coerce_price, normalize, normalize_batch, parse_info, AreaPolicy, InfoFields, PriceError,
};
use crate::scraper::RawListing;

fn info(s: &str) -> InfoFields {
    parse_info(Some(s), AreaPolicy::LegacySquare)
}

#[test]
fn price_coercion() {
    assert_eq!(coerce_price("₹45,000"), Ok(45000));
    assert_eq!(coerce_price("₹1,200"), Ok(1200));
    assert_eq!(coerce_price("₹ 1,25,000"), Ok(125000));
    assert_eq!(coerce_price("18000"), Ok(18000));
}

#[test]
fn price_coercion_rejects_non_integers() {
    for bad in ["₹ 12,000 onwards", "Price on request", "", "₹-5,000", "₹12.5"] {
        assert_eq!(
            coerce_price(bad),
            Err(PriceError::Invalid(bad.to_string())),
            "{bad:?} should not coerce"
        );
    }
}

#[test]
fn info_full_line() {
    assert_eq!(
        info("3 BHK - 2 Bathroom - 1450 sqft"),
        InfoFields { bhk: Some(3), bathroom: Some(2), area: Some(1450.0) }
    );
}

#[test]
fn info_null_and_partial() {
    assert_eq!(parse_info(None, AreaPolicy::LegacySquare), InfoFields::default());
    assert_eq!(info("2 BHK"), InfoFields { bhk: Some(2), bathroom: None, area: None });
    assert_eq!(info("1 Bathroom"), InfoFields { bhk: None, bathroom: Some(1), area: None });
    assert_eq!(info(""), InfoFields::default());
}

#[test]
fn info_is_case_insensitive_and_ignores_unknown_segments() {
    assert_eq!(
        info("Furnished - 2 bhk - 2 BATHROOMS - 1,100 Sqft - Ready to move"),
        // "1,100" only yields the digits after the comma
        InfoFields { bhk: Some(2), bathroom: Some(2), area: Some(100.0) }
    );
    assert_eq!(info("2BHK - 1bathroom - 640sqft").area, Some(640.0));
}

#[test]
fn info_decimal_area_is_rounded() {
    assert_eq!(info("1 BHK - 512.456 sqft").area, Some(512.46));
}

#[test]
fn info_first_value_per_category_wins() {
    assert_eq!(
        info("2 BHK - 3 BHK - 1 Bathroom - 2 Bathroom - 700 sqft - 900 sqft"),
        InfoFields { bhk: Some(2), bathroom: Some(1), area: Some(700.0) }
    );
}

#[test]
fn info_marker_without_number_stays_null() {
    assert_eq!(info("BHK - Bathroom - sqft"), InfoFields::default());
    // a later segment can still fill the category
    assert_eq!(info("Studio BHK - 1 BHK").bhk, Some(1));
}

#[test]
fn ft_unit_is_squared_under_legacy_policy() {
    assert_eq!(info("2 BHK - 30 ft").area, Some(900.0));
    assert_eq!(info("12.5 ft").area, Some(156.25));
}

#[test]
fn ft_unit_is_kept_under_ft_as_sqft_policy() {
    let fields = parse_info(Some("2 BHK - 30 ft"), AreaPolicy::FtAsSqft);
    assert_eq!(fields.area, Some(30.0));
    let fields = parse_info(Some("850 sqft"), AreaPolicy::FtAsSqft);
    assert_eq!(fields.area, Some(850.0));
}

#[test]
fn normalize_derives_all_columns() {
    let raw = RawListing {
        title: Some("2 BHK in Dwarka".into()),
        location: Some("Dwarka, New Delhi".into()),
        raw_price: Some("₹ 18,000".into()),
        link: Some("https://www.olx.in/item/1".into()),
        image: None,
        raw_info: Some("2 BHK - 1 Bathroom - 850 sqft".into()),
    };

    let row = normalize(&raw, AreaPolicy::LegacySquare).unwrap();
    assert_eq!(row.price, 18000);
    assert_eq!(row.bhk, Some(2));
    assert_eq!(row.bathroom, Some(1));
    assert_eq!(row.area, Some(850.0));
    assert_eq!(row.locality.as_deref(), Some("Dwarka"));
    assert_eq!(row.info, raw.raw_info);
    assert_eq!(row.image, None);
}

#[test]
fn normalize_keeps_nulls() {
    let raw = RawListing {
        raw_price: Some("₹5,000".into()),
        ..Default::default()
    };
    let row = normalize(&raw, AreaPolicy::LegacySquare).unwrap();
    assert_eq!(row.price, 5000);
    assert_eq!(row.title, None);
    assert_eq!(row.locality, None);
    assert_eq!((row.bhk, row.bathroom, row.area), (None, None, None));
}

#[test]
fn blank_text_becomes_null() {
    let raw = RawListing {
        title: Some("  ".into()),
        location: Some(", New Delhi".into()),
        raw_price: Some("₹ 10,000".into()),
        image: Some(String::new()),
        ..Default::default()
    };
    let row = normalize(&raw, AreaPolicy::LegacySquare).unwrap();
    assert_eq!(row.title, None);
    assert_eq!(row.location.as_deref(), Some(", New Delhi"));
    assert_eq!(row.locality, None);
    assert_eq!(row.image, None);
}

#[test]
fn batch_sets_aside_bad_prices_without_failing() {
    let ok = RawListing { raw_price: Some("₹ 9,500".into()), ..Default::default() };
    let missing = RawListing { title: Some("No price".into()), ..Default::default() };
    let garbled = RawListing { raw_price: Some("Call for price".into()), ..Default::default() };

    let report = normalize_batch(&[ok, missing.clone(), garbled.clone()], AreaPolicy::LegacySquare);

    assert_eq!(report.listings.len(), 1);
    assert_eq!(report.listings[0].price, 9500);
    assert_eq!(
        report.rejected,
        vec![
            (missing, PriceError::Missing),
            (garbled, PriceError::Invalid("Call for price".into())),
        ]
    );
}
