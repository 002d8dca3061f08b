#![allow(dead_code)]

use census_geocoder::batch::{BlockGeography, InputRow, OutputRow, EXACT, MATCH};
use census_geocoder::{Coordinates, TigerLine};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Free text including the characters CSV has to quote.
pub fn arb_text() -> BoxedStrategy<String> {
    prop_oneof![
        4 => "[A-Za-z0-9 ]{0,24}",
        1 => "[A-Za-z0-9 ,\"\r\n]{0,24}",
        1 => Just(String::new()),
    ]
    .boxed()
}

/// Non-empty single-line field, as the service echoes them back.
pub fn arb_field() -> BoxedStrategy<String> {
    "[A-Za-z0-9][A-Za-z0-9 .,#-]{0,23}".boxed()
}

pub fn arb_input_row() -> BoxedStrategy<InputRow> {
    (arb_text(), arb_text(), arb_text(), arb_text(), arb_text())
        .prop_map(|(id, address, city, state, zip)| InputRow {
            id,
            address,
            city,
            state,
            zip,
        })
        .boxed()
}

pub fn arb_input_rows() -> BoxedStrategy<Vec<InputRow>> {
    prop::collection::vec(arb_input_row(), 0..32).boxed()
}

pub fn arb_coordinates() -> BoxedStrategy<Coordinates> {
    (-180.0f64..180.0, -90.0f64..90.0)
        .prop_map(|(x, y)| Coordinates::new(x, y))
        .boxed()
}

fn arb_digits(len: usize) -> BoxedStrategy<String> {
    prop::collection::vec(0u8..10, len)
        .prop_map(|d| d.into_iter().map(|n| char::from(b'0' + n)).collect())
        .boxed()
}

pub fn arb_geography() -> BoxedStrategy<BlockGeography> {
    (arb_digits(2), arb_digits(3), arb_digits(6), arb_digits(4))
        .prop_map(|(state, county, tract, block)| BlockGeography {
            state,
            county,
            tract,
            block,
        })
        .boxed()
}

/// An output row in one of the shapes the service produces.
pub fn arb_output_row(with_geography: bool) -> BoxedStrategy<OutputRow> {
    let unmatched = (arb_field(), arb_field(), prop_oneof![Just("No_Match"), Just("Tie")])
        .prop_map(|(id, input_address, _status)| OutputRow {
            id,
            input_address,
            ..OutputRow::default()
        });

    let matched = (
        arb_field(),
        arb_field(),
        any::<bool>(),
        arb_field(),
        arb_coordinates(),
        arb_digits(9),
        prop_oneof![Just("L"), Just("R")],
        arb_geography(),
    )
        .prop_map(
            move |(id, input_address, is_exact, match_address, coords, line, side, geo)| {
                OutputRow {
                    id,
                    input_address,
                    is_match: true,
                    is_exact,
                    match_address,
                    coordinates: Some(coords),
                    tiger_line: Some(TigerLine::new(line, side)),
                    geography: with_geography.then_some(geo),
                }
            },
        );

    prop_oneof![1 => unmatched, 3 => matched].boxed()
}

/// Renders rows the way the service writes its response file.
pub fn render_output_csv(rows: &[OutputRow]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    for row in rows {
        let mut record = vec![row.id.clone(), row.input_address.clone()];
        if row.is_match {
            let coords = row.coordinates.unwrap_or_default();
            let tiger = row.tiger_line.clone().unwrap_or_default();
            record.push(MATCH.to_string());
            record.push(if row.is_exact { EXACT } else { "Non_Exact" }.to_string());
            record.push(row.match_address.clone());
            record.push(format!("{},{}", coords.x, coords.y));
            record.push(tiger.id);
            record.push(tiger.side);
            if let Some(geo) = &row.geography {
                record.extend([
                    geo.state.clone(),
                    geo.county.clone(),
                    geo.tract.clone(),
                    geo.block.clone(),
                ]);
            }
        } else {
            record.push("No_Match".to_string());
        }
        writer.write_record(&record).expect("write record");
    }

    String::from_utf8(writer.into_inner().expect("flush")).expect("utf8")
}
