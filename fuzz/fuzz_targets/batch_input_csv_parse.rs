//! Fuzz target for batch input CSV reading.
//!
//! Whatever the reader accepts must encode again and read back to the same
//! number of rows.

#![no_main]

use census_geocoder::batch::{from_input_csv_str, read_input_rows, to_input_csv_string};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(rows) = read_input_rows(data) else {
        return;
    };
    let csv = to_input_csv_string(&rows).expect("encode accepted rows");
    assert_eq!(from_input_csv_str(&csv).expect("decode").len(), rows.len());
});
