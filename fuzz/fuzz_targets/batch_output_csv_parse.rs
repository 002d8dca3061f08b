//! Fuzz target for batch output CSV decoding.
//!
//! Feeds arbitrary bytes to the response decoder, checking for panics,
//! crashes, or hangs. Decoded match rows must always carry coordinates.

#![no_main]

use census_geocoder::batch::from_output_csv_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(rows) = from_output_csv_slice(data) {
        for row in rows {
            assert_eq!(row.is_match, row.coordinates.is_some());
            assert!(!row.is_exact || row.is_match);
        }
    }
});
