//! Fuzz target for the "x,y" coordinate codec.

#![no_main]

use census_geocoder::Coordinates;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(c) = Coordinates::parse(s) {
        if c.is_finite() {
            let again = Coordinates::parse(&c.to_string()).expect("display parses back");
            assert!(again.approx_eq(&c));
        }
    }
});
