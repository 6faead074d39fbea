#![no_main]

use libfuzzer_sys::fuzz_target;

use forksum_core::driver::compute_inline;
use forksum_core::range::UnitRange;

fuzz_target!(|data: &[u8]| {
    if data.len() < 10 {
        return;
    }
    // First 8 bytes pick the start, next 2 the width (capped for speed).
    let start = i64::from_le_bytes(data[..8].try_into().unwrap());
    let width = i64::from(u16::from_le_bytes([data[8], data[9]]) % 4096);
    let Some(end) = start.checked_add(width) else {
        return;
    };

    let range = UnitRange::new(start, end);
    if let Ok(result) = compute_inline(range) {
        assert_eq!(i128::from(result.sum), range.expected_sum());
        assert_eq!(i128::from(result.count), range.expected_units());
    }
});
