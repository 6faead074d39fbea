#![no_main]

use libfuzzer_sys::fuzz_target;

use forksum_core::wire;

fuzz_target!(|data: &[u8]| {
    let mut input = data;
    // Should not panic; anything that decodes must re-encode identically.
    if let Ok(result) = wire::decode(&mut input) {
        assert!(result.count >= 1);
        let mut buf = Vec::new();
        wire::encode(&result, &mut buf).unwrap();
        assert_eq!(wire::decode(&mut buf.as_slice()).unwrap(), result);
    }
});
