#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(sealed) = citadel_courier::wire::decode(data) {
        assert_eq!(citadel_courier::wire::encode(&sealed), data);
    }
});
