#![no_main]

use bibld::MappingProfile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        let _ = MappingProfile::from_json(json);
    }
});
