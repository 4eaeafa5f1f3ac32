#![no_main]

use bibld::bibframe::{RdfFormat, RdfGraph};
use bibld::Converter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(wire) = RdfGraph::parse(text, RdfFormat::NTriples) else {
        return;
    };
    let Ok(converter) = Converter::standard() else {
        return;
    };
    if let Ok(resources) = converter.to_ld(&wire) {
        let _ = converter.to_rdf(&resources);
    }
});
