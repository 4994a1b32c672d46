#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(tree) = formcheck::parse_response(&s) {
        let _ = formcheck::translate_to_english(&tree);
    }
    let _ = formcheck::parse::detect_language(&s);
});
