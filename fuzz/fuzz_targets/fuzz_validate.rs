#![no_main]

use formcheck::FormValidator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let Ok(tree) = formcheck::parse_response(&s) else {
        return;
    };

    let report = FormValidator::with_reference_year(2026).validate(&tree);

    // Validation preserves shape and keeps the score in range.
    assert_eq!(report.normalized.total_leaves(), tree.total_leaves());
    assert!((0.0..=1.0).contains(&report.summary.confidence));

    // The rendered report must be valid JSON.
    let json = formcheck::serialize(&report).expect("report serializes");
    if serde_json::from_str::<serde_json::Value>(&json).is_err() {
        panic!("serialize produced invalid JSON:\n{}", json.get(..500).unwrap_or(&json));
    }
});
