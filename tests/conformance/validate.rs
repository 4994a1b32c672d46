use formcheck::parse::tree_from_value;
use formcheck::validate::FormValidator;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    std::env::var("FORMCHECK_FIXTURES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/conformance/fixtures")
        })
}

#[derive(Debug, serde::Deserialize)]
struct TestCase {
    id: String,
    name: String,
    input: serde_json::Value,
    #[serde(default)]
    fields: BTreeMap<String, String>,
    messages: BTreeMap<String, String>,
}

#[test]
fn validate_conformance_suite() {
    let suite_path = fixtures_dir().join("validate.yaml");
    let content = std::fs::read_to_string(&suite_path).unwrap();
    let cases: Vec<TestCase> = serde_saphyr::from_str(&content).unwrap();
    assert!(!cases.is_empty(), "no cases in {:?}", suite_path);

    let validator = FormValidator::with_reference_year(2026);
    let mut failed = 0;

    for case in &cases {
        let input = tree_from_value(&case.input).unwrap();
        let before = input.clone();
        let report = validator.validate(&input);

        assert_eq!(input, before, "[{}] input was modified", case.id);

        let messages = report.message_map();
        if messages != case.messages {
            eprintln!("  FAIL [{}] {}", case.id, case.name);
            eprintln!("    Expected messages: {:?}", case.messages);
            eprintln!("    Actual messages:   {:?}", messages);
            failed += 1;
            continue;
        }

        for (path, expected) in &case.fields {
            let actual = report.normalized.text_at(path);
            if actual != Some(expected.as_str()) {
                eprintln!("  FAIL [{}] {}", case.id, case.name);
                eprintln!("    {}: expected {:?}, got {:?}", path, expected, actual);
                failed += 1;
                break;
            }
        }
    }

    eprintln!(
        "Validate conformance: {}/{} passed",
        cases.len() - failed,
        cases.len()
    );
    assert_eq!(failed, 0, "{} validate conformance case(s) failed", failed);
}
