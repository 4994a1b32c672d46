use formcheck::parse::tree_from_value;
use formcheck::schema::{FORM_SCHEMA, FieldKind};
use formcheck::validate::{FormValidator, confidence};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Form field and sub-field names, so generated trees reach the normalizers.
fn schema_keys() -> Vec<&'static str> {
    FORM_SCHEMA
        .iter()
        .flat_map(|e| std::iter::once(e.name).chain(e.subfields.iter().map(|s| s.name)))
        .collect()
}

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(schema_keys()).prop_map(str::to_string),
        1 => "[a-zA-Z]{1,12}",
    ]
}

fn arb_object(inner: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
    prop::collection::vec((arb_key(), inner), 0..6).prop_map(|pairs| {
        let map: Map<String, Value> = pairs.into_iter().collect();
        Value::Object(map)
    })
}

/// Objects nested up to three levels with short string leaves, some empty.
/// Leaves include ID, phone and time shapes and oversized digit runs.
fn arb_tree() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(String::new()),
        "[a-z0-9:.\\-]{1,8}",
        "[0-9]{1,25}",
        "[0-9]{1,2}[:.h][0-9]{2}",
        "\\+?[0-9 \\-]{6,16}",
    ]
    .prop_map(Value::String);
    let node = leaf.prop_recursive(2, 48, 6, |inner| arb_object(inner));
    arb_object(node)
}

proptest! {
    #[test]
    fn confidence_stays_in_unit_interval(filled in 0usize..50, extra in 0usize..50, diags in 0usize..40) {
        let c = confidence(filled, filled + extra, diags);
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn validation_never_panics_and_keeps_shape(value in arb_tree()) {
        let tree = tree_from_value(&value).unwrap();
        let report = FormValidator::with_reference_year(2026).validate(&tree);
        prop_assert_eq!(report.normalized.total_leaves(), tree.total_leaves());
        prop_assert_eq!(report.summary.total, tree.total_leaves());
        prop_assert!(report.summary.filled <= report.summary.total);
        prop_assert!(report.summary.confidence >= 0.0);
        for diagnostic in report.diagnostics.iter() {
            let top = diagnostic.path.split('.').next().unwrap_or_default();
            prop_assert!(
                !matches!(formcheck::schema::field_kind(top), FieldKind::Text),
                "free-text field flagged: {}",
                diagnostic.path
            );
        }
    }
}
