use formcheck::enums::Language;
use formcheck::error::{FormError, ParseErrorKind};
use formcheck::parse::detect_language;
use formcheck::serialize::display_rows;
use formcheck::validate::FormValidator;

const HEBREW_REPLY: &str = r#"```json
{
  "שם פרטי": "דנה",
  "מספר זהות": "123456782",
  "תאריך לידה": {"יום": "3", "חודש": "4", "שנה": "91"}
}
```"#;

#[test]
fn hebrew_reply_is_translated_and_completed() {
    let validator = FormValidator::with_reference_year(2026);
    let report = validator.load(HEBREW_REPLY, Language::Hebrew).unwrap();

    assert_eq!(report.normalized.get_text("firstName"), Some("דנה"));
    assert_eq!(report.normalized.text_at("dateOfBirth.day"), Some("03"));
    assert_eq!(report.normalized.text_at("dateOfBirth.year"), Some("1991"));
    assert!(report.normalized.get_group("medicalInstitutionFields").is_some());
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.summary.filled_text(), "5/35");
    assert_eq!(report.summary.confidence_text(), "0.14");
}

#[test]
fn english_reply_is_not_completed() {
    let validator = FormValidator::with_reference_year(2026);
    let report = validator
        .load(r#"{"firstName": "Dana", "gender": "m"}"#, Language::English)
        .unwrap();
    assert_eq!(report.summary.filled_text(), "2/2");
    assert_eq!(report.normalized.get_text("gender"), Some("Male"));
}

#[test]
fn load_fails_only_without_json() {
    let err = formcheck::load("no form here", Language::English).unwrap_err();
    let FormError::Parse(parse) = &err;
    assert_eq!(parse.kind, ParseErrorKind::NoJsonObject);
    assert_eq!(
        err.to_string(),
        "Parse error: no JSON object found in response"
    );
    assert!(std::error::Error::source(&err).is_none());
}

#[test]
fn reply_language_drives_translation() {
    let ocr_text = "טופס בקשה לקבלת טיפול רפואי לנפגע עבודה";
    assert_eq!(detect_language(ocr_text), Language::Hebrew);
}

#[test]
fn report_renders_rows_and_json() {
    let validator = FormValidator::with_reference_year(2026);
    let report = validator
        .load(
            r#"{"idNumber": "12", "address": {"city": "Acre"}}"#,
            Language::English,
        )
        .unwrap();

    let rows = display_rows(&report.normalized, &report.diagnostics);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].field, "address.city");
    assert_eq!(rows[1].field, "idNumber");
    assert_eq!(rows[1].validation, "ID must be 9 digits, got 2");

    let json: serde_json::Value =
        serde_json::from_str(&formcheck::serialize(&report).unwrap()).unwrap();
    assert_eq!(json["fields"]["idNumber"], "12");
    assert_eq!(json["messages"]["address.postalCode"], "Postal code is missing");
    assert_eq!(json["messages"]["_overall_confidence"], "0.90");
    assert_eq!(json["messages"]["_filled_fields"], "2/2");
}
