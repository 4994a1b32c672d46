//! The accident-form field registry.
//!
//! One static table describes both bilingual schemas: each entry pairs the
//! English key the validator works with, the Hebrew key the extractor may
//! return, the kind of normalization the field gets, and its sub-fields when
//! the field is a group.

use crate::enums::DateField;
use crate::types::{FieldTree, FieldValue};

/// How the validator treats a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, counted but never rewritten.
    Text,
    NationalId,
    Phone,
    Gender,
    TimeOfDay,
    Date(DateField),
    /// Street address group; carries the city/postal-code rule.
    Address,
    /// Any other group of free-text sub-fields.
    Group,
}

/// A sub-field of a grouped entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubfieldEntry {
    pub name: &'static str,
    pub hebrew: &'static str,
}

/// A top-level form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: &'static str,
    pub hebrew: &'static str,
    pub kind: FieldKind,
    pub subfields: &'static [SubfieldEntry],
}

const fn sub(name: &'static str, hebrew: &'static str) -> SubfieldEntry {
    SubfieldEntry { name, hebrew }
}

const fn leaf(name: &'static str, hebrew: &'static str, kind: FieldKind) -> FieldEntry {
    FieldEntry {
        name,
        hebrew,
        kind,
        subfields: &[],
    }
}

const fn date(name: &'static str, hebrew: &'static str, field: DateField) -> FieldEntry {
    FieldEntry {
        name,
        hebrew,
        kind: FieldKind::Date(field),
        subfields: DATE_SUBFIELDS,
    }
}

pub const DAY: &str = "day";
pub const MONTH: &str = "month";
pub const YEAR: &str = "year";
pub const CITY: &str = "city";
pub const POSTAL_CODE: &str = "postalCode";

pub const DATE_SUBFIELDS: &[SubfieldEntry] = &[
    sub(DAY, "יום"),
    sub(MONTH, "חודש"),
    sub(YEAR, "שנה"),
];

pub static ADDRESS_SUBFIELDS: &[SubfieldEntry] = &[
    sub("street", "רחוב"),
    sub("houseNumber", "מספר בית"),
    sub("entrance", "כניסה"),
    sub("apartment", "דירה"),
    sub(CITY, "ישוב"),
    sub(POSTAL_CODE, "מיקוד"),
    sub("poBox", "תא דואר"),
];

pub static MEDICAL_INSTITUTION_SUBFIELDS: &[SubfieldEntry] = &[
    sub("healthFundMember", "חבר בקופת חולים"),
    sub("natureOfAccident", "מהות התאונה"),
    sub("medicalDiagnoses", "אבחנות רפואיות"),
];

/// The accident-form registry, in form order.
pub static FORM_SCHEMA: &[FieldEntry] = &[
    leaf("lastName", "שם משפחה", FieldKind::Text),
    leaf("firstName", "שם פרטי", FieldKind::Text),
    leaf("idNumber", "מספר זהות", FieldKind::NationalId),
    leaf("gender", "מין", FieldKind::Gender),
    date("dateOfBirth", "תאריך לידה", DateField::DateOfBirth),
    FieldEntry {
        name: "address",
        hebrew: "כתובת",
        kind: FieldKind::Address,
        subfields: ADDRESS_SUBFIELDS,
    },
    leaf("landlinePhone", "טלפון קווי", FieldKind::Phone),
    leaf("mobilePhone", "טלפון נייד", FieldKind::Phone),
    leaf("jobType", "סוג העבודה", FieldKind::Text),
    date("dateOfInjury", "תאריך הפגיעה", DateField::DateOfInjury),
    leaf("timeOfInjury", "שעת הפגיעה", FieldKind::TimeOfDay),
    leaf("accidentLocation", "מקום התאונה", FieldKind::Text),
    leaf("accidentAddress", "כתובת מקום התאונה", FieldKind::Text),
    leaf("accidentDescription", "תיאור התאונה", FieldKind::Text),
    leaf("injuredBodyPart", "האיבר שנפגע", FieldKind::Text),
    leaf("signature", "חתימה", FieldKind::Text),
    date("formFillingDate", "תאריך מילוי הטופס", DateField::FormFillingDate),
    date(
        "formReceiptDateAtClinic",
        "תאריך קבלת הטופס בקופה",
        DateField::FormReceiptDateAtClinic,
    ),
    FieldEntry {
        name: "medicalInstitutionFields",
        hebrew: "למילוי ע\"י המוסד הרפואי",
        kind: FieldKind::Group,
        subfields: MEDICAL_INSTITUTION_SUBFIELDS,
    },
];

/// Look up a top-level field by its English key.
pub fn lookup_field(name: &str) -> Option<&'static FieldEntry> {
    FORM_SCHEMA.iter().find(|e| e.name == name)
}

/// Normalization kind for a top-level key; unknown keys are free text.
pub fn field_kind(name: &str) -> FieldKind {
    lookup_field(name).map_or(FieldKind::Text, |e| e.kind)
}

/// English key for a Hebrew field or sub-field name.
pub fn english_key(hebrew: &str) -> Option<&'static str> {
    FORM_SCHEMA
        .iter()
        .find(|e| e.hebrew == hebrew)
        .map(|e| e.name)
        .or_else(|| {
            FORM_SCHEMA
                .iter()
                .flat_map(|e| e.subfields.iter())
                .find(|s| s.hebrew == hebrew)
                .map(|s| s.name)
        })
}

impl FieldEntry {
    /// Empty value for this entry: `""` for a leaf, an empty-leaf group otherwise.
    pub fn empty_value(&self) -> FieldValue {
        self.value_with(|s| s.name)
    }

    fn value_with(&self, key: impl Fn(&SubfieldEntry) -> &'static str) -> FieldValue {
        if self.subfields.is_empty() {
            FieldValue::text("")
        } else {
            FieldValue::Group(self.subfields.iter().map(|s| (key(s), "")).collect())
        }
    }
}

/// The empty English-keyed form that the extractor is asked to fill.
pub fn english_template() -> FieldTree {
    FORM_SCHEMA
        .iter()
        .map(|e| (e.name, e.empty_value()))
        .collect()
}

/// The empty Hebrew-keyed form.
pub fn hebrew_template() -> FieldTree {
    FORM_SCHEMA
        .iter()
        .map(|e| (e.hebrew, e.value_with(|s| s.hebrew)))
        .collect()
}

/// Rename Hebrew keys to their English counterparts at every level, then add
/// any top-level form field the input lacks as an empty value.
///
/// Keys with no translation are kept as they are.
pub fn translate_to_english(tree: &FieldTree) -> FieldTree {
    let mut out = translate_keys(tree);
    for entry in FORM_SCHEMA {
        if !out.contains_key(entry.name) {
            out.insert(entry.name, entry.empty_value());
        }
    }
    out
}

fn translate_keys(tree: &FieldTree) -> FieldTree {
    tree.iter()
        .map(|(key, value)| {
            let key = english_key(key).unwrap_or(key.as_str());
            let value = match value {
                FieldValue::Group(g) => FieldValue::Group(translate_keys(g)),
                text => text.clone(),
            };
            (key, value)
        })
        .collect()
}
