//! Vocabulary Tests
//!
//! Type resolution between the internal, XForm and XLSForm vocabularies.

use pretty_assertions::assert_eq;
use royalbit_xlsform::error::{FormError, Vocabulary};
use royalbit_xlsform::vocabulary::{
    resolve_to_authoring, resolve_to_runtime, AuthoringType, Resolved, RuntimeType, TypeTag,
    VocabularyTables,
};

fn runtime(type_id: &str) -> String {
    resolve_to_runtime(type_id)
        .unwrap_or_else(|e| panic!("{} should resolve to XForm: {}", type_id, e))
        .to_string()
}

fn authoring(type_id: &str) -> String {
    resolve_to_authoring(type_id)
        .unwrap_or_else(|e| panic!("{} should resolve to XLSForm: {}", type_id, e))
        .to_string()
}

// ═══════════════════════════════════════════════════════════════════════════
// ROUND-TRIP PROPERTIES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_runtime_authoring_fixed_point_for_every_authoring_type() {
    for tag in AuthoringType::ALL {
        let once = runtime(tag.as_str());
        let back = authoring(&once);
        let twice = runtime(&back);
        assert_eq!(once, twice, "rt(auth(rt({}))) != rt({})", tag, tag);
    }
}

#[test]
fn test_every_runtime_type_but_boolean_has_authoring_equivalent() {
    for tag in RuntimeType::ALL {
        let result = resolve_to_authoring(tag.as_str());
        if tag == RuntimeType::Boolean {
            assert!(result.is_err(), "boolean has no XLSForm equivalent");
        } else {
            let resolved = result.unwrap();
            assert_eq!(runtime(resolved.as_str()), tag.as_str());
        }
    }
}

#[test]
fn test_authoring_types_pass_through_unchanged() {
    for tag in AuthoringType::ALL {
        assert_eq!(
            resolve_to_authoring(tag.as_str()).unwrap(),
            Resolved::Type(tag)
        );
    }
}

#[test]
fn test_runtime_types_pass_through_unchanged() {
    for tag in RuntimeType::ALL {
        assert_eq!(resolve_to_runtime(tag.as_str()).unwrap(), Resolved::Type(tag));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_unrecognized_strings_fail_in_both_directions() {
    for unknown in ["", "rating", "Select One", "xsd:", "groups", "sel ect"] {
        match resolve_to_runtime(unknown) {
            Err(FormError::TypeResolution {
                identifier,
                vocabulary,
            }) => {
                assert_eq!(identifier, unknown);
                assert_eq!(vocabulary, Vocabulary::Runtime);
            }
            other => panic!("{:?} should fail to resolve, got {:?}", unknown, other),
        }

        let err = resolve_to_authoring(unknown).unwrap_err();
        assert_eq!(err.identifier(), Some(unknown));
    }
}

#[test]
fn test_error_names_identifier_as_given() {
    let err = resolve_to_runtime("xsd:rating").unwrap_err();
    assert_eq!(err.identifier(), Some("xsd:rating"));
    assert!(err.to_string().contains("\"xsd:rating\""));
}

#[test]
fn test_boolean_fails_towards_authoring_only() {
    assert_eq!(runtime("boolean"), "boolean");
    let err = resolve_to_authoring("boolean").unwrap_err();
    assert!(err.to_string().contains("XLSForm"));
}

// ═══════════════════════════════════════════════════════════════════════════
// PRECEDENCE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_select_synonyms_win_over_runtime_validity() {
    // "select" and "select1" are XForm types as well as synonyms
    assert_eq!(runtime("select"), "select");
    assert_eq!(runtime("select1"), "select1");
    assert_eq!(authoring("select"), "select_multiple");
    assert_eq!(authoring("select1"), "select_one");
}

#[test]
fn test_internal_names_resolve_through_catalog() {
    assert_eq!(runtime("calculate"), "string");
    assert_eq!(runtime("q picture"), "binary");
    assert_eq!(runtime("today"), "date");
    assert_eq!(runtime("range"), "int");
    assert_eq!(authoring("gps"), "geopoint");
    assert_eq!(authoring("audio"), "audio");
    assert_eq!(authoring("q picture"), "image");
}

#[test]
fn test_internal_aliases_keep_question_kind() {
    // Same XForm type, different XLSForm questions
    assert_eq!(runtime("photo"), runtime("file"));
    assert_eq!(authoring("photo"), "image");
    assert_eq!(authoring("image"), "image");
    assert_eq!(authoring("audio"), "audio");
    assert_eq!(authoring("file"), "file");

    assert_eq!(runtime("calculate"), runtime("calculation"));
    assert_eq!(authoring("calculate"), "calculation");
    assert_eq!(authoring("imei"), "deviceid");
}

#[test]
fn test_group_resolves_in_both_directions() {
    assert_eq!(resolve_to_runtime("group").unwrap(), Resolved::Group);
    assert_eq!(resolve_to_authoring("group").unwrap(), Resolved::Group);
}

#[test]
fn test_global_tables_are_shared() {
    let first = VocabularyTables::global().unwrap() as *const VocabularyTables;
    let second = VocabularyTables::global().unwrap() as *const VocabularyTables;
    assert_eq!(first, second);
}
