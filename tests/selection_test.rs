//! Taxonomy and category selection tests

use std::collections::BTreeSet;
use test_case::test_case;
use veil::domain::VeilError;
use veil::redaction::selector::{resolve, CategorySelection};
use veil::redaction::taxonomy::{self, Group};

#[test]
fn test_groups_are_subsets_of_taxonomy() {
    let all = taxonomy::all_categories();
    for group in Group::ALL {
        for member in taxonomy::group_members(group) {
            assert!(all.contains(&member), "{member} of {group} missing from taxonomy");
        }
    }
}

#[test]
fn test_group_members_are_unique() {
    for group in Group::ALL {
        let members = taxonomy::group_members(group);
        let unique: BTreeSet<_> = members.iter().collect();
        assert_eq!(unique.len(), members.len(), "duplicate member in {group}");
    }
}

#[test_case(Group::Pii, 36)]
#[test_case(Group::Phi, 19)]
#[test_case(Group::Pci, 9)]
fn test_group_sizes(group: Group, expected: usize) {
    assert_eq!(taxonomy::group_members(group).len(), expected);
}

#[test]
fn test_taxonomy_size_and_ungrouped_category() {
    assert_eq!(taxonomy::all_categories().len(), 53);
    assert!(taxonomy::is_valid("organization"));
    assert!(taxonomy::groups_of("organization").is_empty());
}

#[test]
fn test_overlapping_membership() {
    assert_eq!(taxonomy::groups_of("ssn"), vec![Group::Pii, Group::Phi]);
    assert!(taxonomy::groups_of("account number").contains(&Group::Pci));
}

#[test]
fn test_underscore_and_space_tokens_resolve_equally() {
    let underscored =
        resolve(&CategorySelection::Explicit(vec!["phone_number".into()])).unwrap();
    let spaced = resolve(&CategorySelection::Explicit(vec!["phone number".into()])).unwrap();
    assert_eq!(underscored, spaced);
}

#[test_case("phone_numbr", "phone numbr" ; "typo")]
#[test_case("Phone_Number", "Phone Number" ; "wrong case")]
#[test_case("medical_record_number", "medical record number" ; "not in taxonomy")]
fn test_unknown_token_is_rejected(token: &str, normalized: &str) {
    let err = resolve(&CategorySelection::Explicit(vec!["ssn".into(), token.into()])).unwrap_err();
    match err {
        VeilError::UnknownCategory { token } => assert_eq!(token, normalized),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_explicit_list_is_rejected() {
    let err = resolve(&CategorySelection::Explicit(Vec::new())).unwrap_err();
    assert!(matches!(err, VeilError::EmptySelection));
}

#[test]
fn test_group_selection_matches_members() {
    let active = resolve(&CategorySelection::Group(Group::Pci)).unwrap();
    assert_eq!(active.as_slice(), taxonomy::group_members(Group::Pci).as_slice());
}

#[test]
fn test_default_selection_is_everything() {
    let active = resolve(&CategorySelection::default()).unwrap();
    assert_eq!(active.len(), taxonomy::all_categories().len());
}

#[test]
fn test_conflicting_modes_are_rejected() {
    let err = CategorySelection::from_parts(Some(vec!["ssn".into()]), &[Group::Phi]).unwrap_err();
    assert!(matches!(err, VeilError::ConflictingSelection(_)));
    assert!(err.is_configuration());

    let err = CategorySelection::from_parts(None, &[Group::Pii, Group::Pci]).unwrap_err();
    assert!(err.to_string().contains("pii, pci"));
}
