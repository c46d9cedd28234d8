use super::common::*;
use crate::workflows::matching::matcher::{
    CONFIDENT_MESSAGE, LOW_CONFIDENCE_MESSAGE, UNDETERMINED,
};
use crate::workflows::matching::{
    MatchingServiceError, RepositoryError, TenderMatchingService, DEFAULT_THRESHOLD,
};
use std::collections::BTreeMap;

#[test]
fn exact_selection_is_a_confident_match() {
    let (service, _) = memory_service();
    let result = service.map(&education_selections());

    assert_eq!(result.matched_tender_type.name, "IT equipment supply tender");
    assert_eq!(result.confidence_score, 1.0);
    assert_eq!(result.message, CONFIDENT_MESSAGE);
    assert_eq!(result.matched_tender_type.attributes.len(), 3);
}

#[test]
fn partial_selection_reports_low_confidence_with_alternatives() {
    let (service, _) = memory_service();
    let mut selections = BTreeMap::new();
    selections.insert("Budget".to_string(), "1,000,000 - 5,000,000".to_string());
    selections.insert("Duration".to_string(), "6 - 12 months".to_string());

    let result = service.map(&selections);

    // Consulting matches both, construction and medical match one each.
    assert_eq!(result.matched_tender_type.name, "Consulting services tender");
    assert_eq!(result.confidence_score, 0.4);
    assert_eq!(result.message, LOW_CONFIDENCE_MESSAGE);
    let alternatives: Vec<_> = result
        .alternative_types
        .iter()
        .map(|tender| tender.name.as_str())
        .collect();
    assert_eq!(
        alternatives,
        vec!["Construction works tender", "Medical supplies tender"]
    );
}

#[test]
fn unrelated_selection_is_undetermined() {
    let (service, _) = memory_service();
    let mut selections = BTreeMap::new();
    selections.insert("Payment terms".to_string(), "Advance payment".to_string());

    let result = service.map(&selections);
    assert_eq!(result.matched_tender_type.name, UNDETERMINED);
    assert_eq!(result.confidence_score, 0.0);
}

#[test]
fn added_rule_is_visible_to_the_next_match() {
    let (service, repository) = memory_service();
    let selections: BTreeMap<String, String> =
        [("Payment terms".to_string(), "Advance payment".to_string())].into();

    service
        .add_rule(rule("Prepaid supply tender", &[("Payment terms", "Advance payment")]))
        .expect("rule added");

    let result = service.map(&selections);
    assert_eq!(result.matched_tender_type.name, "Prepaid supply tender");
    assert_eq!(repository.stored().len(), 6);
    assert_eq!(service.rules().len(), 6);
}

#[test]
fn invalid_rules_are_rejected_before_persisting() {
    let (service, repository) = memory_service();

    let blank = rule("  ", &[("Budget", "< 500,000")]);
    assert!(matches!(
        service.add_rule(blank),
        Err(MatchingServiceError::InvalidRule(_))
    ));

    let unconditional = rule("Anything tender", &[]);
    assert!(matches!(
        service.add_rule(unconditional),
        Err(MatchingServiceError::InvalidRule(_))
    ));
    assert_eq!(repository.stored().len(), 5);
}

#[test]
fn failed_persistence_leaves_rules_untouched() {
    let service = read_only_service();
    let before = service.rules();

    let err = service
        .add_rule(rule("Prepaid supply tender", &[("Payment terms", "Advance payment")]))
        .expect_err("write refused");

    assert!(matches!(
        err,
        MatchingServiceError::Repository(RepositoryError::Unavailable(_))
    ));
    assert_eq!(service.rules(), before);
}

#[test]
fn snapshots_taken_before_a_write_stay_stable() {
    let (service, _) = memory_service();
    let snapshot = service.rules();

    service
        .add_rule(rule("Prepaid supply tender", &[("Payment terms", "Advance payment")]))
        .expect("rule added");

    assert_eq!(snapshot.len(), 5);
    assert_eq!(service.rules().len(), 6);
}

#[test]
fn add_rule_picks_up_rules_written_by_another_service() {
    let (first, repository) = memory_service();
    let second = TenderMatchingService::new(repository.clone(), DEFAULT_THRESHOLD)
        .expect("second service builds");

    second
        .add_rule(rule("Prepaid supply tender", &[("Payment terms", "Advance payment")]))
        .expect("second service adds rule");
    first
        .add_rule(rule("Large works tender", &[("Budget", "> 10,000,000")]))
        .expect("first service adds rule");

    assert_eq!(repository.stored().len(), 7);
    assert_eq!(first.rules().as_slice(), repository.stored().as_slice());

    let selections: BTreeMap<String, String> =
        [("Payment terms".to_string(), "Advance payment".to_string())].into();
    assert_eq!(
        first.map(&selections).matched_tender_type.name,
        "Prepaid supply tender"
    );
}
