//! Exact-match scoring of category selections against the mapping rules.

use super::domain::{MappingRule, Selections, TenderMappingResult, TenderType};

pub const DEFAULT_THRESHOLD: f64 = 0.2;
/// Best scores at or above this are reported as a confident match.
pub const CONFIDENT_SCORE: f64 = 0.7;
pub const MAX_ALTERNATIVES: usize = 2;

pub const UNDETERMINED: &str = "undetermined";
pub const NO_MATCH_DESCRIPTION: &str = "no suitable tender type found for the selected criteria";
pub const NO_MATCH_MESSAGE: &str = "no suitable match found";
pub const CONFIDENT_MESSAGE: &str = "suitable match found";
pub const LOW_CONFIDENCE_MESSAGE: &str = "a possible match was found but confidence is low";

/// Fraction of the rule's conditions the selections satisfy exactly. A rule without
/// conditions scores 0.
pub fn score(rule: &MappingRule, selections: &Selections) -> f64 {
    if rule.conditions.is_empty() {
        return 0.0;
    }

    let matched = rule
        .conditions
        .iter()
        .filter(|(category, expected)| selections.get(*category) == Some(*expected))
        .count();

    matched as f64 / rule.conditions.len() as f64
}

/// Ranks every rule scoring at least `threshold`. Ties keep rule order.
pub fn rank<'a>(
    rules: &'a [MappingRule],
    selections: &Selections,
    threshold: f64,
) -> Vec<(&'a MappingRule, f64)> {
    let mut scored: Vec<(&MappingRule, f64)> = rules
        .iter()
        .map(|rule| (rule, score(rule, selections)))
        .filter(|(_, score)| *score >= threshold)
        .collect();

    scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    scored
}

pub fn match_rules(
    rules: &[MappingRule],
    selections: &Selections,
    threshold: f64,
) -> TenderMappingResult {
    let ranked = rank(rules, selections, threshold);

    let Some(&(best, best_score)) = ranked.first() else {
        return no_match();
    };

    let alternative_types = ranked
        .iter()
        .skip(1)
        .take(MAX_ALTERNATIVES)
        .map(|(rule, _)| rule.to_tender_type())
        .collect();

    let message = if best_score >= CONFIDENT_SCORE {
        CONFIDENT_MESSAGE
    } else {
        LOW_CONFIDENCE_MESSAGE
    };

    TenderMappingResult {
        matched_tender_type: best.to_tender_type(),
        confidence_score: best_score,
        alternative_types,
        message: message.to_string(),
    }
}

fn no_match() -> TenderMappingResult {
    TenderMappingResult {
        matched_tender_type: TenderType {
            name: UNDETERMINED.to_string(),
            attributes: Vec::new(),
            description: Some(NO_MATCH_DESCRIPTION.to_string()),
        },
        confidence_score: 0.0,
        alternative_types: Vec::new(),
        message: NO_MATCH_MESSAGE.to_string(),
    }
}
