//! Compliance requirements derived from the classification.
//!
//! Each requirement is an independent function of the procurement method, the work type,
//! the budget and the project duration. Threshold and period figures come from the policy.

use super::domain::{sentinel, ProcurementMethod, RequirementSet, RequirementValue, WorkType};
use super::policy::{BudgetThresholds, PeriodRules, ProcurementPolicy};

use super::domain::ProcurementMethod as Method;
use super::domain::RequirementValue::Numeric;

pub fn evaluate(
    policy: &ProcurementPolicy,
    method: ProcurementMethod,
    work_type: WorkType,
    budget: f64,
    project_duration_months: u32,
) -> RequirementSet {
    let thresholds = &policy.thresholds;
    let periods = &policy.periods;

    RequirementSet {
        announcement_period: announcement_period(thresholds, periods, method, work_type, budget),
        review_period: review_period(thresholds, periods, method, work_type, budget),
        required_participants: required_participants(thresholds, periods, method, work_type, budget),
        sme_priority: sme_priority(thresholds, method, work_type, budget),
        performance_guarantee: performance_guarantee(thresholds, periods, method, budget),
        initial_guarantee: initial_guarantee(thresholds, budget),
        final_guarantee: final_guarantee(thresholds, periods, budget, project_duration_months),
        file_structure: file_structure(thresholds, budget),
    }
}

pub fn announcement_period(
    thresholds: &BudgetThresholds,
    periods: &PeriodRules,
    method: ProcurementMethod,
    work_type: WorkType,
    budget: f64,
) -> RequirementValue {
    match method {
        Method::GeneralCompetition => {
            let [first_tier, second_tier] = thresholds.announcement_tiers;
            let [short, medium, long] = periods.announcement_days;
            if budget < first_tier {
                Numeric(short)
            } else if budget < second_tier {
                Numeric(medium)
            } else {
                Numeric(long)
            }
        }
        Method::LimitedCompetition if work_type == WorkType::LimitedSuppliers => {
            Numeric(periods.announcement_days_limited_suppliers)
        }
        Method::DirectPurchase if work_type == WorkType::ExclusiveWork => {
            Numeric(periods.announcement_days_exclusive_work)
        }
        Method::FrameworkAgreement | Method::TwoStageCompetition | Method::ReverseAuction => {
            Numeric(periods.announcement_days_alternative_methods)
        }
        Method::LimitedCompetition | Method::DirectPurchase | Method::Undefined => {
            RequirementValue::not_determined()
        }
    }
}

pub fn review_period(
    thresholds: &BudgetThresholds,
    periods: &PeriodRules,
    method: ProcurementMethod,
    work_type: WorkType,
    budget: f64,
) -> RequirementValue {
    let standard = match method {
        Method::GeneralCompetition
        | Method::FrameworkAgreement
        | Method::TwoStageCompetition
        | Method::ReverseAuction => true,
        Method::LimitedCompetition => {
            is_small_general_work(thresholds, work_type, budget)
                || work_type == WorkType::ConsultingServices
        }
        Method::DirectPurchase => work_type == WorkType::GeneralWork,
        Method::Undefined => false,
    };

    if standard {
        Numeric(periods.default_review_days)
    } else {
        Numeric(periods.case_by_case_review_days)
    }
}

pub fn required_participants(
    thresholds: &BudgetThresholds,
    periods: &PeriodRules,
    method: ProcurementMethod,
    work_type: WorkType,
    budget: f64,
) -> RequirementValue {
    if method != Method::LimitedCompetition {
        return RequirementValue::not_determined();
    }

    match work_type {
        WorkType::GeneralWork if budget <= thresholds.limited_competition => {
            Numeric(periods.minimum_participants)
        }
        WorkType::LimitedSuppliers => RequirementValue::descriptive(sentinel::LIMITED_POOL),
        WorkType::UrgentCases => RequirementValue::descriptive(sentinel::AS_MANY_AS_POSSIBLE),
        WorkType::ConsultingServices => {
            RequirementValue::descriptive(sentinel::AT_LEAST_FIVE_OFFICES)
        }
        WorkType::CharitableLimited => {
            RequirementValue::descriptive(sentinel::MULTIPLE_NON_PROFITS)
        }
        _ => RequirementValue::not_determined(),
    }
}

pub fn sme_priority(
    thresholds: &BudgetThresholds,
    method: ProcurementMethod,
    work_type: WorkType,
    budget: f64,
) -> RequirementValue {
    let applies = work_type == WorkType::GeneralWork
        && match method {
            Method::LimitedCompetition => budget <= thresholds.limited_competition,
            Method::DirectPurchase => budget < thresholds.direct_purchase,
            _ => false,
        };

    if applies {
        RequirementValue::descriptive(sentinel::SME_PRIORITY)
    } else {
        RequirementValue::not_determined()
    }
}

/// Numeric so the standstill stage can take its length from it; 0 means not applicable.
pub fn performance_guarantee(
    thresholds: &BudgetThresholds,
    periods: &PeriodRules,
    method: ProcurementMethod,
    budget: f64,
) -> RequirementValue {
    match method {
        Method::DirectPurchase | Method::FrameworkAgreement | Method::ReverseAuction => Numeric(0),
        _ if budget >= thresholds.performance_guarantee => {
            Numeric(periods.performance_guarantee_days)
        }
        _ => Numeric(0),
    }
}

pub fn initial_guarantee(thresholds: &BudgetThresholds, budget: f64) -> RequirementValue {
    required_if(budget >= thresholds.initial_guarantee)
}

pub fn final_guarantee(
    thresholds: &BudgetThresholds,
    periods: &PeriodRules,
    budget: f64,
    project_duration_months: u32,
) -> RequirementValue {
    required_if(
        budget >= thresholds.final_guarantee
            || project_duration_months > periods.final_guarantee_months,
    )
}

pub fn file_structure(thresholds: &BudgetThresholds, budget: f64) -> RequirementValue {
    if budget >= thresholds.two_envelopes {
        RequirementValue::descriptive(sentinel::TWO_ENVELOPES)
    } else {
        RequirementValue::descriptive(sentinel::ONE_ENVELOPE)
    }
}

fn is_small_general_work(thresholds: &BudgetThresholds, work_type: WorkType, budget: f64) -> bool {
    work_type == WorkType::GeneralWork && budget <= thresholds.limited_competition
}

fn required_if(condition: bool) -> RequirementValue {
    if condition {
        RequirementValue::descriptive(sentinel::REQUIRED)
    } else {
        RequirementValue::descriptive(sentinel::NOT_REQUIRED)
    }
}
