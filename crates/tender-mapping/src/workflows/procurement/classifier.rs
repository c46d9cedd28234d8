use super::domain::{ProcurementMethod, WorkType};
use super::policy::ProcurementPolicy;

/// Maps a work type and budget to the procurement method the regulations prescribe.
///
/// General work is budget-driven: strictly below the direct purchase threshold it is bought
/// directly, up to and including the limited competition threshold it goes to a limited
/// competition, and above that to a general competition. Every other work type is a fixed
/// lookup in the policy's method table; a work type missing from the table is `Undefined`.
pub fn classify(policy: &ProcurementPolicy, work_type: WorkType, budget: f64) -> ProcurementMethod {
    if work_type == WorkType::GeneralWork {
        let thresholds = &policy.thresholds;
        return if budget < thresholds.direct_purchase {
            ProcurementMethod::DirectPurchase
        } else if budget <= thresholds.limited_competition {
            ProcurementMethod::LimitedCompetition
        } else {
            ProcurementMethod::GeneralCompetition
        };
    }

    policy
        .method_table
        .get(&work_type)
        .copied()
        .unwrap_or(ProcurementMethod::Undefined)
}
