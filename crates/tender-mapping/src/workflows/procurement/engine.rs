use tracing::{debug, info};

use super::blueprint::ConditionContext;
use super::calendar::WorkingCalendar;
use super::classifier::classify;
use super::domain::{ProcurementError, ProcurementInput, ProcurementResult};
use super::policy::{PolicyError, ProcurementPolicy};
use super::requirements;
use super::scheduler::{total_duration_days, StageScheduler};

/// Classification, requirements and scheduling over one validated policy.
#[derive(Debug, Clone)]
pub struct ProcurementEngine {
    policy: ProcurementPolicy,
    calendar: WorkingCalendar,
}

impl ProcurementEngine {
    pub fn new(policy: ProcurementPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        let calendar = policy.calendar()?;
        Ok(Self { policy, calendar })
    }

    pub fn reference() -> Result<Self, PolicyError> {
        Self::new(ProcurementPolicy::reference())
    }

    pub fn policy(&self) -> &ProcurementPolicy {
        &self.policy
    }

    pub fn calculate(&self, input: &ProcurementInput) -> Result<ProcurementResult, ProcurementError> {
        let work_type = input.work_type();
        let budget = input.budget();

        let procurement_method = classify(&self.policy, work_type, budget);
        debug!(work_type = work_type.id(), budget, method = %procurement_method, "classified");

        let requirements = requirements::evaluate(
            &self.policy,
            procurement_method,
            work_type,
            budget,
            input.project_duration_months(),
        );
        let guidelines = self
            .policy
            .guidelines
            .lookup(work_type, budget, &self.policy.thresholds);

        let context = ConditionContext {
            method: procurement_method,
            budget,
            requirements: &requirements,
        };
        let scheduler = StageScheduler::new(
            &self.policy.stages,
            &self.calendar,
            &self.policy.standard_holidays,
        );
        let stages = scheduler.schedule(input.start_date(), input.holidays(), &context)?;
        let total_duration_days = total_duration_days(&stages);

        info!(
            work_type = work_type.id(),
            budget,
            method = %procurement_method,
            stages = stages.len(),
            total_duration_days,
            "procurement timeline calculated"
        );

        Ok(ProcurementResult {
            procurement_method,
            requirements,
            guidelines,
            stages,
            total_duration_days,
        })
    }
}
