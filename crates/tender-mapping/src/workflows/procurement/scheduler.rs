use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

use super::blueprint::{ConditionContext, DurationSource, StageBlueprint, StageTemplate};
use super::calendar::WorkingCalendar;
use super::domain::{DayCount, ProcurementError, RequirementSet, ScheduledStage};
use super::policy::PolicyError;

/// Walks the stage template and lays the surviving stages end to end on the calendar.
#[derive(Debug)]
pub struct StageScheduler<'a> {
    blueprint: &'a StageBlueprint,
    calendar: &'a WorkingCalendar,
    standard_holidays: &'a [NaiveDate],
}

impl<'a> StageScheduler<'a> {
    pub fn new(
        blueprint: &'a StageBlueprint,
        calendar: &'a WorkingCalendar,
        standard_holidays: &'a [NaiveDate],
    ) -> Self {
        Self {
            blueprint,
            calendar,
            standard_holidays,
        }
    }

    /// Each emitted stage starts where the previous one ended; skipped stages leave no trace.
    pub fn schedule(
        &self,
        start_date: NaiveDate,
        holidays: &BTreeSet<NaiveDate>,
        context: &ConditionContext<'_>,
    ) -> Result<Vec<ScheduledStage>, ProcurementError> {
        let holidays: BTreeSet<NaiveDate> = self
            .standard_holidays
            .iter()
            .chain(holidays.iter())
            .copied()
            .collect();

        let mut stages = Vec::with_capacity(self.blueprint.templates().len());
        let mut current = start_date;

        for template in self.blueprint.templates() {
            if template.is_skipped(context) {
                debug!(stage = %template.name, method = %context.method, "stage skipped");
                continue;
            }

            let mut duration = resolve_duration(template, context.requirements)?;
            let mut note = None;
            if let Some(rule) = template.reduction(context) {
                let reduced = rule.adjustment.apply(duration);
                debug!(
                    stage = %template.name,
                    from = duration,
                    to = reduced,
                    "stage duration reduced"
                );
                duration = reduced;
                note = rule.note.clone();
            }

            let end_date = match template.unit {
                DayCount::Working => self.calendar.add_working_days(current, duration, &holidays)?,
                DayCount::Calendar => {
                    self.calendar.add_calendar_days(current, i64::from(duration))?
                }
            };

            debug!(
                stage = %template.name,
                duration,
                start = %current,
                end = %end_date,
                "stage scheduled"
            );

            stages.push(ScheduledStage {
                name: template.name.clone(),
                start_date: current,
                end_date,
                duration,
                unit: template.unit,
                note,
            });
            current = end_date;
        }

        Ok(stages)
    }
}

/// Calendar days between the first stage's start and the last stage's end.
pub fn total_duration_days(stages: &[ScheduledStage]) -> i64 {
    match (stages.first(), stages.last()) {
        (Some(first), Some(last)) => (last.end_date - first.start_date).num_days(),
        _ => 0,
    }
}

/// A zero or descriptive primary falls through to the fallback field. Whatever remains must be
/// a number; a numeric zero without a fallback is a legitimate zero-length stage.
fn resolve_duration(
    template: &StageTemplate,
    requirements: &RequirementSet,
) -> Result<u32, PolicyError> {
    let (field, fallback) = match template.duration {
        DurationSource::Fixed { days } => return Ok(days),
        DurationSource::Requirement { field, fallback } => (field, fallback),
    };

    let primary = requirements.get(field);
    let resolved = match (primary.as_number(), fallback) {
        (Some(days), _) if days > 0 => return Ok(days),
        (Some(days), None) => return Ok(days),
        (_, Some(fallback)) => (fallback, requirements.get(fallback)),
        (None, None) => (field, primary),
    };

    let (field, value) = resolved;
    value.as_number().ok_or_else(|| PolicyError::UnresolvedDuration {
        stage: template.name.clone(),
        field: field.key(),
        value: value.to_string(),
    })
}
