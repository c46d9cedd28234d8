use serde::{Deserialize, Serialize};

use super::domain::{
    sentinel, DayCount, ProcurementMethod, RequirementField, RequirementSet, RequirementValue,
};

/// Facts a stage condition can be checked against.
#[derive(Debug, Clone, Copy)]
pub struct ConditionContext<'a> {
    pub method: ProcurementMethod,
    pub budget: f64,
    pub requirements: &'a RequirementSet,
}

/// Predicate over the classification, the budget or a derived requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageCondition {
    MethodIn { methods: Vec<ProcurementMethod> },
    BudgetBelow { amount: f64 },
    RequirementEquals {
        field: RequirementField,
        value: RequirementValue,
    },
}

impl StageCondition {
    pub fn matches(&self, context: &ConditionContext<'_>) -> bool {
        match self {
            StageCondition::MethodIn { methods } => methods.contains(&context.method),
            StageCondition::BudgetBelow { amount } => context.budget < *amount,
            StageCondition::RequirementEquals { field, value } => {
                context.requirements.get(*field) == value
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum Adjustment {
    ReduceTo(u32),
    ReduceBy(u32),
}

impl Adjustment {
    pub fn apply(self, duration: u32) -> u32 {
        match self {
            Adjustment::ReduceTo(days) => days,
            Adjustment::ReduceBy(days) => duration.saturating_sub(days),
        }
    }
}

/// Shortens a stage when its condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReduceRule {
    pub when: StageCondition,
    pub adjustment: Adjustment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationSource {
    Fixed { days: u32 },
    /// Read from a requirement; `fallback` is consulted when the primary is zero or descriptive.
    Requirement {
        field: RequirementField,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fallback: Option<RequirementField>,
    },
}

/// One row of the ordered stage template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTemplate {
    pub name: String,
    pub duration: DurationSource,
    pub unit: DayCount,
    #[serde(default)]
    pub skip_when: Vec<StageCondition>,
    /// Stage is kept only when every condition holds.
    #[serde(default)]
    pub applies_when: Vec<StageCondition>,
    #[serde(default)]
    pub reduce: Vec<ReduceRule>,
}

impl StageTemplate {
    pub fn is_skipped(&self, context: &ConditionContext<'_>) -> bool {
        self.skip_when.iter().any(|condition| condition.matches(context))
            || !self
                .applies_when
                .iter()
                .all(|condition| condition.matches(context))
    }

    /// First matching rule wins.
    pub fn reduction(&self, context: &ConditionContext<'_>) -> Option<&ReduceRule> {
        self.reduce.iter().find(|rule| rule.when.matches(context))
    }
}

pub const BID_OPENING: &str = "Bid Opening";
pub const QUALIFICATION_COMMITTEE: &str = "Qualification Committee";
pub const CONTRACTING: &str = "Contracting";

/// Ordered stage template shared by every procurement calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageBlueprint {
    stages: Vec<StageTemplate>,
}

impl StageBlueprint {
    pub fn new(stages: Vec<StageTemplate>) -> Self {
        Self { stages }
    }

    pub fn standard() -> Self {
        Self {
            stages: standard_stage_templates(),
        }
    }

    pub fn templates(&self) -> &[StageTemplate] {
        &self.stages
    }

    #[cfg(test)]
    pub(crate) fn templates_mut(&mut self) -> &mut [StageTemplate] {
        &mut self.stages
    }
}

fn fixed(name: &str, days: u32) -> StageTemplate {
    StageTemplate {
        name: name.to_string(),
        duration: DurationSource::Fixed { days },
        unit: DayCount::Working,
        skip_when: Vec::new(),
        applies_when: Vec::new(),
        reduce: Vec::new(),
    }
}

fn standard_stage_templates() -> Vec<StageTemplate> {
    vec![
        StageTemplate {
            name: "Submission Window".to_string(),
            duration: DurationSource::Requirement {
                field: RequirementField::AnnouncementPeriod,
                fallback: Some(RequirementField::ReviewPeriod),
            },
            unit: DayCount::Calendar,
            skip_when: Vec::new(),
            applies_when: Vec::new(),
            reduce: Vec::new(),
        },
        StageTemplate {
            applies_when: vec![StageCondition::MethodIn {
                methods: vec![
                    ProcurementMethod::GeneralCompetition,
                    ProcurementMethod::TwoStageCompetition,
                    ProcurementMethod::LimitedCompetition,
                ],
            }],
            ..fixed(BID_OPENING, 3)
        },
        fixed("Technical Evaluation", 5),
        StageTemplate {
            reduce: vec![ReduceRule {
                when: StageCondition::MethodIn {
                    methods: vec![ProcurementMethod::DirectPurchase],
                },
                adjustment: Adjustment::ReduceTo(5),
                note: Some("Shortened for direct purchase".to_string()),
            }],
            ..fixed("Bid Examination Committee", 9)
        },
        StageTemplate {
            skip_when: vec![StageCondition::MethodIn {
                methods: vec![ProcurementMethod::DirectPurchase],
            }],
            ..fixed(QUALIFICATION_COMMITTEE, 9)
        },
        fixed("Award Letter", 1),
        StageTemplate {
            duration: DurationSource::Requirement {
                field: RequirementField::PerformanceGuarantee,
                fallback: None,
            },
            ..fixed("Standstill Period", 0)
        },
        StageTemplate {
            reduce: vec![
                ReduceRule {
                    when: StageCondition::BudgetBelow { amount: 300_000.0 },
                    adjustment: Adjustment::ReduceTo(5),
                    note: Some(
                        "Shortened because the budget is below 300,000 and a purchase order replaces the contract"
                            .to_string(),
                    ),
                },
                ReduceRule {
                    when: StageCondition::RequirementEquals {
                        field: RequirementField::FinalGuarantee,
                        value: RequirementValue::descriptive(sentinel::NOT_REQUIRED),
                    },
                    adjustment: Adjustment::ReduceBy(7),
                    note: Some("Shortened because no final guarantee is required".to_string()),
                },
            ],
            ..fixed(CONTRACTING, 18)
        },
    ]
}
