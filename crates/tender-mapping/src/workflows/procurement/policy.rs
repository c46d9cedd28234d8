use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::blueprint::{DurationSource, StageBlueprint};
use super::calendar::{CalendarError, WorkingCalendar};
use super::domain::{ProcurementMethod, RequirementField, WorkType};
use super::guidelines::GuidelineStore;

/// Budget limits that switch procurement rules. All amounts are in the platform currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetThresholds {
    /// General work strictly below this is bought directly.
    pub direct_purchase: f64,
    /// General work up to and including this uses a limited competition.
    pub limited_competition: f64,
    pub two_envelopes: f64,
    pub performance_guarantee: f64,
    pub final_guarantee: f64,
    pub initial_guarantee: f64,
    /// General competition announcement tiers: below the first, below the second, otherwise.
    pub announcement_tiers: [f64; 2],
}

impl BudgetThresholds {
    pub fn reference() -> Self {
        Self {
            direct_purchase: 100_000.0,
            limited_competition: 500_000.0,
            two_envelopes: 5_000_000.0,
            performance_guarantee: 5_000_000.0,
            final_guarantee: 5_000_000.0,
            initial_guarantee: 25_000_000.0,
            announcement_tiers: [5_000_000.0, 100_000_000.0],
        }
    }
}

/// Day and count figures handed out by the requirements rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRules {
    /// Announcement days per general competition tier.
    pub announcement_days: [u32; 3],
    pub announcement_days_alternative_methods: u32,
    pub announcement_days_limited_suppliers: u32,
    pub announcement_days_exclusive_work: u32,
    pub default_review_days: u32,
    pub case_by_case_review_days: u32,
    pub minimum_participants: u32,
    pub performance_guarantee_days: u32,
    /// Projects longer than this many months need a final guarantee.
    pub final_guarantee_months: u32,
}

impl PeriodRules {
    pub fn reference() -> Self {
        Self {
            announcement_days: [15, 30, 60],
            announcement_days_alternative_methods: 15,
            announcement_days_limited_suppliers: 20,
            announcement_days_exclusive_work: 10,
            default_review_days: 7,
            case_by_case_review_days: 5,
            minimum_participants: 5,
            performance_guarantee_days: 5,
            final_guarantee_months: 12,
        }
    }
}

/// Complete rule configuration for the procurement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcurementPolicy {
    pub thresholds: BudgetThresholds,
    pub periods: PeriodRules,
    /// Fixed method per work type; general work is budget-driven and never listed here.
    pub method_table: BTreeMap<WorkType, ProcurementMethod>,
    pub guidelines: GuidelineStore,
    pub stages: StageBlueprint,
    pub standard_holidays: Vec<NaiveDate>,
    pub weekend: Vec<Weekday>,
}

impl ProcurementPolicy {
    pub fn reference() -> Self {
        let method_table = BTreeMap::from([
            (WorkType::LimitedSuppliers, ProcurementMethod::LimitedCompetition),
            (WorkType::UrgentCases, ProcurementMethod::LimitedCompetition),
            (WorkType::ConsultingServices, ProcurementMethod::LimitedCompetition),
            (WorkType::CharitableLimited, ProcurementMethod::LimitedCompetition),
            (WorkType::ExclusiveWork, ProcurementMethod::DirectPurchase),
            (WorkType::EmergencyCases, ProcurementMethod::DirectPurchase),
            (WorkType::CharitableDirect, ProcurementMethod::DirectPurchase),
            (WorkType::NationalSecurity, ProcurementMethod::DirectPurchase),
            (WorkType::UndefinedQuantities, ProcurementMethod::FrameworkAgreement),
            (WorkType::UndefinedSpecs, ProcurementMethod::TwoStageCompetition),
            (WorkType::CompetitiveGoods, ProcurementMethod::ReverseAuction),
        ]);

        let standard_holidays = [
            (2022, 4, 5),
            (2022, 5, 7),
            (2022, 6, 12),
            (2023, 1, 1),
            (2023, 4, 5),
            (2024, 2, 2),
        ]
        .into_iter()
        .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect();

        Self {
            thresholds: BudgetThresholds::reference(),
            periods: PeriodRules::reference(),
            method_table,
            guidelines: GuidelineStore::reference(),
            stages: StageBlueprint::standard(),
            standard_holidays,
            weekend: vec![Weekday::Fri, Weekday::Sat],
        }
    }

    /// Reads a JSON policy document and validates it before use.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy: Self = serde_json::from_str(&raw).map_err(|source| PolicyError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn with_weekend(mut self, weekend: Vec<Weekday>) -> Self {
        self.weekend = weekend;
        self
    }

    pub fn calendar(&self) -> Result<WorkingCalendar, CalendarError> {
        WorkingCalendar::new(self.weekend.iter().copied())
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.thresholds.direct_purchase > self.thresholds.limited_competition {
            return Err(PolicyError::ThresholdOrder {
                direct_purchase: self.thresholds.direct_purchase,
                limited_competition: self.thresholds.limited_competition,
            });
        }

        if self.stages.templates().is_empty() {
            return Err(PolicyError::NoStages);
        }

        for (index, stage) in self.stages.templates().iter().enumerate() {
            if stage.name.trim().is_empty() {
                return Err(PolicyError::BlankStageName { index });
            }

            if let DurationSource::Requirement { field, fallback } = stage.duration {
                let usable = field.can_hold_number()
                    || fallback.map(RequirementField::can_hold_number).unwrap_or(false);
                if !usable {
                    return Err(PolicyError::NonNumericDuration {
                        stage: stage.name.clone(),
                        field: field.key(),
                    });
                }
            }
        }

        self.calendar()?;
        Ok(())
    }
}

impl RequirementField {
    /// Fields whose rules can hand out a day or count figure.
    pub const fn can_hold_number(self) -> bool {
        matches!(
            self,
            Self::AnnouncementPeriod
                | Self::ReviewPeriod
                | Self::RequiredParticipants
                | Self::PerformanceGuarantee
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read policy file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("policy file {} is not a valid policy document: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("direct purchase threshold {direct_purchase} exceeds limited competition threshold {limited_competition}")]
    ThresholdOrder {
        direct_purchase: f64,
        limited_competition: f64,
    },
    #[error("stage template is empty")]
    NoStages,
    #[error("stage #{index} has a blank name")]
    BlankStageName { index: usize },
    #[error("stage '{stage}' takes its duration from '{field}', which never holds a day count")]
    NonNumericDuration { stage: String, field: &'static str },
    #[error("stage '{stage}' duration from '{field}' resolved to '{value}', not a day count")]
    UnresolvedDuration {
        stage: String,
        field: &'static str,
        value: String,
    },
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reference_policy_is_valid() {
        let policy = ProcurementPolicy::reference();
        policy.validate().expect("reference policy validates");
        assert_eq!(policy.stages.templates().len(), 8);
        assert!(!policy.method_table.contains_key(&WorkType::GeneralWork));
    }

    #[test]
    fn policy_round_trips_through_a_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let json = serde_json::to_string(&ProcurementPolicy::reference()).expect("serializes");
        file.write_all(json.as_bytes()).expect("write policy");

        let loaded = ProcurementPolicy::from_path(file.path()).expect("policy loads");
        assert_eq!(loaded, ProcurementPolicy::reference());
    }

    #[test]
    fn corrupt_policy_file_fails_at_load() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{ \"thresholds\": ").expect("write");

        let err = ProcurementPolicy::from_path(file.path()).expect_err("corrupt file rejected");
        assert!(matches!(err, PolicyError::Parse { .. }));
    }

    #[test]
    fn descriptive_only_duration_field_is_rejected() {
        let mut policy = ProcurementPolicy::reference();
        let stage = &mut policy.stages.templates_mut()[0];
        stage.duration = DurationSource::Requirement {
            field: RequirementField::FileStructure,
            fallback: None,
        };

        let err = policy.validate().expect_err("invalid stage rejected");
        assert!(matches!(
            err,
            PolicyError::NonNumericDuration { field: "file_structure", .. }
        ));
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let mut policy = ProcurementPolicy::reference();
        policy.thresholds.direct_purchase = 900_000.0;
        assert!(matches!(
            policy.validate(),
            Err(PolicyError::ThresholdOrder { .. })
        ));
    }
}
