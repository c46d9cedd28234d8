use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::calendar::CalendarError;
use super::policy::PolicyError;

/// Category of work being procured. Drives the procurement method lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    GeneralWork,
    LimitedSuppliers,
    UrgentCases,
    ConsultingServices,
    CharitableLimited,
    ExclusiveWork,
    EmergencyCases,
    CharitableDirect,
    NationalSecurity,
    UndefinedQuantities,
    UndefinedSpecs,
    CompetitiveGoods,
}

impl WorkType {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::GeneralWork,
            Self::LimitedSuppliers,
            Self::UrgentCases,
            Self::ConsultingServices,
            Self::CharitableLimited,
            Self::ExclusiveWork,
            Self::EmergencyCases,
            Self::CharitableDirect,
            Self::NationalSecurity,
            Self::UndefinedQuantities,
            Self::UndefinedSpecs,
            Self::CompetitiveGoods,
        ]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::GeneralWork => "general_work",
            Self::LimitedSuppliers => "limited_suppliers",
            Self::UrgentCases => "urgent_cases",
            Self::ConsultingServices => "consulting_services",
            Self::CharitableLimited => "charitable_limited",
            Self::ExclusiveWork => "exclusive_work",
            Self::EmergencyCases => "emergency_cases",
            Self::CharitableDirect => "charitable_direct",
            Self::NationalSecurity => "national_security",
            Self::UndefinedQuantities => "undefined_quantities",
            Self::UndefinedSpecs => "undefined_specs",
            Self::CompetitiveGoods => "competitive_goods",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GeneralWork => "general work",
            Self::LimitedSuppliers => "limited suppliers and contractors",
            Self::UrgentCases => "urgent cases",
            Self::ConsultingServices => "consulting services",
            Self::CharitableLimited => "charities / non-profit entities (limited competition)",
            Self::ExclusiveWork => "exclusive-supplier work",
            Self::EmergencyCases => "emergency cases",
            Self::CharitableDirect => "charities / non-profit entities (direct purchase)",
            Self::NationalSecurity => "national security interests",
            Self::UndefinedQuantities => "undefined quantities",
            Self::UndefinedSpecs => "undefined specifications",
            Self::CompetitiveGoods => "competitive-market goods",
        }
    }

    /// Label used by the Arabic-language procurement platform.
    pub const fn arabic_label(self) -> &'static str {
        match self {
            Self::GeneralWork => "جميع الاعمال (جميع المنافسات التي لا تنطبق على الخيارات الأخرى)",
            Self::LimitedSuppliers => "محدودية الموردين والمقاولين",
            Self::UrgentCases => "الحالات العاجلة",
            Self::ConsultingServices => "الخدمات الاستشارية",
            Self::CharitableLimited => "الجمعيات الخيرية/الكيانات الغير هادفة (منافسة محدودة)",
            Self::ExclusiveWork => "الاعمال الحصرية المتوفرة لدي متعهد واحد",
            Self::EmergencyCases => "الحالات الطارئة",
            Self::CharitableDirect => "الجمعيات الخيرية/الكيانات الغير هادفة (شراء مباشر)",
            Self::NationalSecurity => "حماية مصالح الامن الوطني",
            Self::UndefinedQuantities => {
                "الحالات التي يتعذر فيها تحديد الكميات/الأصناف/حجم الاعمال او موعد تنفيذها"
            }
            Self::UndefinedSpecs => {
                "الحالات التي يتعذر فيها تحديد المواصفات الفنية والشروط التعاقدية النهائية تحديدا كاملا ودقيقأ"
            }
            Self::CompetitiveGoods => "السلع التي لها سوق تنافسي فعال ومتوفرة لدي اكثر من مورد",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkType {
    type Err = ValidationError;

    /// Accepts the snake_case id, the English label or the Arabic label.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();
        Self::ordered()
            .into_iter()
            .find(|work_type| {
                work_type.id() == lowered
                    || work_type.label() == lowered
                    || work_type.arabic_label() == trimmed
            })
            .ok_or_else(|| ValidationError::UnknownWorkType(trimmed.to_string()))
    }
}

/// Procurement method derived from the work type and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementMethod {
    GeneralCompetition,
    LimitedCompetition,
    DirectPurchase,
    FrameworkAgreement,
    TwoStageCompetition,
    ReverseAuction,
    Undefined,
}

impl ProcurementMethod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::GeneralCompetition => "General Competition",
            Self::LimitedCompetition => "Limited Competition",
            Self::DirectPurchase => "Direct Purchase",
            Self::FrameworkAgreement => "Framework Agreement",
            Self::TwoStageCompetition => "Two-Stage Competition",
            Self::ReverseAuction => "Reverse Auction",
            Self::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for ProcurementMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A requirement that is either a day/count figure or a descriptive policy phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementValue {
    Numeric(u32),
    Descriptive(String),
}

impl RequirementValue {
    pub fn descriptive(text: &str) -> Self {
        Self::Descriptive(text.to_string())
    }

    pub fn not_determined() -> Self {
        Self::descriptive(sentinel::NOT_DETERMINED)
    }

    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Numeric(value) => Some(*value),
            Self::Descriptive(_) => None,
        }
    }

    pub fn is_descriptive(&self, text: &str) -> bool {
        matches!(self, Self::Descriptive(value) if value == text)
    }
}

impl fmt::Display for RequirementValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Descriptive(text) => f.write_str(text),
        }
    }
}

/// Descriptive phrases carried by [`RequirementValue::Descriptive`].
pub mod sentinel {
    pub const NOT_DETERMINED: &str = "not determined";
    pub const LIMITED_POOL: &str = "limited pool";
    pub const AS_MANY_AS_POSSIBLE: &str = "as many as possible";
    pub const AT_LEAST_FIVE_OFFICES: &str = "no fewer than 5 offices";
    pub const MULTIPLE_NON_PROFITS: &str = "more than one non-profit entity";
    pub const SME_PRIORITY: &str = "SME priority applies";
    pub const REQUIRED: &str = "required";
    pub const NOT_REQUIRED: &str = "not required";
    pub const TWO_ENVELOPES: &str = "two envelopes";
    pub const ONE_ENVELOPE: &str = "one envelope";
}

/// Names a field of [`RequirementSet`] so stage templates can reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementField {
    AnnouncementPeriod,
    ReviewPeriod,
    RequiredParticipants,
    SmePriority,
    PerformanceGuarantee,
    InitialGuarantee,
    FinalGuarantee,
    FileStructure,
}

impl RequirementField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::AnnouncementPeriod => "announcement_period",
            Self::ReviewPeriod => "review_period",
            Self::RequiredParticipants => "required_participants",
            Self::SmePriority => "sme_priority",
            Self::PerformanceGuarantee => "performance_guarantee",
            Self::InitialGuarantee => "initial_guarantee",
            Self::FinalGuarantee => "final_guarantee",
            Self::FileStructure => "file_structure",
        }
    }
}

/// Compliance requirements derived for a single procurement case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementSet {
    pub announcement_period: RequirementValue,
    pub review_period: RequirementValue,
    pub required_participants: RequirementValue,
    pub sme_priority: RequirementValue,
    pub performance_guarantee: RequirementValue,
    pub initial_guarantee: RequirementValue,
    pub final_guarantee: RequirementValue,
    pub file_structure: RequirementValue,
}

impl RequirementSet {
    pub fn get(&self, field: RequirementField) -> &RequirementValue {
        match field {
            RequirementField::AnnouncementPeriod => &self.announcement_period,
            RequirementField::ReviewPeriod => &self.review_period,
            RequirementField::RequiredParticipants => &self.required_participants,
            RequirementField::SmePriority => &self.sme_priority,
            RequirementField::PerformanceGuarantee => &self.performance_guarantee,
            RequirementField::InitialGuarantee => &self.initial_guarantee,
            RequirementField::FinalGuarantee => &self.final_guarantee,
            RequirementField::FileStructure => &self.file_structure,
        }
    }
}

/// Validated caller input for a procurement calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementInput {
    work_type: WorkType,
    budget: f64,
    start_date: NaiveDate,
    project_duration_months: u32,
    holidays: BTreeSet<NaiveDate>,
}

impl ProcurementInput {
    pub fn new(
        work_type: WorkType,
        budget: f64,
        start_date: NaiveDate,
        project_duration_months: u32,
        holidays: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self, ValidationError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(ValidationError::InvalidBudget(budget));
        }

        Ok(Self {
            work_type,
            budget,
            start_date,
            project_duration_months,
            holidays: holidays.into_iter().collect(),
        })
    }

    pub fn work_type(&self) -> WorkType {
        self.work_type
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn project_duration_months(&self) -> u32 {
        self.project_duration_months
    }

    pub fn holidays(&self) -> &BTreeSet<NaiveDate> {
        &self.holidays
    }
}

/// Guideline text and the regulation articles it cites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationGuidelines {
    pub text: String,
    pub referenced_articles: Vec<u32>,
}

/// Whether a stage duration counts working days or calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCount {
    Working,
    Calendar,
}

/// A dated stage of the procurement timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledStage {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: u32,
    pub unit: DayCount,
    pub note: Option<String>,
}

/// Full outcome of a procurement calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcurementResult {
    pub procurement_method: ProcurementMethod,
    pub requirements: RequirementSet,
    pub guidelines: ImplementationGuidelines,
    pub stages: Vec<ScheduledStage>,
    pub total_duration_days: i64,
}

/// Input problems reported to the caller as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("field '{field}' must be a YYYY-MM-DD date, got '{value}'")]
    MalformedDate { field: &'static str, value: String },
    #[error("unknown work type '{0}'")]
    UnknownWorkType(String),
    #[error("budget must be a non-negative number, got {0}")]
    InvalidBudget(f64),
}

/// Failure of a procurement calculation.
#[derive(Debug, thiserror::Error)]
pub enum ProcurementError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("configuration error: {0}")]
    Configuration(#[from] PolicyError),
}

impl ProcurementError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
