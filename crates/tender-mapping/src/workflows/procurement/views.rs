use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    DayCount, ProcurementInput, ProcurementResult, RequirementValue, ScheduledStage,
    ValidationError, WorkType,
};

/// Body of a calculation request. Every field is optional here so that all missing
/// fields can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateRequest {
    pub work_type: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<String>,
    pub project_duration: Option<u32>,
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl CalculateRequest {
    pub fn into_input(self) -> Result<ProcurementInput, ValidationError> {
        let mut missing = Vec::new();
        if self.work_type.is_none() {
            missing.push("work_type");
        }
        if self.budget.is_none() {
            missing.push("budget");
        }
        if self.start_date.is_none() {
            missing.push("start_date");
        }
        if self.project_duration.is_none() {
            missing.push("project_duration");
        }

        let (Some(work_type), Some(budget), Some(start_date), Some(project_duration)) = (
            self.work_type,
            self.budget,
            self.start_date,
            self.project_duration,
        ) else {
            return Err(ValidationError::MissingFields(missing));
        };

        let work_type: WorkType = work_type.parse()?;
        let start_date = parse_date("start_date", &start_date)?;
        let holidays = self
            .holidays
            .iter()
            .map(|raw| parse_date("holidays", raw))
            .collect::<Result<Vec<_>, _>>()?;

        ProcurementInput::new(work_type, budget, start_date, project_duration, holidays)
    }
}

pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::MalformedDate {
            field,
            value: raw.to_string(),
        }
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct StageView {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: u32,
    pub is_working_days: bool,
    pub notes: String,
}

impl From<&ScheduledStage> for StageView {
    fn from(stage: &ScheduledStage) -> Self {
        Self {
            name: stage.name.clone(),
            start_date: stage.start_date,
            end_date: stage.end_date,
            duration: stage.duration,
            is_working_days: stage.unit == DayCount::Working,
            notes: stage.note.clone().unwrap_or_default(),
        }
    }
}

/// Flat JSON shape consumed by the planning frontend.
#[derive(Debug, Clone, Serialize)]
pub struct ProcurementResultView {
    pub procurement_type: &'static str,
    pub announcement_period: RequirementValue,
    pub review_period: RequirementValue,
    pub required_participants: RequirementValue,
    pub sme_priority: RequirementValue,
    pub performance_guarantee: RequirementValue,
    pub initial_guarantee: RequirementValue,
    pub final_guarantee: RequirementValue,
    pub file_structure: RequirementValue,
    pub implementation_guidelines: String,
    pub referenced_articles: Vec<u32>,
    pub stages: Vec<StageView>,
    pub total_duration: i64,
}

impl From<&ProcurementResult> for ProcurementResultView {
    fn from(result: &ProcurementResult) -> Self {
        let requirements = &result.requirements;
        Self {
            procurement_type: result.procurement_method.label(),
            announcement_period: requirements.announcement_period.clone(),
            review_period: requirements.review_period.clone(),
            required_participants: requirements.required_participants.clone(),
            sme_priority: requirements.sme_priority.clone(),
            performance_guarantee: requirements.performance_guarantee.clone(),
            initial_guarantee: requirements.initial_guarantee.clone(),
            final_guarantee: requirements.final_guarantee.clone(),
            file_structure: requirements.file_structure.clone(),
            implementation_guidelines: result.guidelines.text.clone(),
            referenced_articles: result.guidelines.referenced_articles.clone(),
            stages: result.stages.iter().map(StageView::from).collect(),
            total_duration: result.total_duration_days,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkTypeView {
    pub id: &'static str,
    pub name: &'static str,
    pub arabic_name: &'static str,
}

impl From<WorkType> for WorkTypeView {
    fn from(work_type: WorkType) -> Self {
        Self {
            id: work_type.id(),
            name: work_type.label(),
            arabic_name: work_type.arabic_label(),
        }
    }
}

pub fn work_type_catalogue() -> Vec<WorkTypeView> {
    WorkType::ordered().into_iter().map(WorkTypeView::from).collect()
}
