//! Procurement method classification, compliance requirements and dated stage timelines.

pub mod blueprint;
pub mod calendar;
pub mod classifier;
pub mod domain;
mod engine;
pub mod guidelines;
pub mod policy;
pub mod requirements;
pub mod router;
pub mod scheduler;
pub mod views;

#[cfg(test)]
mod tests;

pub use blueprint::{StageBlueprint, StageTemplate};
pub use calendar::{CalendarError, WorkingCalendar};
pub use classifier::classify;
pub use domain::{
    ProcurementError, ProcurementInput, ProcurementMethod, ProcurementResult, RequirementSet,
    RequirementValue, ScheduledStage, ValidationError, WorkType,
};
pub use engine::ProcurementEngine;
pub use policy::{PolicyError, ProcurementPolicy};
pub use router::procurement_router;
pub use views::{CalculateRequest, ProcurementResultView};
