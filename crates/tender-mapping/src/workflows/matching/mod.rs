//! Rule-based tender-type matching over category selections.

pub mod domain;
pub mod matcher;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CategoryOptions, MappingRule, Selections, TenderAttribute, TenderMappingResult, TenderType,
};
pub use matcher::{match_rules, DEFAULT_THRESHOLD};
pub use repository::{JsonRuleStore, RepositoryError, RuleRepository};
pub use router::matching_router;
pub use service::{MatchingServiceError, TenderMatchingService};
