use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::workflows::matching::domain::{CategoryOptions, MappingRule, Selections};
use crate::workflows::matching::repository::{reference_rules, RepositoryError, RuleRepository};
use crate::workflows::matching::{TenderMatchingService, DEFAULT_THRESHOLD};

#[derive(Default)]
pub(super) struct MemoryRepository {
    rules: Mutex<Vec<MappingRule>>,
}

impl MemoryRepository {
    pub(super) fn with_rules(rules: Vec<MappingRule>) -> Self {
        Self {
            rules: Mutex::new(rules),
        }
    }

    pub(super) fn stored(&self) -> Vec<MappingRule> {
        self.rules.lock().expect("repository mutex poisoned").clone()
    }
}

impl RuleRepository for MemoryRepository {
    fn load_rules(&self) -> Result<Vec<MappingRule>, RepositoryError> {
        Ok(self.stored())
    }

    fn load_categories(&self) -> Result<Vec<CategoryOptions>, RepositoryError> {
        Ok(vec![CategoryOptions {
            category: "Budget".to_string(),
            options: vec!["< 500,000".to_string(), "> 10,000,000".to_string()],
        }])
    }

    fn append(&self, rule: &MappingRule) -> Result<(), RepositoryError> {
        self.rules
            .lock()
            .expect("repository mutex poisoned")
            .push(rule.clone());
        Ok(())
    }
}

/// Serves the reference rules but refuses every write.
pub(super) struct ReadOnlyRepository;

impl RuleRepository for ReadOnlyRepository {
    fn load_rules(&self) -> Result<Vec<MappingRule>, RepositoryError> {
        Ok(reference_rules())
    }

    fn load_categories(&self) -> Result<Vec<CategoryOptions>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn append(&self, _rule: &MappingRule) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }
}

pub(super) fn memory_service() -> (
    Arc<TenderMatchingService<MemoryRepository>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::with_rules(reference_rules()));
    let service = TenderMatchingService::new(repository.clone(), DEFAULT_THRESHOLD)
        .expect("service builds");
    (Arc::new(service), repository)
}

pub(super) fn read_only_service() -> Arc<TenderMatchingService<ReadOnlyRepository>> {
    let service = TenderMatchingService::new(Arc::new(ReadOnlyRepository), DEFAULT_THRESHOLD)
        .expect("service builds");
    Arc::new(service)
}

pub(super) fn rule(tender_type: &str, conditions: &[(&str, &str)]) -> MappingRule {
    MappingRule {
        conditions: conditions
            .iter()
            .map(|(category, value)| (category.to_string(), value.to_string()))
            .collect(),
        matched_tender_type: tender_type.to_string(),
        attributes: BTreeMap::from([("Payment".to_string(), "Advance payment".to_string())]),
    }
}

/// Selections matching the first reference rule exactly.
pub(super) fn education_selections() -> Selections {
    [
        ("Government entity", "Ministry of Education"),
        ("Products and services", "IT equipment"),
        ("Budget", "< 500,000"),
        ("Duration", "1 - 3 months"),
        ("Supplier classification", "Accredited suppliers"),
    ]
    .into_iter()
    .map(|(category, value)| (category.to_string(), value.to_string()))
    .collect()
}

pub(super) fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
