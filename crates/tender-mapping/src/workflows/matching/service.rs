use std::sync::{Arc, Mutex, RwLock};

use tracing::{info, warn};

use super::domain::{CategoryOptions, MappingRule, Selections, TenderMappingResult};
use super::matcher;
use super::repository::{RepositoryError, RuleRepository};

/// Matches selections against a snapshot of the rule set and serializes rule appends.
pub struct TenderMatchingService<R> {
    repository: Arc<R>,
    rules: RwLock<Arc<Vec<MappingRule>>>,
    writer: Mutex<()>,
    threshold: f64,
}

impl<R> TenderMatchingService<R>
where
    R: RuleRepository + 'static,
{
    /// Loads the current rule set once; later appends keep the snapshot current.
    pub fn new(repository: Arc<R>, threshold: f64) -> Result<Self, MatchingServiceError> {
        let rules = repository.load_rules()?;
        info!(rules = rules.len(), threshold, "mapping rules loaded");
        Ok(Self {
            repository,
            rules: RwLock::new(Arc::new(rules)),
            writer: Mutex::new(()),
            threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn rules(&self) -> Arc<Vec<MappingRule>> {
        self.rules
            .read()
            .expect("rule snapshot lock poisoned")
            .clone()
    }

    pub fn map(&self, selections: &Selections) -> TenderMappingResult {
        self.map_with_threshold(selections, self.threshold)
    }

    pub fn map_with_threshold(
        &self,
        selections: &Selections,
        threshold: f64,
    ) -> TenderMappingResult {
        let rules = self.rules();
        matcher::match_rules(&rules, selections, threshold)
    }

    pub fn categories(&self) -> Result<Vec<CategoryOptions>, MatchingServiceError> {
        Ok(self.repository.load_categories()?)
    }

    /// Persists the rule first, then reloads the store so rules appended by other writers are
    /// picked up too. The in-memory snapshot only changes once the write succeeded.
    pub fn add_rule(&self, rule: MappingRule) -> Result<(), MatchingServiceError> {
        validate(&rule)?;

        let _guard = self.writer.lock().expect("rule writer lock poisoned");
        if let Err(err) = self.repository.append(&rule) {
            warn!(
                error = %err,
                tender_type = %rule.matched_tender_type,
                "mapping rule not persisted"
            );
            return Err(err.into());
        }

        let tender_type = rule.matched_tender_type.clone();
        let rules = match self.repository.load_rules() {
            Ok(rules) => rules,
            Err(err) => {
                warn!(error = %err, "rule store reload failed, extending the loaded rules");
                let mut rules = Vec::clone(&self.rules());
                rules.push(rule);
                rules
            }
        };

        info!(tender_type = %tender_type, rules = rules.len(), "mapping rule added");
        *self.rules.write().expect("rule snapshot lock poisoned") = Arc::new(rules);
        Ok(())
    }
}

fn validate(rule: &MappingRule) -> Result<(), MatchingServiceError> {
    if rule.matched_tender_type.trim().is_empty() {
        return Err(MatchingServiceError::InvalidRule(
            "matched_tender_type must not be blank".to_string(),
        ));
    }
    if rule.conditions.is_empty() {
        return Err(MatchingServiceError::InvalidRule(
            "a rule needs at least one condition".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error("invalid mapping rule: {0}")]
    InvalidRule(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
