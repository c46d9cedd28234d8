use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tender_mapping::config::EngineConfig;
use tender_mapping::error::AppError;
use tender_mapping::workflows::matching::{JsonRuleStore, TenderMatchingService};
use tender_mapping::workflows::procurement::{ProcurementEngine, ProcurementPolicy};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the engine from the configured policy document, or the built-in regulation tables.
pub(crate) fn build_engine(config: &EngineConfig) -> Result<ProcurementEngine, AppError> {
    let policy = match &config.policy_path {
        Some(path) => {
            info!(path = %path.display(), "loading procurement policy");
            ProcurementPolicy::from_path(path)?
        }
        None => ProcurementPolicy::reference(),
    };

    let policy = match &config.weekend_days {
        Some(weekend) => policy.with_weekend(weekend.clone()),
        None => policy,
    };

    Ok(ProcurementEngine::new(policy)?)
}

pub(crate) fn open_matching_service(
    config: &EngineConfig,
) -> Result<TenderMatchingService<JsonRuleStore>, AppError> {
    let store = JsonRuleStore::open(&config.rules_dir)?;
    Ok(TenderMatchingService::new(
        Arc::new(store),
        config.match_threshold,
    )?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_selection(raw: &str) -> Result<(String, String), String> {
    let (category, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=VALUE, got '{raw}'"))?;
    let category = category.trim();
    let value = value.trim();
    if category.is_empty() || value.is_empty() {
        return Err(format!("expected CATEGORY=VALUE, got '{raw}'"));
    }
    Ok((category.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::path::PathBuf;

    #[test]
    fn selection_splits_on_first_equals() {
        assert_eq!(
            parse_selection("Budget = < 500,000").expect("parses"),
            ("Budget".to_string(), "< 500,000".to_string())
        );
        assert!(parse_selection("Budget").is_err());
        assert!(parse_selection("=value").is_err());
    }

    #[test]
    fn engine_uses_configured_weekend() {
        let config = EngineConfig {
            rules_dir: PathBuf::from("unused"),
            policy_path: None,
            weekend_days: Some(vec![Weekday::Sat, Weekday::Sun]),
            match_threshold: 0.2,
        };

        let engine = build_engine(&config).expect("engine builds");
        assert_eq!(engine.policy().weekend, vec![Weekday::Sat, Weekday::Sun]);
    }

    #[test]
    fn policy_document_weekend_applies_without_override() {
        let dir = tempfile::tempdir().expect("temp dir");
        let policy_path = dir.path().join("policy.json");
        let policy = ProcurementPolicy::reference().with_weekend(vec![Weekday::Sat, Weekday::Sun]);
        let json = serde_json::to_string(&policy).expect("policy serializes");
        std::fs::write(&policy_path, json).expect("policy written");

        let mut config = EngineConfig {
            rules_dir: dir.path().join("rules"),
            policy_path: Some(policy_path),
            weekend_days: None,
            match_threshold: 0.2,
        };
        let engine = build_engine(&config).expect("engine builds");
        assert_eq!(engine.policy().weekend, vec![Weekday::Sat, Weekday::Sun]);

        config.weekend_days = Some(vec![Weekday::Fri]);
        let engine = build_engine(&config).expect("engine builds");
        assert_eq!(engine.policy().weekend, vec![Weekday::Fri]);
    }

    #[test]
    fn missing_policy_document_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = EngineConfig {
            rules_dir: dir.path().join("rules"),
            policy_path: Some(dir.path().join("absent.json")),
            weekend_days: None,
            match_threshold: 0.2,
        };

        assert!(matches!(build_engine(&config), Err(AppError::Policy(_))));
    }
}
