use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::domain::{CategoryOptions, MappingRule};

pub const OPTIONS_FILE: &str = "options.json";
pub const RULES_FILE: &str = "mapping_rules.json";

/// Storage abstraction so the matching service can be exercised in isolation.
pub trait RuleRepository: Send + Sync {
    fn load_rules(&self) -> Result<Vec<MappingRule>, RepositoryError>;
    fn load_categories(&self) -> Result<Vec<CategoryOptions>, RepositoryError>;
    /// Durably appends one rule. On error nothing was written.
    fn append(&self, rule: &MappingRule) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("rule store I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rule store document {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// For stores that are not file-backed (a database, a remote rule service) to report that
    /// the backend cannot be reached. [`JsonRuleStore`] reports `Io` or `Corrupt` instead.
    #[error("rule store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RulesDocument {
    mapping_rules: Vec<MappingRule>,
}

/// Rule store backed by two JSON documents in one directory.
#[derive(Debug, Clone)]
pub struct JsonRuleStore {
    options_path: PathBuf,
    rules_path: PathBuf,
}

impl JsonRuleStore {
    /// Opens the store, creating the directory and seeding missing documents with the
    /// reference categories and rules.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| RepositoryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let store = Self {
            options_path: dir.join(OPTIONS_FILE),
            rules_path: dir.join(RULES_FILE),
        };

        if !store.options_path.exists() {
            write_json(&store.options_path, &reference_options())?;
        }
        if !store.rules_path.exists() {
            let document = RulesDocument {
                mapping_rules: reference_rules(),
            };
            write_json(&store.rules_path, &document)?;
        }

        Ok(store)
    }

    fn read_rules(&self) -> Result<RulesDocument, RepositoryError> {
        read_json(&self.rules_path)
    }
}

impl RuleRepository for JsonRuleStore {
    fn load_rules(&self) -> Result<Vec<MappingRule>, RepositoryError> {
        Ok(self.read_rules()?.mapping_rules)
    }

    fn load_categories(&self) -> Result<Vec<CategoryOptions>, RepositoryError> {
        let options: BTreeMap<String, Vec<String>> = read_json(&self.options_path)?;
        Ok(options
            .into_iter()
            .map(|(category, options)| CategoryOptions { category, options })
            .collect())
    }

    fn append(&self, rule: &MappingRule) -> Result<(), RepositoryError> {
        let mut document = self.read_rules()?;
        document.mapping_rules.push(rule.clone());
        write_json(&self.rules_path, &document)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, RepositoryError> {
    let raw = fs::read_to_string(path).map_err(|source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| RepositoryError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes beside the target and renames over it, so readers never see a partial document.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RepositoryError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| RepositoryError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    let staging = path.with_extension("json.tmp");
    let io_error = |source: std::io::Error| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&staging, json).map_err(io_error)?;
    fs::rename(&staging, path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        io_error(source)
    })
}

fn reference_options() -> BTreeMap<String, Vec<String>> {
    let categories: [(&str, &[&str]); 6] = [
        (
            "Government entity",
            &[
                "Ministry of Education",
                "Ministry of Health",
                "Ministry of Housing",
                "Ministry of Transport",
                "Municipalities",
            ],
        ),
        (
            "Products and services",
            &[
                "IT equipment",
                "Construction materials",
                "Medicines and medical supplies",
                "Consulting services",
                "Electrical equipment",
            ],
        ),
        (
            "Budget",
            &[
                "< 500,000",
                "500,000 - 1,000,000",
                "1,000,000 - 5,000,000",
                "5,000,000 - 10,000,000",
                "> 10,000,000",
            ],
        ),
        (
            "Duration",
            &[
                "Less than a month",
                "1 - 3 months",
                "3 - 6 months",
                "6 - 12 months",
                "More than a year",
            ],
        ),
        (
            "Payment terms",
            &[
                "Advance payment",
                "Scheduled instalments",
                "Single payment after delivery",
                "Milestone payments",
            ],
        ),
        (
            "Supplier classification",
            &[
                "Accredited suppliers",
                "Accredited contractors",
                "Local suppliers",
                "Consulting firms",
            ],
        ),
    ];

    categories
        .into_iter()
        .map(|(category, options)| {
            (
                category.to_string(),
                options.iter().map(|option| option.to_string()).collect(),
            )
        })
        .collect()
}

fn reference_rule(
    conditions: [&str; 5],
    matched_tender_type: &str,
    attributes: &[(&str, &str)],
) -> MappingRule {
    let categories = [
        "Government entity",
        "Products and services",
        "Budget",
        "Duration",
        "Supplier classification",
    ];

    MappingRule {
        conditions: categories
            .iter()
            .zip(conditions)
            .map(|(category, value)| (category.to_string(), value.to_string()))
            .collect(),
        matched_tender_type: matched_tender_type.to_string(),
        attributes: attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    }
}

pub fn reference_rules() -> Vec<MappingRule> {
    vec![
        reference_rule(
            [
                "Ministry of Education",
                "IT equipment",
                "< 500,000",
                "1 - 3 months",
                "Accredited suppliers",
            ],
            "IT equipment supply tender",
            &[
                ("Supply period", "30 days"),
                ("Required classification", "Accredited IT suppliers"),
                ("Payment", "Single payment after delivery"),
            ],
        ),
        reference_rule(
            [
                "Ministry of Housing",
                "Construction materials",
                "5,000,000 - 10,000,000",
                "6 - 12 months",
                "Accredited contractors",
            ],
            "Construction works tender",
            &[
                ("Execution period", "12 months"),
                ("Payment", "Milestone payments"),
                ("Qualification", "First-grade contractor classification"),
            ],
        ),
        reference_rule(
            [
                "Ministry of Health",
                "Medicines and medical supplies",
                "1,000,000 - 5,000,000",
                "3 - 6 months",
                "Accredited suppliers",
            ],
            "Medical supplies tender",
            &[
                ("Supply period", "90 days"),
                ("Required classification", "Accredited healthcare suppliers"),
                ("Payment", "Scheduled instalments"),
            ],
        ),
        reference_rule(
            [
                "Ministry of Transport",
                "Consulting services",
                "1,000,000 - 5,000,000",
                "6 - 12 months",
                "Consulting firms",
            ],
            "Consulting services tender",
            &[
                ("Execution period", "9 months"),
                ("Qualification", "Prior experience on similar projects"),
                ("Payment", "Milestone payments"),
            ],
        ),
        reference_rule(
            [
                "Municipalities",
                "Electrical equipment",
                "500,000 - 1,000,000",
                "1 - 3 months",
                "Local suppliers",
            ],
            "Municipal equipment supply tender",
            &[
                ("Supply period", "45 days"),
                ("Payment", "Single payment after delivery"),
                ("Additional requirements", "Samples submitted for inspection before supply"),
            ],
        ),
    ]
}
