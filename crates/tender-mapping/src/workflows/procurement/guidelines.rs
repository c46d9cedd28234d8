use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::domain::{ImplementationGuidelines, WorkType};
use super::policy::BudgetThresholds;

pub const NO_SPECIFIC_GUIDELINES: &str = "no specific guidelines";

/// Implementation guidance per work type, with budget-tier overrides for general work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidelineStore {
    pub by_work_type: BTreeMap<WorkType, ImplementationGuidelines>,
    /// General work at or below the direct purchase threshold.
    pub general_direct_tier: Option<ImplementationGuidelines>,
    /// General work at or below the limited competition threshold.
    pub general_limited_tier: Option<ImplementationGuidelines>,
}

impl GuidelineStore {
    pub fn lookup(
        &self,
        work_type: WorkType,
        budget: f64,
        thresholds: &BudgetThresholds,
    ) -> ImplementationGuidelines {
        if work_type == WorkType::GeneralWork {
            let tier = if budget <= thresholds.direct_purchase {
                self.general_direct_tier.as_ref()
            } else if budget <= thresholds.limited_competition {
                self.general_limited_tier.as_ref()
            } else {
                None
            };
            if let Some(guidelines) = tier {
                return guidelines.clone();
            }
        }

        self.by_work_type
            .get(&work_type)
            .cloned()
            .unwrap_or_else(|| ImplementationGuidelines {
                text: NO_SPECIFIC_GUIDELINES.to_string(),
                referenced_articles: Vec::new(),
            })
    }

    pub fn reference() -> Self {
        let by_work_type = [
            (WorkType::GeneralWork, "General procurement controls apply.", vec![]),
            (
                WorkType::LimitedSuppliers,
                "1- Publish the announcement on the platform to confirm that no other contractors or suppliers serve this field. If more than 5 suppliers turn out to be available, issue a general competition.",
                vec![],
            ),
            (
                WorkType::UrgentCases,
                "1- The work must not be something that could have been planned. 2- It is not urgent if the entity delayed execution. 3- It must not be continuous-execution work and must not be able to bear general competition procedures.",
                vec![],
            ),
            (
                WorkType::ConsultingServices,
                "1- Offers are submitted in two envelopes, financial and technical. 2- May be procured by direct purchase when the direct purchase conditions are met (Article 33).",
                vec![33],
            ),
            (
                WorkType::CharitableLimited,
                "1- The work must fall within the activity the entity was established for. 2- The entity must carry out the work itself.",
                vec![],
            ),
            (
                WorkType::ExclusiveWork,
                "1- No alternative can be obtained from other sources (Article 46). 2- Securing the goods or purchases is a necessity. 3- The exclusivity letter must be stamped by the chamber of commerce; if more than one company responds to the announcement, the holder is given one week to submit the letter.",
                vec![46],
            ),
            (
                WorkType::EmergencyCases,
                "1- There is a threat to public safety, health or property, or of losses (Article 48). 2- General or limited competition cannot be used because its procedures take too long.",
                vec![48],
            ),
            (
                WorkType::CharitableDirect,
                "1- The work must fall within the activity the entity was established for (Article 47). 2- No other party provides the required work or purchases.",
                vec![47],
            ),
            (
                WorkType::NationalSecurity,
                "1- General or limited competition cannot be used. Prepare a report stating the reasons for using this method and send it to the audit bureau.",
                vec![],
            ),
            (
                WorkType::UndefinedQuantities,
                "1- Used when quantities, items or execution dates cannot be determined. 2- Used when the need recurs or future purchases are expected. When tendering, state: the agreement type (closed or open), the number of parties, the expected quantities, the payment method, prices for the agreement term and the agreement duration. A closed agreement may not exceed 3 years and an open agreement 4 years.",
                vec![],
            ),
            (
                WorkType::UndefinedSpecs,
                "The first stage is announced on the portal under general competition procedures and initial offers are submitted without prices (indicative prices may be requested). Qualifying offers are announced on the portal; in the second stage the entity prepares the competition documents and evaluation criteria and invites the qualifying bidders under general competition procedures.",
                vec![],
            ),
            (
                WorkType::CompetitiveGoods,
                "1- Set a start and end time for the reverse auction. 2- The auction is limited to ready goods available in the market.",
                vec![],
            ),
        ]
        .into_iter()
        .map(|(work_type, text, referenced_articles)| {
            (
                work_type,
                ImplementationGuidelines {
                    text: text.to_string(),
                    referenced_articles,
                },
            )
        })
        .collect();

        Self {
            by_work_type,
            general_direct_tier: Some(ImplementationGuidelines {
                text: "One or more suppliers may be invited.".to_string(),
                referenced_articles: Vec::new(),
            }),
            general_limited_tier: Some(ImplementationGuidelines {
                text: "If offers exceed 500,000 and are not reduced, cancel and issue a general competition.".to_string(),
                referenced_articles: Vec::new(),
            }),
        }
    }
}
