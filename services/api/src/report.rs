use tender_mapping::workflows::matching::{Selections, TenderMappingResult};
use tender_mapping::workflows::procurement::domain::DayCount;
use tender_mapping::workflows::procurement::{
    ProcurementInput, ProcurementResult, RequirementValue, ScheduledStage, WorkType,
};

pub(crate) fn render_timeline(input: &ProcurementInput, result: &ProcurementResult) {
    let requirements = &result.requirements;

    println!(
        "Procurement plan: {} | budget {:.2} | {} months",
        input.work_type().label(),
        input.budget(),
        input.project_duration_months()
    );
    println!("- Method: {}", result.procurement_method.label());
    println!(
        "- Announcement: {} | review: {}",
        in_days(&requirements.announcement_period),
        in_days(&requirements.review_period)
    );
    println!(
        "- Participants: {} | SME: {}",
        requirements.required_participants, requirements.sme_priority
    );
    println!(
        "- Guarantees: performance {} | initial {} | final {}",
        requirements.performance_guarantee,
        requirements.initial_guarantee,
        requirements.final_guarantee
    );
    println!("- File structure: {}", requirements.file_structure);

    println!("\nStages");
    for stage in &result.stages {
        println!("  - {}", stage_line(stage));
    }
    println!("Total duration: {} days", result.total_duration_days);

    println!("\nGuidelines");
    println!("  {}", result.guidelines.text);
    if !result.guidelines.referenced_articles.is_empty() {
        let articles: Vec<String> = result
            .guidelines
            .referenced_articles
            .iter()
            .map(u32::to_string)
            .collect();
        println!("  Articles: {}", articles.join(", "));
    }
}

pub(crate) fn render_mapping(selections: &Selections, result: &TenderMappingResult) {
    println!("Selections");
    for (category, value) in selections {
        println!("  - {category}: {value}");
    }

    println!(
        "\nMatched: {} (confidence {:.0}%)",
        result.matched_tender_type.name,
        result.confidence_score * 100.0
    );
    println!("  {}", result.message);
    if let Some(description) = &result.matched_tender_type.description {
        println!("  {description}");
    }
    for attribute in &result.matched_tender_type.attributes {
        println!("    {}: {}", attribute.name, attribute.value);
    }

    if !result.alternative_types.is_empty() {
        println!("Alternatives");
        for alternative in &result.alternative_types {
            println!("  - {}", alternative.name);
        }
    }
}

pub(crate) fn render_work_types() {
    for work_type in WorkType::ordered() {
        println!(
            "{:<22} {} ({})",
            work_type.id(),
            work_type.label(),
            work_type.arabic_label()
        );
    }
}

/// Day figures get a unit; descriptive phrases print as-is.
fn in_days(value: &RequirementValue) -> String {
    match value {
        RequirementValue::Numeric(days) => format!("{days} days"),
        RequirementValue::Descriptive(text) => text.clone(),
    }
}

fn stage_line(stage: &ScheduledStage) -> String {
    let unit = match stage.unit {
        DayCount::Working => "working",
        DayCount::Calendar => "calendar",
    };
    let line = format!(
        "{}: {} -> {} ({} {} days)",
        stage.name, stage.start_date, stage.end_date, stage.duration, unit
    );

    match &stage.note {
        Some(note) => format!("{line} [{note}]"),
        None => line,
    }
}
