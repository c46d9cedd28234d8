use crate::infra::{build_engine, open_matching_service, parse_date, parse_selection};
use crate::report::{render_mapping, render_timeline, render_work_types};
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tender_mapping::config::AppConfig;
use tender_mapping::error::AppError;
use tender_mapping::workflows::matching::Selections;
use tender_mapping::workflows::procurement::{
    ProcurementError, ProcurementInput, ProcurementResultView, WorkType,
};

#[derive(Parser, Debug)]
#[command(
    name = "Tender Mapping Engine",
    about = "Plan procurement timelines and map tender selections from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify a procurement and print its dated stage timeline
    Calculate(CalculateArgs),
    /// Score category selections against the stored mapping rules
    Match(MatchArgs),
    /// List the supported work types
    WorkTypes,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct CalculateArgs {
    /// Work type id, English label or Arabic label
    #[arg(long)]
    pub(crate) work_type: WorkType,
    /// Estimated budget
    #[arg(long)]
    pub(crate) budget: f64,
    /// First day of the submission window (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_date: NaiveDate,
    /// Project duration in months
    #[arg(long)]
    pub(crate) duration: u32,
    /// Extra holiday (YYYY-MM-DD); repeat for several
    #[arg(long = "holiday", value_parser = parse_date)]
    pub(crate) holidays: Vec<NaiveDate>,
    /// Print the JSON response body instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Category selection as CATEGORY=VALUE; repeat for several
    #[arg(long = "select", value_parser = parse_selection, required = true)]
    pub(crate) selections: Vec<(String, String)>,
    /// Override the configured minimum score
    #[arg(long)]
    pub(crate) threshold: Option<f64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Calculate(args) => run_calculate(args),
        Command::Match(args) => run_match(args),
        Command::WorkTypes => {
            render_work_types();
            Ok(())
        }
    }
}

fn run_calculate(args: CalculateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = build_engine(&config.engine)?;

    let input = ProcurementInput::new(
        args.work_type,
        args.budget,
        args.start_date,
        args.duration,
        args.holidays,
    )
    .map_err(ProcurementError::from)?;
    let result = engine.calculate(&input)?;

    if args.json {
        let view = ProcurementResultView::from(&result);
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("JSON output unavailable: {err}"),
        }
    } else {
        render_timeline(&input, &result);
    }
    Ok(())
}

fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = open_matching_service(&config.engine)?;

    let selections: Selections = args.selections.into_iter().collect();
    let threshold = args.threshold.unwrap_or_else(|| service.threshold());
    let result = service.map_with_threshold(&selections, threshold);

    render_mapping(&selections, &result);
    Ok(())
}
