//! Depot CLI - job cards and FRACAS reliability reports.

mod config;

use std::path::PathBuf;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use depot_core::{
    DelayDuration, FailureCategory, JobCard, JobCardFilter, JobCardId, JobCardStatus,
    MaintenanceType,
};
use depot_storage::{sample_job_cards, JobCardStore, JsonStorage, MemoryStorage};
use depot_reliability::{JobCardStatistics, ReliabilityReport, ReliabilityReporter};
use config::DepotConfig;

#[derive(Parser)]
#[command(name = "depot")]
#[command(about = "Depot job cards and FRACAS reliability reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Storage path for depot data
    #[arg(short, long, default_value = ".depot", global = true)]
    storage: PathBuf,

    /// Use an in-memory store filled with sample data instead of files
    #[arg(long, global = true)]
    memory: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new job card
    Add {
        /// Job card number
        job_card_no: String,
        /// Train number
        #[arg(long)]
        train: String,
        /// Car number
        #[arg(long)]
        car: String,
        /// Subsystem name
        #[arg(long)]
        system: String,
        /// Maintenance type (CM, PM, OPM)
        #[arg(long = "type", default_value = "CM")]
        maintenance_type: MaintenanceType,
        /// FRACAS reference
        #[arg(long)]
        fracas_id: Option<String>,
        /// Failure category, e.g. "Software Error"
        #[arg(long)]
        category: Option<FailureCategory>,
        /// Train was withdrawn from service
        #[arg(long)]
        withdraw: bool,
        /// Service delay, as a label or minutes
        #[arg(long)]
        delay: Option<DelayDuration>,
        /// Crew headcount
        #[arg(long)]
        crew: Option<u32>,
        /// Fault description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List job cards
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<JobCardStatus>,
        /// Filter by train number
        #[arg(long)]
        train: Option<String>,
        /// Filter by subsystem
        #[arg(long)]
        system: Option<String>,
    },
    /// Show job card details
    Show {
        /// Job card ID
        id: String,
    },
    /// Start repair work
    Start {
        /// Job card ID
        id: String,
    },
    /// Finish repair work
    Complete {
        /// Job card ID
        id: String,
        /// Repair duration in hours
        #[arg(long)]
        hours: f64,
        /// Corrective action taken
        #[arg(long)]
        action: Option<String>,
    },
    /// Close a job card
    Close {
        /// Job card ID
        id: String,
    },
    /// Store generated sample job cards
    Seed {
        /// Number of cards
        #[arg(long, default_value = "50")]
        count: usize,
    },
    /// Job card statistics, MTTR and MDBF
    Stats(ReportArgs),
    /// Failures per subsystem
    Systems(ReportArgs),
    /// Failures per category
    Categories(ReportArgs),
    /// Fleet availability
    Availability(ReportArgs),
    /// Full reliability report
    Report {
        #[command(flatten)]
        args: ReportArgs,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone)]
struct ReportArgs {
    /// Fleet kilometers for the period
    #[arg(long)]
    km: Option<f64>,
    /// Possible service hours for the period
    #[arg(long)]
    service_hours: Option<f64>,
    /// Only cards for this train
    #[arg(long)]
    train: Option<String>,
    /// Only cards for this subsystem
    #[arg(long)]
    system: Option<String>,
    /// Only cards reported at or after this time (RFC 3339)
    #[arg(long)]
    from: Option<DateTime<Utc>>,
    /// Only cards reported at or before this time (RFC 3339)
    #[arg(long)]
    to: Option<DateTime<Utc>>,
}

impl ReportArgs {
    fn filter(&self) -> JobCardFilter {
        JobCardFilter {
            train_no: self.train.clone(),
            system: self.system.clone(),
            reported_from: self.from,
            reported_to: self.to,
            ..Default::default()
        }
    }
}

fn init_logging(config: &DepotConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DepotConfig::load(&cli.storage)?;
    init_logging(&config);

    if cli.memory {
        let cards = sample_job_cards(config.sample_size, Utc::now());
        info!("Using in-memory store with {} sample job cards", cards.len());
        execute(MemoryStorage::with_cards(cards), cli.command, &config).await
    } else {
        let storage = JsonStorage::new(&cli.storage).await?;
        execute(storage, cli.command, &config).await
    }
}

async fn execute<S: JobCardStore>(mut storage: S, command: Commands, config: &DepotConfig) -> Result<()> {
    match command {
        Commands::Add {
            job_card_no,
            train,
            car,
            system,
            maintenance_type,
            fracas_id,
            category,
            withdraw,
            delay,
            crew,
            description,
        } => {
            let mut card = JobCard::new(job_card_no, train, car, system, maintenance_type)
                .with_description(description);
            if let Some(fracas_id) = fracas_id {
                card = card.with_fracas_id(fracas_id);
            }
            if let Some(category) = category {
                card = card.with_category(category);
            }
            if withdraw {
                card = card.with_withdraw();
            }
            if let Some(delay) = delay {
                card = card.with_delay(delay);
            }
            if let Some(crew) = crew {
                card = card.with_crew(crew);
            }
            card.validate()?;
            storage.save_job_card(&card).await?;
            println!("Added job card: {} - {}", card.id, card.job_card_no);
        }
        Commands::List { status, train, system } => {
            let filter = JobCardFilter {
                status: status.map(|s| vec![s]),
                train_no: train,
                system,
                ..Default::default()
            };
            let cards = storage.list_job_cards(&filter).await?;

            println!("Job cards ({})", cards.len());
            for card in cards {
                println!(
                    "  {} | {} | {:<11} | {} | {}/{} | {}",
                    card.id,
                    card.job_card_no,
                    card.status,
                    card.maintenance_type,
                    card.train_no,
                    card.car_no,
                    card.system,
                );
            }
        }
        Commands::Show { id } => {
            let Some(card) = storage.load_job_card(parse_id(&id)?).await? else {
                println!("Job card not found");
                return Ok(());
            };
            print_card(&card);
        }
        Commands::Start { id } => {
            update(&mut storage, &id, |card| card.start()).await?;
        }
        Commands::Complete { id, hours, action } => {
            update(&mut storage, &id, |card| card.complete(hours, action)).await?;
        }
        Commands::Close { id } => {
            update(&mut storage, &id, |card| card.close()).await?;
        }
        Commands::Seed { count } => {
            let cards = sample_job_cards(count, Utc::now());
            for card in &cards {
                storage.save_job_card(card).await?;
            }
            println!("Stored {} sample job cards", cards.len());
        }
        Commands::Stats(args) => {
            let reporter = reporter(storage, config, &args)?;
            let stats = reporter.statistics(&args.filter()).await?;
            print_statistics(&stats);
        }
        Commands::Systems(args) => {
            let reporter = reporter(storage, config, &args)?;
            let systems = reporter.system_breakdown(&args.filter()).await?;
            println!("Failures by system ({})", systems.len());
            for s in systems {
                println!("  {:<20} {:>5} cards {:>5} service failures", s.system, s.count, s.service_failures);
            }
        }
        Commands::Categories(args) => {
            let reporter = reporter(storage, config, &args)?;
            let categories = reporter.category_breakdown(&args.filter()).await?;
            println!("Failures by category ({})", categories.len());
            for c in categories {
                println!("  {:<22} {:>5}", c.category, c.count);
            }
        }
        Commands::Availability(args) => {
            let reporter = reporter(storage, config, &args)?;
            let availability = reporter.availability(&args.filter()).await?;
            println!(
                "Availability: {:.2}% of {:.0} service hours",
                availability,
                reporter.fleet().total_possible_service_hours,
            );
        }
        Commands::Report { args, json } => {
            let reporter = reporter(storage, config, &args)?;
            let report = reporter.report(&args.filter()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
    }

    Ok(())
}

fn reporter<S: JobCardStore>(storage: S, config: &DepotConfig, args: &ReportArgs) -> Result<ReliabilityReporter<S>> {
    let fleet = config.fleet_context(args.km, args.service_hours)?;
    Ok(ReliabilityReporter::new(storage, fleet))
}

fn parse_id(id: &str) -> Result<JobCardId> {
    id.parse().map_err(|_| anyhow::anyhow!("Invalid job card ID: {}", id))
}

async fn update<S, F>(storage: &mut S, id: &str, apply: F) -> Result<()>
where
    S: JobCardStore,
    F: FnOnce(&mut JobCard) -> depot_core::Result<()>,
{
    let mut card = storage
        .load_job_card(parse_id(id)?)
        .await?
        .with_context(|| format!("Job card not found: {}", id))?;
    apply(&mut card)?;
    storage.save_job_card(&card).await?;
    println!("{} is now {}", card.job_card_no, card.status);
    Ok(())
}

fn print_card(card: &JobCard) {
    println!("Job card: {}", card.id);
    println!("  Number: {}", card.job_card_no);
    println!("  FRACAS: {}", card.fracas_id);
    println!("  Status: {}", card.status);
    println!("  Type: {}", card.maintenance_type);
    println!("  Train/Car: {}/{}", card.train_no, card.car_no);
    println!("  System: {}", card.system);
    if let Some(category) = card.failure_category {
        println!("  Category: {}", category);
    }
    println!("  Withdrawn: {}", card.withdraw);
    match card.delay_duration.filter(|_| card.delay) {
        Some(duration) => println!("  Delay: {}", duration),
        None => println!("  Delay: none"),
    }
    if let Some(hours) = card.duration_of_repair {
        println!("  Repair: {:.2} h", hours);
    }
    if let Some(men) = card.no_of_men {
        println!("  Crew: {}", men);
    }
    if !card.failure_description.is_empty() {
        println!("  Description: {}", card.failure_description);
    }
    if let Some(action) = &card.action_taken {
        println!("  Action: {}", action);
    }
    println!("  Reported: {}", card.reported_at);
}

fn print_statistics(stats: &JobCardStatistics) {
    println!("Job cards: {}", stats.total_cards);
    println!(
        "  open {} | in progress {} | completed {} | closed {}",
        stats.open, stats.in_progress, stats.completed, stats.closed,
    );
    println!("  CM {} | PM {} | OPM {}", stats.cm, stats.pm, stats.opm);
    println!("  Withdrawals: {}", stats.with_withdraw);
    println!("  Delays: {}", stats.with_delay);
    println!("  Service failures: {}", stats.service_failures);
    println!("  MTTR: {:.2} h", stats.mttr);
    // A zero MDBF means no failures were observed, not poor reliability.
    if stats.service_failures == 0 {
        println!("  MDBF: n/a (no service failures over {:.0} km)", stats.total_kilometers);
    } else {
        println!("  MDBF: {:.0} km (over {:.0} km)", stats.mdbf, stats.total_kilometers);
    }
}

fn print_report(report: &ReliabilityReport) {
    println!("Reliability report ({})", report.generated_at.format("%Y-%m-%d %H:%M UTC"));
    print_statistics(&report.statistics);
    println!(
        "  Availability: {:.2}% ({:.1} repair h of {:.0} service h)",
        report.availability, report.total_repair_hours, report.fleet.total_possible_service_hours,
    );
    println!("Systems:");
    for s in &report.systems {
        println!("  {:<20} {:>5} cards {:>5} service failures", s.system, s.count, s.service_failures);
    }
    println!("Categories:");
    for c in &report.categories {
        println!("  {:<22} {:>5}", c.category, c.count);
    }
}
