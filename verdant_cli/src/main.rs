use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use verdant_core::*;

#[derive(Parser)]
#[command(name = "verdant")]
#[command(about = "Plant care scheduling and consistency tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD) or RFC 3339 timestamp
    #[arg(long, global = true)]
    now: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a free-form schedule description
    Schedule {
        /// Description, e.g. "2 weeks", "every 10 days", "seasonal"
        text: String,

        /// Care type the schedule applies to
        #[arg(long, default_value = "fertilizer")]
        care_type: String,
    },

    /// Compute the next due date from a last care date
    Due {
        /// Last care date (YYYY-MM-DD)
        #[arg(long)]
        last: String,

        /// Schedule description
        #[arg(long, default_value = "monthly")]
        schedule: String,
    },

    /// Due-date status for a plant file
    Status(PlantArgs),

    /// Care statistics for a plant file
    Stats(PlantArgs),

    /// Recommended care actions for a plant file
    Recommend(PlantArgs),

    /// Reminder date and grace-period check for a due date
    Remind {
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// Days before the due date to remind (defaults to config)
        #[arg(long)]
        days_before: Option<u32>,

        /// Grace period in days before the care counts as late
        #[arg(long, default_value_t = 0)]
        grace: u32,
    },
}

#[derive(clap::Args)]
struct PlantArgs {
    /// Plant file (JSON with "profile" and "history")
    plant: PathBuf,

    /// Extra care events from a CSV log (date,care_type)
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        verdant_core::logging::init_with_level("debug");
    } else {
        verdant_core::logging::init();
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // The only wall-clock read; every calculation below shares this instant.
    let now = match cli.now {
        Some(ref value) => FixedClock::parse(value)?.now(),
        None => SystemClock.now(),
    };

    match cli.command {
        Commands::Schedule { text, care_type } => cmd_schedule(&text, &care_type, cli.json),
        Commands::Due { last, schedule } => cmd_due(&last, &schedule, now, &config, cli.json),
        Commands::Status(args) => cmd_status(&args, now, &config, cli.json),
        Commands::Stats(args) => cmd_stats(&args, now, &config, cli.json),
        Commands::Recommend(args) => cmd_recommend(&args, now, &config, cli.json),
        Commands::Remind {
            due,
            days_before,
            grace,
        } => cmd_remind(
            &due,
            days_before.unwrap_or(config.reminders.days_before),
            grace,
            now,
            cli.json,
        ),
    }
}

fn cmd_schedule(text: &str, care_type: &str, json: bool) -> Result<()> {
    let care_type: CareType = care_type.parse()?;
    let schedule = resolve_schedule(text).with_care_type(care_type);

    if json {
        return print_json(&schedule);
    }

    println!("Schedule: {}", schedule);
    println!("  Frequency: {:?}", schedule.frequency());
    println!("  Interval:  {}", schedule.interval());
    if let Some(days) = schedule.custom_days() {
        println!("  Custom days: {}", days);
    }
    println!("  Care type: {}", schedule.care_type());
    println!("  Nominal interval: {} days", schedule.interval_days());
    Ok(())
}

fn cmd_due(last: &str, schedule: &str, now: DateTime<Utc>, config: &Config, json: bool) -> Result<()> {
    let last = parse_date(last)?;
    let schedule = resolve_schedule(schedule);
    let calc = compute_schedule(Some(last), &schedule, now, config.policy.urgency_policy);

    if json {
        return print_json(&calc);
    }

    display_calculation(&schedule, &calc);
    Ok(())
}

fn cmd_status(args: &PlantArgs, now: DateTime<Utc>, config: &Config, json: bool) -> Result<()> {
    let plant = load_plant(args)?;
    let schedule = &plant.profile.schedule;
    let calc = compute_schedule(
        plant.profile.last_care_date,
        schedule,
        now,
        config.policy.urgency_policy,
    );

    if json {
        return print_json(&calc);
    }

    display_calculation(schedule, &calc);
    if needs_immediate_attention(calc.urgency) {
        println!();
        println!("  ! Needs attention now");
    }
    Ok(())
}

fn cmd_stats(args: &PlantArgs, now: DateTime<Utc>, config: &Config, json: bool) -> Result<()> {
    let plant = load_plant(args)?;
    let stats =
        calculate_plant_care_statistics(&plant.profile, &plant.history, now, &config.care_policy());

    if json {
        return print_json(&stats);
    }

    println!("Care statistics ({})", plant.profile.schedule.care_type());
    println!("  Total care events: {}", stats.total_care_events);
    match stats.last_care_date {
        Some(date) => println!("  Last care: {}", date),
        None => println!("  Last care: never"),
    }
    println!("  Average days between care: {:.1}", stats.average_care_days);
    println!("  Longest gap: {} days", stats.longest_care_gap_days);
    println!("  Consistency score: {}/100", stats.care_consistency_score);
    println!("  Current streak: {}", stats.current_care_streak);
    if !stats.care_type_breakdown.is_empty() {
        println!("  Breakdown:");
        for (care_type, count) in &stats.care_type_breakdown {
            println!("    {:<11} {}", care_type.as_str(), count);
        }
    }
    Ok(())
}

fn cmd_recommend(args: &PlantArgs, now: DateTime<Utc>, config: &Config, json: bool) -> Result<()> {
    let plant = load_plant(args)?;
    let recommendations =
        recommended_care_actions(&plant.profile, &plant.history, now, &config.care_policy());

    if json {
        return print_json(&recommendations);
    }

    if recommendations.is_empty() {
        println!("✓ Nothing to do right now");
        return Ok(());
    }

    for recommendation in &recommendations {
        println!("  → [{}] {}", recommendation.urgency, recommendation);
    }
    Ok(())
}

fn cmd_remind(due: &str, days_before: u32, grace: u32, now: DateTime<Utc>, json: bool) -> Result<()> {
    let due = Some(parse_date(due)?);
    let reminder = next_reminder_date(due, days_before);
    let overdue = is_overdue_with_grace_period(due, grace, now);

    if json {
        return print_json(&serde_json::json!({
            "reminder_date": reminder,
            "overdue_with_grace": overdue,
        }));
    }

    match reminder {
        Some(date) => println!("Remind on: {}", date),
        None => println!("Remind on: -"),
    }
    println!(
        "Overdue (grace {} days): {}",
        grace,
        if overdue { "yes" } else { "no" }
    );
    Ok(())
}

fn load_plant(args: &PlantArgs) -> Result<PlantFile> {
    let mut plant = load_plant_file(&args.plant)?;
    if let Some(ref csv_path) = args.history {
        let extra = load_care_history_csv(csv_path)?;
        tracing::debug!("Merging {} events from {:?}", extra.len(), csv_path);
        plant.history.extend(extra);
    }
    // Every command sees the same last care date.
    plant.fill_last_care_date();
    Ok(plant)
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidDate(format!("{}: {}", value, e)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn display_calculation(schedule: &Schedule, calc: &DueDateCalculation) {
    println!("{} every {} days", schedule.care_type().activity(), calc.days_between_care);
    match calc.next_due_date {
        Some(date) => println!("  Next due: {}", date),
        None => println!("  Next due: unknown (no care logged)"),
    }
    println!("  Status:   {}", calc.status);
    println!("  Urgency:  {}", calc.urgency);
    if calc.is_overdue {
        println!("  Overdue by {} days", calc.days_overdue);
    }
}
