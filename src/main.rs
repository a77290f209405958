mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use carecal_core::{EventKind, Frequency, Relationship};

#[derive(Parser)]
#[command(name = "carecal")]
#[command(about = "Keep track of appointments and medication reminders for the people you care for")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a one-off event (appointment, medical visit, ...)
    Add {
        title: String,

        /// Day of the event (e.g. "2025-03-20", "tomorrow", "next friday")
        #[arg(short, long)]
        date: String,

        /// Time of day, 24-hour HH:MM
        #[arg(short, long)]
        time: String,

        /// appointment, medical or medication
        #[arg(short, long, default_value = "appointment")]
        kind: EventKind,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Who the event is for (profile name or id)
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Add a recurring medication reminder
    Medication {
        title: String,

        /// First day of the schedule (defaults to today)
        #[arg(short, long)]
        start: Option<String>,

        /// How long to keep reminding, in days ("14") or as a duration ("2weeks")
        #[arg(long = "for", default_value = "1")]
        duration: String,

        /// Reminder times, comma separated (e.g. "08:00,20:00"), up to 4
        #[arg(short, long)]
        times: String,

        #[arg(short, long, default_value = "daily")]
        frequency: Frequency,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Who the medication is for (profile name or id)
        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Change an event. Editing one occurrence of a medication schedule
    /// regenerates the whole schedule unless --only-this is given
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        time: Option<String>,

        #[arg(short, long)]
        kind: Option<EventKind>,

        /// New location ("" clears it)
        #[arg(short, long)]
        location: Option<String>,

        /// New description ("" clears it)
        #[arg(long)]
        description: Option<String>,

        /// Profile name or id ("none" unassigns)
        #[arg(short, long)]
        profile: Option<String>,

        /// New first day of a medication schedule
        #[arg(short, long)]
        start: Option<String>,

        /// New schedule length ("14", "2weeks")
        #[arg(long = "for")]
        duration: Option<String>,

        /// New reminder times; on a one-off event this turns it into a medication schedule
        #[arg(long)]
        times: Option<String>,

        #[arg(short, long)]
        frequency: Option<Frequency>,

        /// Only change this occurrence, detaching it from its schedule
        #[arg(long)]
        only_this: bool,
    },
    /// Show the events on one day
    Day {
        /// Day to show (defaults to today)
        date: Option<String>,

        /// Only show events for this profile ("all" for everyone)
        #[arg(short, long)]
        profile: Option<String>,

        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what's coming up next
    Upcoming {
        /// Maximum number of events (defaults to upcoming_limit from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[arg(short, long)]
        profile: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Show which days of a month have events
    Month {
        /// Month to show as YYYY-MM (defaults to the current month)
        month: Option<String>,

        #[arg(short, long)]
        profile: Option<String>,
    },
    /// Delete an event, or a whole medication schedule
    Delete {
        id: String,

        /// Delete every occurrence of the medication schedule this event belongs to
        #[arg(long)]
        series: bool,

        /// Don't ask for confirmation
        #[arg(long)]
        force: bool,
    },
    /// Manage the people you care for
    Profiles {
        #[command(subcommand)]
        command: Option<ProfileCommands>,
    },
    /// Show configuration paths and values
    Config,
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List care profiles
    List,
    /// Add a care profile
    Add {
        name: String,

        #[arg(short, long)]
        relationship: Option<Relationship>,

        /// Birth date (YYYY-MM-DD)
        #[arg(short, long)]
        birth_date: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Remove a care profile (their events are kept)
    Remove {
        /// Profile name or id
        profile: String,

        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Add {
            title,
            date,
            time,
            kind,
            location,
            description,
            profile,
        } => commands::add::run(commands::add::AddArgs {
            title,
            date,
            time,
            kind,
            location,
            description,
            profile,
        }),
        Commands::Medication {
            title,
            start,
            duration,
            times,
            frequency,
            location,
            description,
            profile,
        } => commands::medication::run(commands::medication::MedicationArgs {
            title,
            start,
            duration,
            times,
            frequency,
            location,
            description,
            profile,
        }),
        Commands::Edit {
            id,
            title,
            date,
            time,
            kind,
            location,
            description,
            profile,
            start,
            duration,
            times,
            frequency,
            only_this,
        } => commands::edit::run(
            &id,
            commands::edit::EditArgs {
                title,
                date,
                time,
                kind,
                location,
                description,
                profile,
                start,
                duration,
                times,
                frequency,
                only_this,
            },
        ),
        Commands::Day {
            date,
            profile,
            json,
        } => commands::day::run(date.as_deref(), profile.as_deref(), json),
        Commands::Upcoming {
            limit,
            profile,
            json,
        } => commands::upcoming::run(limit, profile.as_deref(), json),
        Commands::Month { month, profile } => {
            commands::month::run(month.as_deref(), profile.as_deref())
        }
        Commands::Delete { id, series, force } => commands::delete::run(&id, series, force),
        Commands::Profiles { command } => match command.unwrap_or(ProfileCommands::List) {
            ProfileCommands::List => commands::profiles::list(),
            ProfileCommands::Add {
                name,
                relationship,
                birth_date,
                notes,
            } => commands::profiles::add(name, relationship, birth_date.as_deref(), notes),
            ProfileCommands::Remove { profile, force } => {
                commands::profiles::remove(&profile, force)
            }
        },
        Commands::Config => commands::config::run(),
    }
}

/// Log to stderr so command output stays clean. `RUST_LOG` wins unless -v is given.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
