//! FitPulse - command-line front end
//!
//! Runs the health calculators, browses the calorie index and event feed,
//! and plays a scripted session against the store and toast queue.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fitpulse::calculators::{energy_report, ActivityLevel, BodyProfile, Sex};
use fitpulse::catalog::{
    default_challenges, default_events, default_foods, group_by_category, search_foods,
    CalorieBand, FoodCategory,
};
use fitpulse::config::{self, AppConfig};
use fitpulse::{FitPulseApp, Severity, StoreEvent, ToastEvent};

/// FitPulse - fitness tracker state core
#[derive(Parser, Debug)]
#[command(name = "fitpulse")]
#[command(about = "Water, calories, events and challenges from the command line")]
struct Args {
    /// Path to a config.toml (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Basal metabolic rate and daily energy needs
    Bmr {
        /// Weight in kg
        #[arg(long, default_value = "70")]
        weight: f64,
        /// Height in cm
        #[arg(long, default_value = "175")]
        height: f64,
        /// Age in years
        #[arg(long, default_value = "28")]
        age: f64,
        /// male or female
        #[arg(long, default_value = "male")]
        sex: Sex,
        /// sedentary, light, moderate, very or extra
        #[arg(long, default_value = "moderate")]
        activity: ActivityLevel,
    },
    /// Search the calorie index
    Foods {
        /// Text to match against either food name
        #[arg(short, long, default_value = "")]
        search: String,
        /// Restrict to one category
        #[arg(long)]
        category: Option<FoodCategory>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List events and challenges
    Events,
    /// Play a scripted session and print store and toast events
    Demo,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::load_or_default(args.config.as_deref())?;

    match args.command {
        Command::Bmr {
            weight,
            height,
            age,
            sex,
            activity,
        } => run_bmr(
            &BodyProfile {
                weight_kg: weight,
                height_cm: height,
                age_years: age,
                sex,
            },
            activity,
        ),
        Command::Foods {
            search,
            category,
            json,
        } => run_foods(&config, &search, category, json),
        Command::Events => {
            run_events();
            Ok(())
        }
        Command::Demo => run_demo(config),
    }
}

fn run_bmr(profile: &BodyProfile, activity: ActivityLevel) -> Result<()> {
    let report = energy_report(profile, activity)?;

    println!("BMR:            {} kcal/day", report.bmr);
    println!("TDEE ({activity}): {} kcal/day", report.tdee);
    println!("  Lose weight:  {} kcal", report.targets.lose_weight);
    println!("  Maintain:     {} kcal", report.targets.maintain);
    println!("  Gain muscle:  {} kcal", report.targets.gain_muscle);
    Ok(())
}

fn run_foods(
    config: &AppConfig,
    search: &str,
    category: Option<FoodCategory>,
    json: bool,
) -> Result<()> {
    let foods = default_foods();
    let matches = search_foods(&foods, search, category);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No foods match `{search}`");
        return Ok(());
    }

    for (category, items) in group_by_category(&matches) {
        println!("{category}");
        for food in items {
            println!(
                "  {:<16} {:>4} kcal  {:<9} {}",
                food.display_name(config.general.locale),
                food.kcal,
                food.portion,
                CalorieBand::for_kcal(food.kcal).color()
            );
        }
    }
    Ok(())
}

fn run_events() {
    println!("Events");
    for event in default_events() {
        println!(
            "  [{}] {} - {} ({}), {} spots left",
            event.id,
            event.title,
            event.location,
            event.date,
            event.spots_left(false)
        );
    }

    println!("Challenges");
    for challenge in default_challenges() {
        println!(
            "  {} - {}% complete, {} days left",
            challenge.title,
            challenge.percent_complete(),
            challenge.days_left
        );
    }
}

fn run_demo(config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let app = FitPulseApp::new(config)?;
        let store_events = app.store().write().subscribe();
        let toast_events = app.toasts().subscribe();

        info!("Starting demo session");

        let foods = default_foods();
        let events = default_events();
        let challenges = default_challenges();

        for amount in app.quick_add_amounts().to_vec() {
            app.add_water(amount);
        }
        app.log_food(&foods[0]);
        app.log_food(&foods[1]);
        app.toggle_event(&events[0]);
        app.join_challenge(&challenges[0]);
        app.join_challenge(&challenges[0]);
        app.announce("Full exercise library coming soon", Severity::ComingSoon);

        for event in store_events.try_iter() {
            print_store_event(&event);
        }

        {
            let store = app.store();
            let store = store.read();
            let water = store.water();
            println!(
                "water: {}/{} ml ({:.0}%), {} ml remaining",
                water.intake_ml(),
                water.goal_ml(),
                water.fill_percent(),
                water.remaining_ml()
            );
            println!(
                "calories: {} kcal over {} entries",
                store.total_calories(),
                store.calorie_log().len()
            );
        }

        // Let every toast run its course
        let linger = app.toasts().timing().total() + Duration::from_millis(100);
        tokio::time::sleep(linger).await;

        for event in toast_events.try_iter() {
            print_toast_event(&event);
        }

        info!("Demo session finished");
        Ok::<(), anyhow::Error>(())
    })
}

fn print_store_event(event: &StoreEvent) {
    println!(
        "store: {:?} -> intake {} ml, {} kcal logged, {} events, {} challenges",
        event.change,
        event.snapshot.water.intake_ml(),
        event.snapshot.total_calories(),
        event.snapshot.joined_events.len(),
        event.snapshot.joined_challenges.len()
    );
}

fn print_toast_event(event: &ToastEvent) {
    match event {
        ToastEvent::Shown(toast) => {
            println!("toast {} [{}] {}", toast.id, toast.severity, toast.message)
        }
        ToastEvent::PhaseChanged { id, phase } => println!("toast {id} -> {phase:?}"),
        ToastEvent::Removed(id) => println!("toast {id} removed"),
    }
}
