use lingo_services::{Clock, LessonService, ServiceConfig, ServiceError};
use lingo_storage::InMemoryRepository;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod render;

use config::{Args, Command, ProcessEnv, Settings, print_usage};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lingo_services=info,lingo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_service(settings: &Settings) -> Result<LessonService, ServiceError> {
    let clock = settings.today.map_or_else(Clock::default_clock, Clock::fixed_date);
    let mut config = ServiceConfig::default();
    if let Some(goal) = settings.daily_goal {
        config.daily_goal = goal;
    }

    let service = match &settings.catalog {
        Some(path) => {
            let repo = InMemoryRepository::from_json_file(path)?;
            tracing::info!(path = %path.display(), lessons = repo.len(), "catalog loaded");
            LessonService::new(clock, Box::new(repo), config)
        }
        None => LessonService::with_seed_catalog(clock, config),
    };
    tracing::debug!(fixed_clock = clock.is_fixed(), today = %clock.today(), "service ready");
    Ok(service)
}

fn print_json(value: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), &ProcessEnv).inspect_err(|_| print_usage())?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    init_tracing();
    let mut service = build_service(&args.settings)?;
    let json = args.settings.json;

    match args.command {
        Command::Lessons => {
            if json {
                print_json(&service.list_lessons())?;
            } else {
                print!("{}", render::lessons(service.list_lessons()));
            }
        }
        Command::Lesson { id } => match service.get_lesson(&id) {
            Some(lesson) if json => print_json(lesson)?,
            Some(lesson) => print!("{}", render::lesson(lesson)),
            None if json => print_json(&serde_json::Value::Null)?,
            None => print!("{}", render::not_found(&id)),
        },
        Command::Study { id, answers } => {
            print!("{}", commands::study(&mut service, &id, &answers, json)?);
        }
        Command::Progress => {
            let overview = service.overview();
            if json {
                print_json(&overview)?;
            } else {
                print!("{}", render::overview(&overview));
            }
        }
        Command::Help => {}
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
