use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;
use lingo_core::model::LessonId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingLessonId { command: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDailyGoal { raw: String },
    InvalidToday { raw: String },
    InvalidLessonId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingLessonId { command } => write!(f, "{command} requires a lesson id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDailyGoal { raw } => write!(f, "invalid --daily-goal value: {raw}"),
            ArgsError::InvalidToday { raw } => {
                write!(f, "invalid --today value (expected YYYY-MM-DD): {raw}")
            }
            ArgsError::InvalidLessonId { raw } => write!(f, "invalid lesson id: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Lessons,
    Lesson { id: LessonId },
    Study { id: LessonId, answers: Vec<String> },
    Progress,
    Help,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub daily_goal: Option<u32>,
    pub today: Option<NaiveDate>,
    pub catalog: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub settings: Settings,
}

/// Environment lookups, split out so parsing can be tested without touching
/// the process environment.
pub trait Env {
    fn var(&self, key: &str) -> Option<String>;
}

pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  lingo lessons                         [options]");
    eprintln!("  lingo lesson <id>                     [options]");
    eprintln!("  lingo study <id> --answer <text>...   [options]  (one per exercise)");
    eprintln!("  lingo progress                        [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --daily-goal <xp>     daily XP target (default 50)");
    eprintln!("  --today <YYYY-MM-DD>  pin the clock to a calendar day");
    eprintln!("  --catalog <path>      load lessons from a JSON catalog");
    eprintln!("  --json                print JSON instead of text");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LINGO_DAILY_GOAL, LINGO_TODAY, LINGO_CATALOG, RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_daily_goal(raw: String) -> Result<u32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidDailyGoal { raw })
}

fn parse_today(raw: String) -> Result<NaiveDate, ArgsError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ArgsError::InvalidToday { raw })
}

fn parse_lesson_id(raw: String) -> Result<LessonId, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidLessonId { raw })
}

impl Args {
    /// Parse arguments (without the program name), with env vars as defaults.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags, missing values or invalid values,
    /// including invalid values coming from the environment.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env: &impl Env,
    ) -> Result<Self, ArgsError> {
        let mut settings = Settings {
            daily_goal: env.var("LINGO_DAILY_GOAL").map(parse_daily_goal).transpose()?,
            today: env.var("LINGO_TODAY").map(parse_today).transpose()?,
            catalog: env
                .var("LINGO_CATALOG")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            json: false,
        };

        let mut args = argv.into_iter();
        let mut positional: Vec<String> = Vec::new();
        let mut answers: Vec<String> = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--daily-goal" => {
                    settings.daily_goal =
                        Some(parse_daily_goal(require_value(&mut args, "--daily-goal")?)?);
                }
                "--today" => {
                    settings.today = Some(parse_today(require_value(&mut args, "--today")?)?);
                }
                "--catalog" => {
                    settings.catalog = Some(PathBuf::from(require_value(&mut args, "--catalog")?));
                }
                "--answer" | "-a" => answers.push(require_value(&mut args, "--answer")?),
                "--json" => settings.json = true,
                "--help" | "-h" => {
                    return Ok(Self {
                        command: Command::Help,
                        settings,
                    });
                }
                other if other.starts_with('-') => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        // No subcommand lists lessons, like opening the app on the lessons tab.
        let command = match positional.next().as_deref() {
            None | Some("lessons") => Command::Lessons,
            Some("progress") => Command::Progress,
            Some("lesson") => Command::Lesson {
                id: positional
                    .next()
                    .ok_or(ArgsError::MissingLessonId { command: "lesson" })
                    .and_then(parse_lesson_id)?,
            },
            Some("study") => Command::Study {
                id: positional
                    .next()
                    .ok_or(ArgsError::MissingLessonId { command: "study" })
                    .and_then(parse_lesson_id)?,
                answers,
            },
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        if let Some(extra) = positional.next() {
            return Err(ArgsError::UnknownArg(extra));
        }

        Ok(Self { command, settings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl Env for FakeEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| (*v).to_owned())
        }
    }

    fn no_env() -> FakeEnv {
        FakeEnv(HashMap::new())
    }

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| (*a).to_owned()).collect()
    }

    #[test]
    fn empty_args_list_lessons() {
        let args = Args::parse(argv(&[]), &no_env()).unwrap();
        assert_eq!(args.command, Command::Lessons);
        assert!(!args.settings.json);
        assert_eq!(args.settings.daily_goal, None);
    }

    #[test]
    fn study_collects_answers_in_order() {
        let args = Args::parse(
            argv(&["study", "1", "--answer", "Hola", "-a", "Buenos días", "--json"]),
            &no_env(),
        )
        .unwrap();
        assert_eq!(
            args.command,
            Command::Study {
                id: LessonId::new("1"),
                answers: vec!["Hola".into(), "Buenos días".into()],
            }
        );
        assert!(args.settings.json);
    }

    #[test]
    fn flags_override_environment() {
        let env = FakeEnv(HashMap::from([
            ("LINGO_DAILY_GOAL", "30"),
            ("LINGO_TODAY", "2024-01-02"),
        ]));
        let args = Args::parse(argv(&["progress", "--daily-goal", "80"]), &env).unwrap();
        assert_eq!(args.command, Command::Progress);
        assert_eq!(args.settings.daily_goal, Some(80));
        assert_eq!(args.settings.today, NaiveDate::from_ymd_opt(2024, 1, 2));
    }

    #[test]
    fn invalid_env_value_is_reported() {
        let env = FakeEnv(HashMap::from([("LINGO_DAILY_GOAL", "lots")]));
        let err = Args::parse(argv(&["progress"]), &env).unwrap_err();
        assert_eq!(err, ArgsError::InvalidDailyGoal { raw: "lots".into() });
    }

    #[test]
    fn lesson_requires_id() {
        let err = Args::parse(argv(&["lesson"]), &no_env()).unwrap_err();
        assert_eq!(err, ArgsError::MissingLessonId { command: "lesson" });
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = Args::parse(argv(&["--today", "31/12/2024"]), &no_env()).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidToday { .. }));
    }

    #[test]
    fn missing_flag_value_is_rejected() {
        let err = Args::parse(argv(&["lessons", "--catalog"]), &no_env()).unwrap_err();
        assert_eq!(err, ArgsError::MissingValue { flag: "--catalog" });
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        let err = Args::parse(argv(&["dance"]), &no_env()).unwrap_err();
        assert_eq!(err, ArgsError::UnknownCommand("dance".into()));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Args::parse(argv(&["--loud"]), &no_env()).unwrap_err();
        assert_eq!(err, ArgsError::UnknownArg("--loud".into()));
    }

    #[test]
    fn help_short_circuits() {
        let args = Args::parse(argv(&["study", "--help"]), &no_env()).unwrap();
        assert_eq!(args.command, Command::Help);
    }
}
