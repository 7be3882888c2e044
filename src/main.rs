use std::path::Path;
use std::process::ExitCode;

use chrono::Utc;
use serde_json::json;

use learnpath_engine::adaptive::ResultTier;
use learnpath_engine::config::Config;
use learnpath_engine::logging::init_tracing;
use learnpath_engine::services::{ProfileService, Quiz, QuizSession};
use learnpath_engine::store::JsonFileProfileStore;

const USAGE: &str = "usage:
  learnpath users
  learnpath report <user_id> [subject]
  learnpath record <user_id> <quiz.json> <answer|-> ...   (\"-\" lets the question time out)";

/// Placeholder answer that makes a question time out instead of being submitted.
const TIMEOUT_ANSWER: &str = "-";

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    let store = match JsonFileProfileStore::open(&config.profile_dir) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(error = %err, dir = %config.profile_dir.display(), "cannot open profile store");
            return ExitCode::FAILURE;
        }
    };
    let service = ProfileService::new(store);

    let result = match (command.as_str(), &args[1..]) {
        ("users", []) => users(service.store()),
        ("report", [user_id]) => report(&service, user_id, None),
        ("report", [user_id, subject]) => report(&service, user_id, Some(subject)),
        ("record", [user_id, quiz_path, answers @ ..]) => {
            record(&service, &config, user_id, Path::new(quiz_path), answers)
        }
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

type CommandResult = Result<String, Box<dyn std::error::Error>>;

fn users(store: &JsonFileProfileStore) -> CommandResult {
    Ok(serde_json::to_string_pretty(&store.user_ids()?)?)
}

fn report(
    service: &ProfileService<JsonFileProfileStore>,
    user_id: &str,
    subject: Option<&String>,
) -> CommandResult {
    let body = match subject {
        Some(subject) => match service.subject_report(user_id, subject)? {
            Some(report) => serde_json::to_value(report)?,
            None => json!({ "milestones": [] }),
        },
        None => serde_json::to_value(service.all_reports(user_id)?)?,
    };
    Ok(serde_json::to_string_pretty(&body)?)
}

fn record(
    service: &ProfileService<JsonFileProfileStore>,
    config: &Config,
    user_id: &str,
    quiz_path: &Path,
    answers: &[String],
) -> CommandResult {
    let quiz: Quiz = serde_json::from_str(&std::fs::read_to_string(quiz_path)?)?;
    let mut session = QuizSession::start(quiz, config.question_time_limit)?;
    tracing::debug!(
        session_id = %session.id(),
        time_limit_secs = session.question_time_limit().as_secs(),
        answers = answers.len(),
        "replaying answers"
    );

    for answer in answers {
        if session.is_completed() {
            break;
        }
        if answer == TIMEOUT_ANSWER {
            session.time_out()?;
        } else {
            session.select_answer(answer)?;
            session.submit()?;
        }
    }
    while !session.is_completed() {
        session.time_out()?;
    }

    let attempt = session.finish(Utc::now())?;
    let tier = ResultTier::from_percentage(attempt.percentage_score());
    let percentage = attempt.percentage_score();
    let update = service.record_quiz_attempt(user_id, attempt)?;

    let body = json!({
        "percentageScore": percentage,
        "result": tier,
        "message": tier.message(),
        "notice": update.notice(),
        "update": update,
    });
    Ok(serde_json::to_string_pretty(&body)?)
}
