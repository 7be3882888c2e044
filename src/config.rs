use std::path::PathBuf;
use std::time::Duration;

use crate::services::quiz_session::DEFAULT_QUESTION_TIME_LIMIT;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Directory for the daily log file; `None` keeps logging on stderr only.
    pub file_log_dir: Option<PathBuf>,
    pub profile_dir: PathBuf,
    pub question_time_limit: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = var("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let file_log_dir = var("ENABLE_FILE_LOGS")
            .filter(|value| value == "true" || value == "1")
            .map(|_| {
                var("LOG_DIR")
                    .filter(|dir| !dir.trim().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("./logs"))
            });

        let profile_dir = var("PROFILE_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/profiles"));

        let question_time_limit = var("QUIZ_QUESTION_SECONDS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_QUESTION_TIME_LIMIT);

        Self {
            log_level,
            file_log_dir,
            profile_dir,
            question_time_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.log_level, "info");
        assert!(config.file_log_dir.is_none());
        assert_eq!(config.profile_dir, PathBuf::from("./data/profiles"));
        assert_eq!(config.question_time_limit, DEFAULT_QUESTION_TIME_LIMIT);
    }

    #[test]
    fn test_file_logs_need_explicit_enable() {
        let config = config_with(&[("LOG_DIR", "/var/log/learnpath")]);
        assert!(config.file_log_dir.is_none());

        let config = config_with(&[("ENABLE_FILE_LOGS", "1")]);
        assert_eq!(config.file_log_dir, Some(PathBuf::from("./logs")));

        let config = config_with(&[("ENABLE_FILE_LOGS", "true"), ("LOG_DIR", "/tmp/lp")]);
        assert_eq!(config.file_log_dir, Some(PathBuf::from("/tmp/lp")));

        let config = config_with(&[("ENABLE_FILE_LOGS", "yes")]);
        assert!(config.file_log_dir.is_none());
    }

    #[test]
    fn test_bad_question_seconds_fall_back() {
        for raw in ["0", "-3", "soon"] {
            let config = config_with(&[("QUIZ_QUESTION_SECONDS", raw)]);
            assert_eq!(config.question_time_limit, DEFAULT_QUESTION_TIME_LIMIT);
        }
        let config = config_with(&[("QUIZ_QUESTION_SECONDS", "45")]);
        assert_eq!(config.question_time_limit, Duration::from_secs(45));
    }
}
