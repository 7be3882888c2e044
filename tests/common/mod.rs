#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};

use learnpath_engine::adaptive::{AnswerRecord, QuizAttempt};

pub fn attempt(subject: &str, score: u32, total: u32) -> QuizAttempt {
    attempt_at(subject, score, total, 0)
}

/// Attempt stamped `minutes` after a fixed epoch so histories stay chronological.
pub fn attempt_at(subject: &str, score: u32, total: u32, minutes: i64) -> QuizAttempt {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    QuizAttempt::new(
        format!("quiz-{minutes}"),
        "Sample Quiz",
        subject,
        score,
        total,
        base + Duration::minutes(minutes),
        vec![],
    )
    .unwrap()
}

pub fn answer(topic: &str, correct: bool) -> AnswerRecord {
    let given = if correct { "right" } else { "wrong" };
    AnswerRecord::answered("q", "question", Some(topic), given, "right")
}
