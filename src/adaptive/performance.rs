use std::collections::BTreeMap;

use crate::adaptive::types::{AnswerRecord, PerformanceAnalysis, TopicResult};

pub const STRENGTH_THRESHOLD: f64 = 0.7;
pub const WEAKNESS_THRESHOLD: f64 = 0.5;

/// Buckets answers by topic and flags strong and weak topics.
///
/// Topics scoring in `[0.5, 0.7)` are reported in `topic_results` but in neither list.
pub fn analyze_quiz_performance(answers: &[AnswerRecord]) -> PerformanceAnalysis {
    if answers.is_empty() {
        return PerformanceAnalysis::default();
    }

    let mut topic_results: BTreeMap<String, TopicResult> = BTreeMap::new();
    for answer in answers {
        let entry = topic_results.entry(answer.topic.clone()).or_default();
        entry.total += 1;
        if answer.is_correct {
            entry.correct += 1;
        }
    }

    let strengths = topic_results
        .iter()
        .filter(|(_, result)| result.ratio() >= STRENGTH_THRESHOLD)
        .map(|(topic, _)| topic.clone())
        .collect();
    let weaknesses = topic_results
        .iter()
        .filter(|(_, result)| result.ratio() < WEAKNESS_THRESHOLD)
        .map(|(topic, _)| topic.clone())
        .collect();

    PerformanceAnalysis {
        strengths,
        weaknesses,
        topic_results: Some(topic_results),
    }
}
