use crate::adaptive::types::QuizAttempt;

/// Recency-weighted proficiency on the 0-100 scale.
///
/// `history` is oldest first; `latest`, when given, is appended after it. The attempt at
/// position `i` of the combined sequence carries weight `i + 1`, so newer results move the
/// score faster than a plain running mean while older ones are never dropped.
///
/// A first attempt with no history defines the initial proficiency on its own.
pub fn calculate_proficiency_score(history: &[QuizAttempt], latest: Option<&QuizAttempt>) -> f64 {
    match (history.is_empty(), latest) {
        (true, None) => return 0.0,
        (true, Some(attempt)) => return attempt.percentage_score(),
        _ => {}
    }

    let (weighted_sum, total_weight) = history
        .iter()
        .chain(latest)
        .enumerate()
        .fold((0.0_f64, 0.0_f64), |(sum, weights), (index, attempt)| {
            let weight = (index + 1) as f64;
            (sum + attempt.percentage_score() * weight, weights + weight)
        });

    let score = weighted_sum / total_weight;
    tracing::trace!(
        attempts = history.len() + usize::from(latest.is_some()),
        score,
        "proficiency recomputed"
    );
    score
}
