use crate::adaptive::types::DifficultyLevel;

/// Lower score bound of each tier, ascending.
pub const PROFICIENCY_THRESHOLDS: [(f64, DifficultyLevel); 5] = [
    (0.0, DifficultyLevel::Beginner),
    (20.0, DifficultyLevel::Basic),
    (40.0, DifficultyLevel::Intermediate),
    (60.0, DifficultyLevel::Advanced),
    (80.0, DifficultyLevel::Expert),
];

/// Maps a proficiency score to the tier of the largest threshold not above it.
///
/// Intervals are half-open: `[0,20) [20,40) [40,60) [60,80) [80,..)`. A missing score, a
/// negative score or NaN all land on `Beginner`. Scores above 100 are not clamped.
pub fn determine_difficulty_level(score: Option<f64>) -> DifficultyLevel {
    let Some(score) = score else {
        return DifficultyLevel::Beginner;
    };

    let mut level = PROFICIENCY_THRESHOLDS[0].1;
    for (threshold, tier) in PROFICIENCY_THRESHOLDS {
        if score >= threshold {
            level = tier;
        } else {
            break;
        }
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(determine_difficulty_level(Some(0.0)), DifficultyLevel::Beginner);
        assert_eq!(determine_difficulty_level(Some(19.9)), DifficultyLevel::Beginner);
        assert_eq!(determine_difficulty_level(Some(20.0)), DifficultyLevel::Basic);
        assert_eq!(determine_difficulty_level(Some(39.99)), DifficultyLevel::Basic);
        assert_eq!(determine_difficulty_level(Some(40.0)), DifficultyLevel::Intermediate);
        assert_eq!(determine_difficulty_level(Some(59.9)), DifficultyLevel::Intermediate);
        assert_eq!(determine_difficulty_level(Some(60.0)), DifficultyLevel::Advanced);
        assert_eq!(determine_difficulty_level(Some(79.9)), DifficultyLevel::Advanced);
        assert_eq!(determine_difficulty_level(Some(80.0)), DifficultyLevel::Expert);
        assert_eq!(determine_difficulty_level(Some(100.0)), DifficultyLevel::Expert);
    }

    #[test]
    fn test_missing_score_is_beginner() {
        assert_eq!(determine_difficulty_level(None), DifficultyLevel::Beginner);
    }

    #[test]
    fn test_out_of_range_scores() {
        assert_eq!(determine_difficulty_level(Some(-5.0)), DifficultyLevel::Beginner);
        assert_eq!(determine_difficulty_level(Some(f64::NAN)), DifficultyLevel::Beginner);
        assert_eq!(determine_difficulty_level(Some(140.0)), DifficultyLevel::Expert);
    }

    #[test]
    fn test_thresholds_agree_with_lower_bounds() {
        for (threshold, tier) in PROFICIENCY_THRESHOLDS {
            assert_eq!(tier.lower_bound(), threshold);
            assert_eq!(determine_difficulty_level(Some(threshold)), tier);
        }
    }
}
