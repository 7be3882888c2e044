use serde::{Deserialize, Serialize};

use crate::adaptive::types::{capitalize, subject_key, DifficultyLevel, MilestoneType, SubjectProfile};

const FUNDAMENTALS_BELOW: f64 = 30.0;
const PRACTICE_BELOW: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: MilestoneType,
    pub title: String,
    pub description: String,
}

pub fn recommend_content(subject: &str, proficiency_score: f64) -> Vec<Recommendation> {
    let name = capitalize(&subject_key(subject));

    let recommendation = if proficiency_score < FUNDAMENTALS_BELOW {
        Recommendation {
            kind: MilestoneType::Course,
            title: format!("Fundamentals of {name}"),
            description: "Master the basics with this introductory course".to_string(),
        }
    } else if proficiency_score < PRACTICE_BELOW {
        Recommendation {
            kind: MilestoneType::Practice,
            title: format!("{name} Problem Solving"),
            description: "Build your skills with these practice exercises".to_string(),
        }
    } else {
        Recommendation {
            kind: MilestoneType::Challenge,
            title: format!("Advanced {name} Concepts"),
            description: "Test your expertise with challenging content".to_string(),
        }
    };

    vec![recommendation]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub subject: String,
    pub quizzes_completed: usize,
    /// Unweighted mean of attempt percentages, rounded.
    pub average_score: u32,
    pub proficiency_score: f64,
    pub difficulty_level: DifficultyLevel,
}

pub fn summarize_subject(subject: &str, profile: &SubjectProfile) -> SubjectSummary {
    let attempts = profile.quiz_attempts();
    let average_score = if attempts.is_empty() {
        0
    } else {
        let total: f64 = attempts.iter().map(|a| a.percentage_score()).sum();
        (total / attempts.len() as f64).round().max(0.0) as u32
    };

    SubjectSummary {
        subject: subject_key(subject),
        quizzes_completed: attempts.len(),
        average_score,
        proficiency_score: profile.proficiency_score(),
        difficulty_level: profile.difficulty_level(),
    }
}

/// Feedback band for a single finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultTier {
    Excellent,
    Good,
    KeepPracticing,
}

impl ResultTier {
    pub fn from_percentage(percentage: f64) -> Self {
        let rounded = percentage.round();
        if rounded >= 80.0 {
            Self::Excellent
        } else if rounded >= 60.0 {
            Self::Good
        } else {
            Self::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent work! You've mastered this topic.",
            Self::Good => "Good job! You're making solid progress.",
            Self::KeepPracticing => "Keep practicing! You're building your knowledge.",
        }
    }
}
