use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOPIC: &str = "general";
pub const NO_ANSWER: &str = "No answer";

pub const DEFAULT_SUBJECTS: [&str; 3] = ["programming", "languages", "mathematics"];

/// Five ordered content tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum DifficultyLevel {
    #[default]
    Beginner,
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 5] = [
        Self::Beginner,
        Self::Basic,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Basic => "basic",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Inclusive lower bound of the tier on the 0-100 proficiency scale.
    pub fn lower_bound(&self) -> f64 {
        match self {
            Self::Beginner => 0.0,
            Self::Basic => 20.0,
            Self::Intermediate => 40.0,
            Self::Advanced => 60.0,
            Self::Expert => 80.0,
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AttemptError {
    #[error("quiz has no questions")]
    NoQuestions,
    #[error("score {score} exceeds total questions {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },
    #[error("subject is empty")]
    EmptySubject,
}

/// Lowercased, trimmed key used for every subject lookup.
pub fn subject_key(subject: &str) -> String {
    subject.trim().to_lowercase()
}

/// "mathematics" -> "Mathematics"
pub fn capitalize(subject: &str) -> String {
    let mut chars = subject.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn deserialize_topic<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_topic(raw.as_deref()))
}

fn normalize_topic(topic: Option<&str>) -> String {
    match topic.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => default_topic(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub question_text: String,
    #[serde(default = "default_topic", deserialize_with = "deserialize_topic")]
    pub topic: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl AnswerRecord {
    pub fn answered(
        question_id: impl Into<String>,
        question_text: impl Into<String>,
        topic: Option<&str>,
        user_answer: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        let user_answer = user_answer.into();
        let correct_answer = correct_answer.into();
        let is_correct = user_answer == correct_answer;
        Self {
            question_id: question_id.into(),
            question_text: question_text.into(),
            topic: normalize_topic(topic),
            user_answer,
            correct_answer,
            is_correct,
        }
    }

    /// A question whose time ran out. Any highlighted option is kept but never graded.
    pub fn timed_out(
        question_id: impl Into<String>,
        question_text: impl Into<String>,
        topic: Option<&str>,
        highlighted: Option<&str>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question_text: question_text.into(),
            topic: normalize_topic(topic),
            user_answer: highlighted.unwrap_or(NO_ANSWER).to_string(),
            correct_answer: correct_answer.into(),
            is_correct: false,
        }
    }
}

/// One finished quiz. Fields are read-only so `percentage_score` always matches
/// `score / total_questions`; stored attempts are re-validated when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawQuizAttempt")]
pub struct QuizAttempt {
    quiz_id: String,
    quiz_title: String,
    subject: String,
    score: u32,
    total_questions: u32,
    percentage_score: f64,
    timestamp: DateTime<Utc>,
    answers: Vec<AnswerRecord>,
}

/// Stored attempt shape. A stored `percentageScore` is ignored and recomputed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuizAttempt {
    quiz_id: String,
    quiz_title: String,
    subject: String,
    score: u32,
    total_questions: u32,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    answers: Vec<AnswerRecord>,
}

impl TryFrom<RawQuizAttempt> for QuizAttempt {
    type Error = AttemptError;

    fn try_from(raw: RawQuizAttempt) -> Result<Self, Self::Error> {
        Self::new(
            raw.quiz_id,
            raw.quiz_title,
            &raw.subject,
            raw.score,
            raw.total_questions,
            raw.timestamp,
            raw.answers,
        )
    }
}

impl QuizAttempt {
    pub fn new(
        quiz_id: impl Into<String>,
        quiz_title: impl Into<String>,
        subject: &str,
        score: u32,
        total_questions: u32,
        timestamp: DateTime<Utc>,
        answers: Vec<AnswerRecord>,
    ) -> Result<Self, AttemptError> {
        if total_questions == 0 {
            return Err(AttemptError::NoQuestions);
        }
        if score > total_questions {
            return Err(AttemptError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }
        let subject = subject_key(subject);
        if subject.is_empty() {
            return Err(AttemptError::EmptySubject);
        }

        Ok(Self {
            quiz_id: quiz_id.into(),
            quiz_title: quiz_title.into(),
            subject,
            score,
            total_questions,
            percentage_score: percentage(score, total_questions),
            timestamp,
            answers,
        })
    }

    /// Builds an attempt whose score is derived from the answer list.
    pub fn from_answers(
        quiz_id: impl Into<String>,
        quiz_title: impl Into<String>,
        subject: &str,
        timestamp: DateTime<Utc>,
        answers: Vec<AnswerRecord>,
    ) -> Result<Self, AttemptError> {
        let score = answers.iter().filter(|a| a.is_correct).count() as u32;
        let total = answers.len() as u32;
        Self::new(quiz_id, quiz_title, subject, score, total, timestamp, answers)
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn quiz_title(&self) -> &str {
        &self.quiz_title
    }

    /// Normalized subject key.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn percentage_score(&self) -> f64 {
        self.percentage_score
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }
}

fn percentage(score: u32, total: u32) -> f64 {
    100.0 * f64::from(score) / f64::from(total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopicResult {
    pub correct: u32,
    pub total: u32,
}

impl TopicResult {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSubjectProfile")]
pub struct SubjectProfile {
    proficiency_score: f64,
    difficulty_level: DifficultyLevel,
    quiz_attempts: Vec<QuizAttempt>,
    pub topics: BTreeMap<String, TopicResult>,
}

/// Stored subject shape. The tier is always re-derived from the score.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubjectProfile {
    #[serde(default)]
    proficiency_score: f64,
    #[serde(default)]
    quiz_attempts: Vec<QuizAttempt>,
    #[serde(default)]
    topics: BTreeMap<String, TopicResult>,
}

impl From<RawSubjectProfile> for SubjectProfile {
    fn from(raw: RawSubjectProfile) -> Self {
        let proficiency_score = if raw.proficiency_score.is_finite() {
            raw.proficiency_score
        } else {
            0.0
        };
        Self {
            proficiency_score,
            difficulty_level: super::difficulty::determine_difficulty_level(Some(
                proficiency_score,
            )),
            quiz_attempts: raw.quiz_attempts,
            topics: raw.topics,
        }
    }
}

impl Default for SubjectProfile {
    fn default() -> Self {
        Self {
            proficiency_score: 0.0,
            difficulty_level: DifficultyLevel::Beginner,
            quiz_attempts: Vec::new(),
            topics: BTreeMap::new(),
        }
    }
}

impl SubjectProfile {
    pub fn proficiency_score(&self) -> f64 {
        self.proficiency_score
    }

    pub fn difficulty_level(&self) -> DifficultyLevel {
        self.difficulty_level
    }

    pub fn quiz_attempts(&self) -> &[QuizAttempt] {
        &self.quiz_attempts
    }

    pub fn latest_attempt(&self) -> Option<&QuizAttempt> {
        self.quiz_attempts.last()
    }

    /// Appends `attempt` and replaces score and tier with the recomputed values.
    pub fn record_attempt(&mut self, attempt: QuizAttempt) -> TierTransition {
        let score = super::proficiency::calculate_proficiency_score(
            &self.quiz_attempts,
            Some(&attempt),
        );
        let level = super::difficulty::determine_difficulty_level(Some(score));
        let transition = TierTransition {
            from: self.difficulty_level,
            to: level,
        };

        self.quiz_attempts.push(attempt);
        self.proficiency_score = score;
        self.difficulty_level = level;

        transition
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierDirection {
    Increased,
    Decreased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTransition {
    pub from: DifficultyLevel,
    pub to: DifficultyLevel,
}

impl TierTransition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    pub fn direction(&self) -> Option<TierDirection> {
        match self.to.cmp(&self.from) {
            std::cmp::Ordering::Greater => Some(TierDirection::Increased),
            std::cmp::Ordering::Less => Some(TierDirection::Decreased),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// User-facing text for a tier change; `None` when the tier is unchanged.
    pub fn notice(&self, subject: &str) -> Option<String> {
        let action = match self.direction()? {
            TierDirection::Increased => "increased",
            TierDirection::Decreased => "adjusted",
        };
        Some(format!(
            "Your {} content difficulty has been {} to {} based on your performance.",
            subject_key(subject),
            action,
            self.to
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LearningPace {
    Slow,
    #[default]
    Moderate,
    Fast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPreferences {
    #[serde(default)]
    pub learning_pace: LearningPace,
    #[serde(default = "default_true")]
    pub show_recommendations: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LearningPreferences {
    fn default() -> Self {
        Self {
            learning_pace: LearningPace::Moderate,
            show_recommendations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProfile {
    #[serde(default)]
    pub subjects: BTreeMap<String, SubjectProfile>,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub preferences: LearningPreferences,
}

impl Default for LearningProfile {
    fn default() -> Self {
        let subjects = DEFAULT_SUBJECTS
            .iter()
            .map(|s| (s.to_string(), SubjectProfile::default()))
            .collect();
        Self {
            subjects,
            last_activity: None,
            preferences: LearningPreferences::default(),
        }
    }
}

impl LearningProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(&self, subject: &str) -> Option<&SubjectProfile> {
        self.subjects.get(&subject_key(subject))
    }

    pub fn subject_mut_or_default(&mut self, subject: &str) -> &mut SubjectProfile {
        self.subjects.entry(subject_key(subject)).or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneType {
    Course,
    Practice,
    Challenge,
    Project,
    Research,
    Mentoring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub milestone_type: MilestoneType,
    pub completed: bool,
    pub current: bool,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub milestones: Vec<Milestone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<DifficultyLevel>,
}

impl LearningPath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn current_milestone(&self) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.current)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_results: Option<BTreeMap<String, TopicResult>>,
}
