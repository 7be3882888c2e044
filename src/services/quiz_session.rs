use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adaptive::{AnswerRecord, AttemptError, QuizAttempt};

pub const DEFAULT_QUESTION_TIME_LIMIT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub subject: String,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("quiz has no questions")]
    EmptyQuiz,
    #[error("no answer selected")]
    NoAnswerSelected,
    #[error("option not offered for this question: {0}")]
    UnknownOption(String),
    #[error("quiz already completed")]
    AlreadyCompleted,
    #[error("quiz not completed yet")]
    NotCompleted,
    #[error("invalid attempt: {0}")]
    Attempt(#[from] AttemptError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Next { index: usize },
    Completed,
}

/// Walks one learner through a quiz, one question at a time.
///
/// The caller owns the clock: when `question_time_limit` elapses it calls
/// [`QuizSession::time_out`], which records the unanswered question and moves on.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    quiz: Quiz,
    question_time_limit: Duration,
    current: usize,
    selected: Option<String>,
    answers: Vec<AnswerRecord>,
}

impl QuizSession {
    pub fn start(quiz: Quiz, question_time_limit: Duration) -> Result<Self, SessionError> {
        if quiz.questions.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }
        let session = Self {
            id: Uuid::new_v4(),
            question_time_limit,
            current: 0,
            selected: None,
            answers: Vec::with_capacity(quiz.questions.len()),
            quiz,
        };
        tracing::debug!(session_id = %session.id, quiz_id = %session.quiz.id, "quiz session started");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn question_time_limit(&self) -> Duration {
        self.question_time_limit
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current)
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn score(&self) -> u32 {
        self.answers.iter().filter(|a| a.is_correct).count() as u32
    }

    pub fn is_completed(&self) -> bool {
        self.answers.len() == self.quiz.questions.len()
    }

    pub fn select_answer(&mut self, option: &str) -> Result<(), SessionError> {
        let question = self.current_question().ok_or(SessionError::AlreadyCompleted)?;
        if !question.options.iter().any(|o| o == option) {
            return Err(SessionError::UnknownOption(option.to_string()));
        }
        self.selected = Some(option.to_string());
        Ok(())
    }

    /// Grades the selected option for the current question and advances.
    pub fn submit(&mut self) -> Result<SessionStep, SessionError> {
        let question = self.current_question().ok_or(SessionError::AlreadyCompleted)?;
        let selected = self.selected.as_deref().ok_or(SessionError::NoAnswerSelected)?;
        let record = AnswerRecord::answered(
            question.id.clone(),
            question.prompt.clone(),
            question.topic.as_deref(),
            selected,
            question.correct_answer.clone(),
        );
        Ok(self.advance(record))
    }

    /// Closes the current question when its time runs out. A highlighted option is
    /// recorded as the answer but graded incorrect; with none, the answer is "No answer".
    pub fn time_out(&mut self) -> Result<SessionStep, SessionError> {
        let highlighted = self.selected.take();
        let question = self.current_question().ok_or(SessionError::AlreadyCompleted)?;
        let record = AnswerRecord::timed_out(
            question.id.clone(),
            question.prompt.clone(),
            question.topic.as_deref(),
            highlighted.as_deref(),
            question.correct_answer.clone(),
        );
        tracing::debug!(session_id = %self.id, question_id = %question.id, "question timed out");
        Ok(self.advance(record))
    }

    fn advance(&mut self, record: AnswerRecord) -> SessionStep {
        self.answers.push(record);
        self.selected = None;
        self.current += 1;
        if self.is_completed() {
            SessionStep::Completed
        } else {
            SessionStep::Next {
                index: self.current,
            }
        }
    }

    /// Turns a completed session into the immutable attempt record.
    pub fn finish(self, timestamp: DateTime<Utc>) -> Result<QuizAttempt, SessionError> {
        if !self.is_completed() {
            return Err(SessionError::NotCompleted);
        }
        let score = self.score();
        let total = self.quiz.questions.len() as u32;
        let attempt = QuizAttempt::new(
            self.quiz.id,
            self.quiz.title,
            &self.quiz.subject,
            score,
            total,
            timestamp,
            self.answers,
        )?;
        tracing::info!(
            session_id = %self.id,
            quiz_id = %attempt.quiz_id(),
            score,
            total,
            "quiz session finished"
        );
        Ok(attempt)
    }
}
