//! Adaptive proficiency engine.
//!
//! Pure functions over plain data:
//! - [`proficiency`] - recency-weighted proficiency score from quiz history
//! - [`difficulty`] - score to five-tier difficulty mapping
//! - [`performance`] - per-topic strength / weakness analysis of one quiz
//! - [`path`] - five-milestone learning roadmap for a subject
//! - [`recommendation`] - next-content suggestions, subject summaries, result feedback
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod difficulty;
pub mod path;
pub mod performance;
pub mod proficiency;
pub mod recommendation;
pub mod types;

pub use difficulty::determine_difficulty_level;
pub use path::generate_learning_path;
pub use performance::analyze_quiz_performance;
pub use proficiency::calculate_proficiency_score;
pub use recommendation::{recommend_content, summarize_subject, Recommendation, ResultTier, SubjectSummary};
pub use types::*;
