//! Adaptive proficiency scoring and learning-path generation for quiz-based courses.
//!
//! [`adaptive`] holds the pure engine. [`services`] and [`store`] wrap it with a quiz
//! session flow and injectable profile persistence.

pub mod adaptive;
pub mod config;
pub mod logging;
pub mod services;
pub mod store;
