use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;

use crate::adaptive::{
    analyze_quiz_performance, generate_learning_path, recommend_content, subject_key,
    summarize_subject, DifficultyLevel, LearningPath, LearningProfile, PerformanceAnalysis,
    QuizAttempt, Recommendation, SubjectSummary, TierTransition,
};
use crate::store::{validate_user_id, ProfileStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("invalid user id: {0}")]
    InvalidUserId(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub subject: String,
    pub proficiency_score: f64,
    pub difficulty_level: DifficultyLevel,
    pub transition: TierTransition,
    pub attempt_count: usize,
}

impl ProfileUpdate {
    /// Text the UI may show when the tier moved; the service never shows it itself.
    pub fn notice(&self) -> Option<String> {
        self.transition.notice(&self.subject)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectReport {
    pub summary: SubjectSummary,
    pub learning_path: LearningPath,
    pub recommendations: Vec<Recommendation>,
    pub latest_analysis: PerformanceAnalysis,
}

/// Owns the profile store and applies quiz results to learner profiles.
pub struct ProfileService<S: ProfileStore> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: ProfileStore> ProfileService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored profile for `user_id`, or a freshly seeded one.
    pub fn profile(&self, user_id: &str) -> Result<LearningProfile, ProfileError> {
        check_user_id(user_id)?;
        Ok(self.store.load(user_id)?.unwrap_or_default())
    }

    pub fn record_quiz_attempt(
        &self,
        user_id: &str,
        attempt: QuizAttempt,
    ) -> Result<ProfileUpdate, ProfileError> {
        check_user_id(user_id)?;
        let _guard = self.write_lock.lock();

        let mut profile = self.store.load(user_id)?.unwrap_or_default();
        let subject = subject_key(attempt.subject());
        let quiz_id = attempt.quiz_id().to_string();

        let subject_profile = profile.subject_mut_or_default(&subject);
        let transition = subject_profile.record_attempt(attempt);
        let update = ProfileUpdate {
            subject: subject.clone(),
            proficiency_score: subject_profile.proficiency_score(),
            difficulty_level: subject_profile.difficulty_level(),
            transition,
            attempt_count: subject_profile.quiz_attempts().len(),
        };
        profile.last_activity = Some(Utc::now());

        self.store.save(user_id, &profile)?;

        tracing::info!(
            user_id,
            subject = %subject,
            quiz_id = %quiz_id,
            proficiency = update.proficiency_score,
            level = %update.difficulty_level,
            attempts = update.attempt_count,
            "quiz attempt recorded"
        );
        if transition.changed() {
            tracing::info!(
                user_id,
                subject = %subject,
                from = %transition.from,
                to = %transition.to,
                "difficulty tier changed"
            );
        }

        Ok(update)
    }

    pub fn learning_path(&self, user_id: &str, subject: &str) -> Result<LearningPath, ProfileError> {
        let profile = self.profile(user_id)?;
        Ok(generate_learning_path(&profile, subject))
    }

    /// Everything the subject view renders; `None` when the learner does not track `subject`.
    pub fn subject_report(
        &self,
        user_id: &str,
        subject: &str,
    ) -> Result<Option<SubjectReport>, ProfileError> {
        let profile = self.profile(user_id)?;
        Ok(build_report(&profile, subject))
    }

    /// Reports for every subject the learner tracks, in subject order.
    pub fn all_reports(&self, user_id: &str) -> Result<Vec<SubjectReport>, ProfileError> {
        let profile = self.profile(user_id)?;
        Ok(profile
            .subjects
            .keys()
            .filter_map(|subject| build_report(&profile, subject))
            .collect())
    }
}

fn build_report(profile: &LearningProfile, subject: &str) -> Option<SubjectReport> {
    let subject_profile = profile.subject(subject)?;

    let recommendations = if profile.preferences.show_recommendations {
        recommend_content(subject, subject_profile.proficiency_score())
    } else {
        Vec::new()
    };
    let latest_analysis = subject_profile
        .latest_attempt()
        .map(|attempt| analyze_quiz_performance(attempt.answers()))
        .unwrap_or_default();

    Some(SubjectReport {
        summary: summarize_subject(subject, subject_profile),
        learning_path: generate_learning_path(profile, subject),
        recommendations,
        latest_analysis,
    })
}

fn check_user_id(user_id: &str) -> Result<(), ProfileError> {
    validate_user_id(user_id).map_err(|_| ProfileError::InvalidUserId(user_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::AnswerRecord;
    use crate::store::InMemoryProfileStore;

    fn attempt(subject: &str, score: u32, total: u32) -> QuizAttempt {
        QuizAttempt::new("quiz", "Quiz", subject, score, total, Utc::now(), vec![]).unwrap()
    }

    #[test]
    fn test_first_attempt_sets_score_and_tier() {
        let service = ProfileService::new(InMemoryProfileStore::new());
        let update = service.record_quiz_attempt("u1", attempt("Mathematics", 2, 3)).unwrap();

        assert_eq!(update.subject, "mathematics");
        assert!((update.proficiency_score - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(update.difficulty_level, DifficultyLevel::Advanced);
        assert_eq!(update.attempt_count, 1);
        assert!(update.notice().unwrap().contains("increased to advanced"));

        let profile = service.profile("u1").unwrap();
        assert!(profile.last_activity.is_some());
    }

    #[test]
    fn test_unchanged_tier_has_no_notice() {
        let service = ProfileService::new(InMemoryProfileStore::new());
        let update = service.record_quiz_attempt("u1", attempt("programming", 0, 3)).unwrap();
        assert!(!update.transition.changed());
        assert!(update.notice().is_none());
    }

    #[test]
    fn test_new_subject_is_created() {
        let service = ProfileService::new(InMemoryProfileStore::new());
        service.record_quiz_attempt("u1", attempt("History", 1, 1)).unwrap();
        let profile = service.profile("u1").unwrap();
        assert_eq!(profile.subjects.len(), 4);
        assert!(profile.subject("history").is_some());
    }

    #[test]
    fn test_invalid_user_id() {
        let service = ProfileService::new(InMemoryProfileStore::new());
        assert!(matches!(
            service.record_quiz_attempt("", attempt("math", 1, 1)),
            Err(ProfileError::InvalidUserId(_))
        ));
    }

    #[test]
    fn test_report_respects_recommendation_preference() {
        let store = InMemoryProfileStore::new();
        let mut profile = LearningProfile::new();
        profile.preferences.show_recommendations = false;
        store.save("u2", &profile).unwrap();

        let service = ProfileService::new(store);
        let report = service.subject_report("u2", "programming").unwrap().unwrap();
        assert!(report.recommendations.is_empty());
        assert_eq!(report.learning_path.milestones.len(), 5);
    }

    #[test]
    fn test_report_analyzes_latest_attempt() {
        let service = ProfileService::new(InMemoryProfileStore::new());
        let answers = vec![
            AnswerRecord::answered("1", "q1", Some("loops"), "a", "a"),
            AnswerRecord::answered("2", "q2", Some("types"), "b", "a"),
        ];
        let attempt =
            QuizAttempt::from_answers("quiz", "Quiz", "programming", Utc::now(), answers).unwrap();
        service.record_quiz_attempt("u3", attempt).unwrap();

        let report = service.subject_report("u3", "programming").unwrap().unwrap();
        assert_eq!(report.latest_analysis.strengths, vec!["loops".to_string()]);
        assert_eq!(report.latest_analysis.weaknesses, vec!["types".to_string()]);
        assert_eq!(report.summary.quizzes_completed, 1);
        assert_eq!(report.recommendations.len(), 1);

        assert!(service.subject_report("u3", "astronomy").unwrap().is_none());
        assert_eq!(service.all_reports("u3").unwrap().len(), 3);
    }
}
