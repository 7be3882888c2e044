use crate::adaptive::types::{
    capitalize, subject_key, DifficultyLevel, LearningPath, LearningProfile, Milestone,
    MilestoneType,
};

pub const TOTAL_MILESTONES: usize = 5;

const SUBJECT_PLACEHOLDER: &str = "{subject}";

struct MilestoneTemplate {
    title: &'static str,
    description: &'static str,
    milestone_type: MilestoneType,
}

const fn template(
    title: &'static str,
    description: &'static str,
    milestone_type: MilestoneType,
) -> MilestoneTemplate {
    MilestoneTemplate {
        title,
        description,
        milestone_type,
    }
}

static BEGINNER_PATH: [MilestoneTemplate; TOTAL_MILESTONES] = [
    template(
        "Introduction to {subject}",
        "Learn the core vocabulary and ideas of {subject}",
        MilestoneType::Course,
    ),
    template(
        "{subject} Fundamentals Practice",
        "Reinforce the basics of {subject} with short exercises",
        MilestoneType::Practice,
    ),
    template(
        "First {subject} Quiz Challenge",
        "Check your understanding of {subject} fundamentals",
        MilestoneType::Challenge,
    ),
    template(
        "Guided {subject} Mini-Project",
        "Apply what you learned in a small step-by-step {subject} project",
        MilestoneType::Project,
    ),
    template(
        "{subject} Foundations Review",
        "Consolidate the {subject} foundations before moving on",
        MilestoneType::Course,
    ),
];

static INTERMEDIATE_PATH: [MilestoneTemplate; TOTAL_MILESTONES] = [
    template(
        "Intermediate {subject} Concepts",
        "Go beyond the basics with core intermediate {subject} topics",
        MilestoneType::Course,
    ),
    template(
        "{subject} Problem Solving",
        "Build fluency by working through varied {subject} problems",
        MilestoneType::Practice,
    ),
    template(
        "{subject} Skill Challenge",
        "Test your intermediate {subject} skills under time pressure",
        MilestoneType::Challenge,
    ),
    template(
        "Applied {subject} Project",
        "Use {subject} to build something with real requirements",
        MilestoneType::Project,
    ),
    template(
        "Explore {subject} in Depth",
        "Research a {subject} topic that interests you and summarize it",
        MilestoneType::Research,
    ),
];

static ADVANCED_PATH: [MilestoneTemplate; TOTAL_MILESTONES] = [
    template(
        "Advanced {subject} Techniques",
        "Study the advanced methods experienced practitioners of {subject} rely on",
        MilestoneType::Course,
    ),
    template(
        "Complex {subject} Problems",
        "Tackle multi-step {subject} problems that combine several ideas",
        MilestoneType::Practice,
    ),
    template(
        "{subject} Mastery Challenge",
        "Prove your command of advanced {subject} material",
        MilestoneType::Challenge,
    ),
    template(
        "{subject} Capstone Project",
        "Design and deliver a substantial {subject} project end to end",
        MilestoneType::Project,
    ),
    template(
        "{subject} Research Deep Dive",
        "Investigate current developments and open problems in {subject}",
        MilestoneType::Research,
    ),
];

static EXPERT_PATH: [MilestoneTemplate; TOTAL_MILESTONES] = [
    template(
        "Expert {subject} Seminars",
        "Engage with specialist {subject} material and case studies",
        MilestoneType::Course,
    ),
    template(
        "Original {subject} Research",
        "Produce an original analysis or contribution in {subject}",
        MilestoneType::Research,
    ),
    template(
        "Open {subject} Challenge",
        "Compete on open-ended {subject} challenges with no fixed answer",
        MilestoneType::Challenge,
    ),
    template(
        "Lead a {subject} Project",
        "Plan and lead a collaborative {subject} project",
        MilestoneType::Project,
    ),
    template(
        "Mentor {subject} Learners",
        "Share your {subject} expertise by guiding newer learners",
        MilestoneType::Mentoring,
    ),
];

fn templates_for(level: DifficultyLevel) -> &'static [MilestoneTemplate; TOTAL_MILESTONES] {
    match level {
        // No dedicated basic roadmap; basic learners follow the beginner one.
        DifficultyLevel::Beginner | DifficultyLevel::Basic => &BEGINNER_PATH,
        DifficultyLevel::Intermediate => &INTERMEDIATE_PATH,
        DifficultyLevel::Advanced => &ADVANCED_PATH,
        DifficultyLevel::Expert => &EXPERT_PATH,
    }
}

/// Number of roadmap steps a proficiency score has already covered, in `0..=TOTAL_MILESTONES`.
pub fn completed_milestones(proficiency_score: f64) -> usize {
    let raw = (proficiency_score * TOTAL_MILESTONES as f64 / 100.0).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        (raw as usize).min(TOTAL_MILESTONES)
    }
}

/// Builds the five-step roadmap for one subject of a learner's profile.
///
/// Returns an empty path when the subject is blank or not tracked by the profile.
pub fn generate_learning_path(profile: &LearningProfile, subject: &str) -> LearningPath {
    let key = subject_key(subject);
    if key.is_empty() {
        return LearningPath::empty();
    }
    let Some(subject_profile) = profile.subjects.get(&key) else {
        return LearningPath::empty();
    };

    let level = subject_profile.difficulty_level();
    let completed = completed_milestones(subject_profile.proficiency_score());
    let display_name = capitalize(&key);

    let milestones = templates_for(level)
        .iter()
        .enumerate()
        .map(|(i, t)| Milestone {
            title: t.title.replace(SUBJECT_PLACEHOLDER, &display_name),
            description: t.description.replace(SUBJECT_PLACEHOLDER, &display_name),
            milestone_type: t.milestone_type,
            completed: i < completed,
            current: i == completed,
            unlocked: i <= completed,
        })
        .collect();

    LearningPath {
        milestones,
        progress: Some(completed as f64 / TOTAL_MILESTONES as f64 * 100.0),
        difficulty_level: Some(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::types::QuizAttempt;
    use chrono::Utc;

    fn profile_with(subject: &str, score: u32, total: u32) -> LearningProfile {
        let mut profile = LearningProfile::new();
        let attempt =
            QuizAttempt::new("quiz", "Quiz", subject, score, total, Utc::now(), vec![]).unwrap();
        profile.subject_mut_or_default(subject).record_attempt(attempt);
        profile
    }

    #[test]
    fn test_unknown_subject_is_empty() {
        let profile = LearningProfile::new();
        let path = generate_learning_path(&profile, "unknownSubject");
        assert!(path.milestones.is_empty());
        assert!(path.progress.is_none());
        assert!(path.difficulty_level.is_none());
    }

    #[test]
    fn test_blank_subject_is_empty() {
        let profile = LearningProfile::new();
        assert!(generate_learning_path(&profile, "  ").milestones.is_empty());
    }

    #[test]
    fn test_flags_at_forty_percent() {
        let profile = profile_with("mathematics", 2, 5);
        let path = generate_learning_path(&profile, "mathematics");
        let m = &path.milestones;

        assert_eq!(m.len(), TOTAL_MILESTONES);
        assert!(m[0].completed && m[1].completed);
        assert!(!m[2].completed && m[2].current && m[2].unlocked);
        assert!(!m[3].unlocked && !m[4].unlocked);
        assert_eq!(m.iter().filter(|x| x.current).count(), 1);
        assert_eq!(path.progress, Some(40.0));
        assert_eq!(path.difficulty_level, Some(DifficultyLevel::Intermediate));
    }

    #[test]
    fn test_fresh_subject_has_first_milestone_current() {
        let profile = LearningProfile::new();
        let path = generate_learning_path(&profile, "programming");
        assert!(path.milestones[0].current && path.milestones[0].unlocked);
        assert!(path.milestones.iter().all(|m| !m.completed));
        assert!(!path.milestones[1].unlocked);
        assert_eq!(path.progress, Some(0.0));
    }

    #[test]
    fn test_full_score_completes_everything() {
        let profile = profile_with("languages", 10, 10);
        let path = generate_learning_path(&profile, "languages");
        assert!(path.milestones.iter().all(|m| m.completed && m.unlocked && !m.current));
        assert!(path.current_milestone().is_none());
        assert_eq!(path.milestones[4].milestone_type, MilestoneType::Mentoring);
    }

    #[test]
    fn test_subject_name_is_capitalized_into_titles() {
        let profile = LearningProfile::new();
        let path = generate_learning_path(&profile, "Programming");
        assert_eq!(path.milestones[0].title, "Introduction to Programming");
        assert!(path.milestones.iter().all(|m| !m.title.contains('{')));
    }

    #[test]
    fn test_basic_tier_reuses_beginner_template() {
        let basic = profile_with("mathematics", 1, 4);
        let beginner = LearningProfile::new();

        let basic_path = generate_learning_path(&basic, "mathematics");
        let beginner_path = generate_learning_path(&beginner, "mathematics");

        assert_eq!(basic_path.difficulty_level, Some(DifficultyLevel::Basic));
        let titles = |p: &LearningPath| p.milestones.iter().map(|m| m.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&basic_path), titles(&beginner_path));
    }

    #[test]
    fn test_completed_milestones_clamps() {
        assert_eq!(completed_milestones(0.0), 0);
        assert_eq!(completed_milestones(19.99), 0);
        assert_eq!(completed_milestones(20.0), 1);
        assert_eq!(completed_milestones(99.9), 4);
        assert_eq!(completed_milestones(100.0), 5);
        assert_eq!(completed_milestones(250.0), 5);
        assert_eq!(completed_milestones(-10.0), 0);
        assert_eq!(completed_milestones(f64::NAN), 0);
    }
}
