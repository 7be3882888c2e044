pub mod profile;
pub mod quiz_session;

pub use profile::{ProfileError, ProfileService, ProfileUpdate, SubjectReport};
pub use quiz_session::{Question, Quiz, QuizSession, SessionError, SessionStep};
