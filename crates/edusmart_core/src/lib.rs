pub mod domain;
pub mod ports;
pub mod session;

pub use domain::{
    Course, Difficulty, Discussion, FlashcardTally, Lesson, LessonKind, ProfileUpdate,
    QuizQuestion, Role, StudyGroup, TranscriptEntry, UserProfile, VocabularyEntry,
};
pub use ports::{PortError, PortResult, QuizService, TutorService};
pub use session::{AuthEvent, AuthPhase, NavEvent, Section, Session, View, CHROME_HIDDEN};
