//! crates/edusmart_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};

/// How a lesson is delivered. Quiz lessons route to the exercise screen,
/// everything else routes to the lesson player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonKind {
    Video,
    Quiz,
    Reading,
}

/// A single lesson inside a course curriculum.
#[derive(Debug, Clone)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub kind: LessonKind,
    pub is_locked: bool,
    pub is_completed: bool,
}

/// A course as shown in the library and on the detail screen.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub category: String,
    pub instructor: String,
    pub lessons_count: u32,
    pub progress: u8,
    pub description: String,
    pub curriculum: Vec<Lesson>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One vocabulary item. The `is_learned` / `is_bookmarked` flags are the only
/// mutable fields; each is flipped by exactly one toggle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub id: String,
    pub word: String,
    pub phonetic: String,
    pub definition: String,
    pub example: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub is_bookmarked: bool,
    pub is_learned: bool,
}

/// A community discussion thread.
#[derive(Debug, Clone)]
pub struct Discussion {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub replies_count: u32,
    pub likes_count: u32,
}

/// A study group a user can browse or join.
#[derive(Debug, Clone)]
pub struct StudyGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub member_count: u32,
    pub is_joined: bool,
    pub goal: String,
}

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub avatar: String,
    pub level: u32,
    pub xp: u32,
}

/// A partial profile edit. Fields left as `None` are preserved unchanged
/// when the update is merged into the existing profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub level: Option<u32>,
    pub xp: Option<u32>,
}

impl UserProfile {
    /// Merges a partial update into this profile, preserving any field the
    /// update does not specify.
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(level) = update.level {
            self.level = level;
        }
        if let Some(xp) = update.xp {
            self.xp = xp;
        }
    }
}

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

/// One turn of the AI tutor conversation. Transcripts are append-only and
/// replayed to the model in insertion order on every request.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A generated multiple-choice question. The four-option shape is enforced
/// at the type level; `correct_answer` indexes into `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: usize,
}

/// Per-bucket counts from one flashcard review session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlashcardTally {
    pub again: u32,
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
}
