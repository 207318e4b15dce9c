pub mod quiz_llm;
pub mod tutor_llm;

pub use quiz_llm::GeminiQuizAdapter;
pub use tutor_llm::GeminiTutorAdapter;
