pub mod candidate;
pub mod question;

pub use candidate::{
    Answer, CandidateRecord, CandidateStatus, ChatMessage, Difficulty, MessageKind, Score,
    ScoreBreakdown,
};
pub use question::{PlannedQuestion, Question};
