pub mod curriculum;
pub mod distribution;
pub mod exam_session;
pub mod question;
pub use curriculum::{CognitiveLevel, DifficultyBand, Phase, QuestionType};
pub use distribution::{DifficultyCounts, TypeCounts};
pub use exam_session::{ExamMetadata, ExamSession};
pub use question::{AnswerOptions, QuestionRecord, QuestionSpec};
