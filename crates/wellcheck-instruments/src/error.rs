use thiserror::Error;
use wellcheck_core::models::instrument::InstrumentKind;

use crate::scoring::QuestionId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("{instrument}: answer set is incomplete, {} question(s) unanswered", .missing.len())]
    IncompleteInput {
        instrument: InstrumentKind,
        missing: Vec<QuestionId>,
    },

    #[error("{instrument}: subscale '{subscale}' has no scored items")]
    InvalidConfiguration {
        instrument: InstrumentKind,
        subscale: &'static str,
    },

    #[error("{instrument}: unknown question {question_id}")]
    UnknownQuestion {
        instrument: InstrumentKind,
        question_id: QuestionId,
    },

    #[error("{instrument}: answer {value} to question {question_id} is outside [{min}, {max}]")]
    OutOfRange {
        instrument: InstrumentKind,
        question_id: QuestionId,
        value: i64,
        min: u8,
        max: u8,
    },
}
