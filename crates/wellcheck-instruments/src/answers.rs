use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wellcheck_core::models::instrument::InstrumentKind;

use crate::error::ScoringError;
use crate::instruments::self_compassion::TableRevision;
use crate::scoring::{QuestionId, Responses};
use crate::{evaluate, instrument, Evaluation};

/// Answers collected so far for one questionnaire session.
///
/// Updates consume the set and hand back a new one; the caller owns the
/// session from creation through evaluation to reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerSet {
    kind: InstrumentKind,
    revision: TableRevision,
    responses: Responses,
}

impl AnswerSet {
    pub fn new(kind: InstrumentKind) -> Self {
        Self::with_revision(kind, TableRevision::default())
    }

    pub fn with_revision(kind: InstrumentKind, revision: TableRevision) -> Self {
        Self {
            kind,
            revision,
            responses: Responses::new(),
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    pub fn revision(&self) -> TableRevision {
        self.revision
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    /// Record the response to `question_id`, replacing any earlier one.
    pub fn answer(mut self, question_id: QuestionId, value: u8) -> Result<Self, ScoringError> {
        let instrument = instrument(self.kind, self.revision);
        if !instrument.questions().iter().any(|q| q.id == question_id) {
            return Err(ScoringError::UnknownQuestion {
                instrument: self.kind,
                question_id,
            });
        }
        let scale = instrument.scale();
        if !scale.contains(value) {
            return Err(ScoringError::OutOfRange {
                instrument: self.kind,
                question_id,
                value: i64::from(value),
                min: scale.min,
                max: scale.max,
            });
        }
        self.responses.insert(question_id, value);
        Ok(self)
    }

    pub fn answered(&self) -> usize {
        self.responses.len()
    }

    pub fn total(&self) -> usize {
        instrument(self.kind, self.revision).questions().len()
    }

    /// Unanswered question ids in administration order.
    pub fn remaining(&self) -> Vec<QuestionId> {
        instrument(self.kind, self.revision)
            .questions()
            .iter()
            .map(|q| q.id)
            .filter(|id| !self.responses.contains_key(id))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.answered() == self.total()
    }

    /// Fraction answered, in [0, 1].
    pub fn progress(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.answered() as f64 / total as f64
    }

    /// Discard every response, keeping the instrument.
    pub fn reset(self) -> Self {
        Self::with_revision(self.kind, self.revision)
    }

    pub fn evaluate(&self) -> Result<Evaluation, ScoringError> {
        evaluate(self.kind, self.revision, &self.responses)
    }
}
