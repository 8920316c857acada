//! wellcheck-instruments
//!
//! Questionnaire definitions and scoring. Pure data and pure functions, no
//! I/O. Defines the item tables, response scales, severity bands and the
//! scorers for each supported instrument.

pub mod answers;
pub mod error;
pub mod instruments;
pub mod scoring;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wellcheck_core::models::instrument::InstrumentKind;

use error::ScoringError;
use instruments::dass21::{Dass21, DassResults};
use instruments::self_compassion::{SelfCompassion, SelfCompassionResults, TableRevision};
use scoring::{QuestionInfo, RawResponses, Responses, ResponseScale, ScoreBand, ValidationError};

/// Trait implemented by each questionnaire.
pub trait Instrument: Send + Sync {
    fn kind(&self) -> InstrumentKind;

    /// Unique identifier (e.g., "self_compassion", "dass21").
    fn id(&self) -> &str {
        self.kind().id()
    }

    /// Human-readable name (e.g., "DASS-21").
    fn name(&self) -> &str;

    /// The scale every item is answered on.
    fn scale(&self) -> &ResponseScale;

    /// Items in administration order.
    fn questions(&self) -> &[QuestionInfo];

    /// Score a complete answer set.
    fn evaluate(&self, answers: &Responses) -> Result<Evaluation, ScoringError>;

    /// Narrow client-supplied answers onto this instrument's scale.
    fn fit_answers(&self, raw: &RawResponses) -> Result<Responses, ScoringError> {
        scoring::fit_to_scale(self.kind(), self.scale(), raw)
    }

    /// List every entry that does not belong to this instrument's table or
    /// falls outside its scale. Unanswered items are not reported here.
    fn validate_answers(&self, answers: &Responses) -> Vec<ValidationError> {
        let scale = self.scale();
        let mut errors = Vec::new();
        for (&question_id, &value) in answers {
            if !self.questions().iter().any(|q| q.id == question_id) {
                errors.push(ValidationError {
                    question_id,
                    value,
                    message: format!("{}: there is no question {question_id}", self.name()),
                });
            } else if !scale.contains(value) {
                errors.push(ValidationError {
                    question_id,
                    value,
                    message: format!(
                        "{}: answer {value} to question {question_id} is outside [{}, {}]",
                        self.name(),
                        scale.min,
                        scale.max,
                    ),
                });
            }
        }
        errors
    }

    /// Format an evaluation as structured text for a report or a prompt.
    fn to_structured_input(&self, evaluation: &Evaluation) -> String {
        let mut output = format!("## {}\n\n", self.name());
        for band in evaluation.bands() {
            let note = if band.lower_is_better {
                ", lower is better"
            } else {
                ""
            };
            output.push_str(&format!(
                "- {}: {} ({}){note}\n",
                band.name,
                format_value(band.value),
                band.label
            ));
        }
        if evaluation.suggests_referral() {
            output.push_str(
                "\nAt least one result is above the normal range. \
                 Professional support is recommended.\n",
            );
        }
        output
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// The result of scoring one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "instrument", rename_all = "snake_case")]
#[ts(export)]
pub enum Evaluation {
    SelfCompassion(SelfCompassionResults),
    Dass21(DassResults),
}

impl Evaluation {
    pub fn kind(&self) -> InstrumentKind {
        match self {
            Evaluation::SelfCompassion(_) => InstrumentKind::SelfCompassion,
            Evaluation::Dass21(_) => InstrumentKind::Dass21,
        }
    }

    /// Whether the respondent should be pointed towards professional support.
    /// Only DASS-21 results carry a referral threshold.
    pub fn suggests_referral(&self) -> bool {
        match self {
            Evaluation::SelfCompassion(_) => false,
            Evaluation::Dass21(results) => results.any_elevated(),
        }
    }

    /// Every scored dimension, flattened for display.
    pub fn bands(&self) -> Vec<ScoreBand> {
        match self {
            Evaluation::SelfCompassion(results) => results.bands(),
            Evaluation::Dass21(results) => results.bands(),
        }
    }
}

/// Build the instrument for `kind`. `revision` only affects the
/// self-compassion item table.
pub fn instrument(kind: InstrumentKind, revision: TableRevision) -> Box<dyn Instrument> {
    match kind {
        InstrumentKind::SelfCompassion => Box::new(SelfCompassion { revision }),
        InstrumentKind::Dass21 => Box::new(Dass21),
    }
}

/// Return all registered instruments.
pub fn all_instruments(revision: TableRevision) -> Vec<Box<dyn Instrument>> {
    InstrumentKind::ALL
        .iter()
        .map(|&kind| instrument(kind, revision))
        .collect()
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str, revision: TableRevision) -> Option<Box<dyn Instrument>> {
    let kind = id.parse::<InstrumentKind>().ok()?;
    Some(instrument(kind, revision))
}

/// Score a complete answer set for `kind`.
pub fn evaluate(
    kind: InstrumentKind,
    revision: TableRevision,
    answers: &Responses,
) -> Result<Evaluation, ScoringError> {
    let result = instrument(kind, revision).evaluate(answers);
    match &result {
        Ok(_) => tracing::debug!(instrument = %kind, items = answers.len(), "evaluation complete"),
        Err(e) => tracing::debug!(instrument = %kind, error = %e, "evaluation rejected"),
    }
    result
}
