use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use wellcheck_core::models::instrument::InstrumentKind;

use crate::error::ScoringError;

/// Question identifier, stable for the lifetime of an instrument.
pub type QuestionId = u32;

/// Responses keyed by question id.
pub type Responses = BTreeMap<QuestionId, u8>;

/// Responses as received from a client, before they are fitted to a scale.
pub type RawResponses = BTreeMap<QuestionId, i64>;

/// How a subscale's reported value is derived from its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreType {
    /// Arithmetic mean of the (possibly reversed) item scores.
    Mean,
    /// Sum of raw item values, doubled to the 42-item norms.
    DoubledSum,
}

/// The Likert scale respondents answer on.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResponseScale {
    pub min: u8,
    pub max: u8,
    /// One label per value, starting at `min`.
    pub labels: Vec<String>,
}

impl ResponseScale {
    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn label(&self, value: u8) -> Option<&str> {
        if !self.contains(value) {
            return None;
        }
        self.labels
            .get(usize::from(value - self.min))
            .map(String::as_str)
    }

    /// Mirror a value around the middle of the scale (1↔5, 2↔4, 3↔3 on 1–5).
    pub fn reverse(&self, value: u8) -> u8 {
        self.min + self.max - value
    }
}

/// A question as shown to the respondent.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionInfo {
    pub id: QuestionId,
    pub text: String,
    /// `None` for items that are collected but not scored.
    pub subscale_id: Option<String>,
    pub reversed: bool,
}

/// One scored dimension of an evaluation, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreBand {
    pub id: String,
    pub name: String,
    pub score_type: ScoreType,
    pub value: f64,
    pub label: String,
    /// Negative dimensions, where a lower value is the better outcome.
    pub lower_is_better: bool,
}

/// A single answer entry that does not fit the instrument.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub question_id: QuestionId,
    pub value: u8,
    pub message: String,
}

/// Fit client-supplied values onto `scale`. Any value outside it, including
/// ones that do not fit a `u8` at all, is an `OutOfRange` error.
pub fn fit_to_scale(
    instrument: InstrumentKind,
    scale: &ResponseScale,
    raw: &RawResponses,
) -> Result<Responses, ScoringError> {
    raw.iter()
        .map(|(&question_id, &value)| {
            u8::try_from(value)
                .ok()
                .filter(|&v| scale.contains(v))
                .map(|v| (question_id, v))
                .ok_or(ScoringError::OutOfRange {
                    instrument,
                    question_id,
                    value,
                    min: scale.min,
                    max: scale.max,
                })
        })
        .collect()
}

/// Reject unknown ids and out-of-scale values, then require every id in
/// `question_ids` to be answered.
pub(crate) fn check_answers(
    instrument: InstrumentKind,
    question_ids: &[QuestionId],
    scale: &ResponseScale,
    answers: &Responses,
) -> Result<(), ScoringError> {
    for (&question_id, &value) in answers {
        if !question_ids.contains(&question_id) {
            return Err(ScoringError::UnknownQuestion {
                instrument,
                question_id,
            });
        }
        if !scale.contains(value) {
            return Err(ScoringError::OutOfRange {
                instrument,
                question_id,
                value: i64::from(value),
                min: scale.min,
                max: scale.max,
            });
        }
    }

    let missing: Vec<QuestionId> = question_ids
        .iter()
        .copied()
        .filter(|id| !answers.contains_key(id))
        .collect();
    if !missing.is_empty() {
        return Err(ScoringError::IncompleteInput {
            instrument,
            missing,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn likert() -> ResponseScale {
        ResponseScale {
            min: 1,
            max: 5,
            labels: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
        }
    }

    #[test]
    fn reverse_is_an_involution() {
        let scale = likert();
        for value in 1..=5 {
            assert_eq!(scale.reverse(scale.reverse(value)), value);
        }
        assert_eq!(scale.reverse(1), 5);
        assert_eq!(scale.reverse(2), 4);
        assert_eq!(scale.reverse(3), 3);
    }

    #[test]
    fn labels_are_offset_by_scale_min() {
        let scale = likert();
        assert_eq!(scale.label(1), Some("a"));
        assert_eq!(scale.label(5), Some("e"));
        assert_eq!(scale.label(0), None);
        assert_eq!(scale.label(6), None);
    }

    #[test]
    fn missing_ids_are_listed_in_table_order() {
        let answers = Responses::from([(2, 3)]);
        let err = check_answers(InstrumentKind::SelfCompassion, &[3, 1, 2], &likert(), &answers)
            .unwrap_err();
        match err {
            ScoringError::IncompleteInput { missing, .. } => assert_eq!(missing, vec![3, 1]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_scale_value_is_rejected_before_completeness() {
        let answers = Responses::from([(1, 9)]);
        let err =
            check_answers(InstrumentKind::SelfCompassion, &[1, 2], &likert(), &answers).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::OutOfRange {
                question_id: 1,
                value: 9,
                ..
            }
        ));
    }

    #[test]
    fn fitting_keeps_values_on_the_scale() {
        let raw = RawResponses::from([(1, 1), (2, 5)]);
        let fitted = fit_to_scale(InstrumentKind::SelfCompassion, &likert(), &raw).unwrap();
        assert_eq!(fitted, Responses::from([(1, 1), (2, 5)]));
    }

    #[test]
    fn fitting_rejects_values_beyond_u8() {
        for value in [300, -1, 6, 0] {
            let raw = RawResponses::from([(1, 3), (2, value)]);
            let err = fit_to_scale(InstrumentKind::SelfCompassion, &likert(), &raw).unwrap_err();
            assert_eq!(
                err,
                ScoringError::OutOfRange {
                    instrument: InstrumentKind::SelfCompassion,
                    question_id: 2,
                    value,
                    min: 1,
                    max: 5,
                }
            );
        }
    }
}
