use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use wellcheck_core::models::instrument::InstrumentKind;
use wellcheck_core::models::respondent::{Respondent, RespondentForm};
use wellcheck_instruments::scoring::{RawResponses, ScoreBand};
use wellcheck_instruments::{instrument, Evaluation};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub respondent: Option<RespondentForm>,
    /// Unbounded integers; fitted to the instrument's scale before scoring.
    pub answers: RawResponses,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respondent: Option<Respondent>,
    pub results: Evaluation,
    pub bands: Vec<ScoreBand>,
    /// Set when any result is high enough to recommend professional support.
    pub referral: bool,
    pub summary: String,
}

pub async fn evaluate_instrument(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let kind: InstrumentKind = id.parse()?;
    let Json(request) = payload?;

    let respondent = match request.respondent {
        Some(form) => Some(form.validate()?),
        None if state.config.require_respondent => {
            return Err(ApiError::BadRequest("respondent is required".to_string()));
        }
        None => None,
    };

    let instrument = instrument(kind, state.config.table_revision);
    let answers = instrument.fit_answers(&request.answers)?;
    let results =
        wellcheck_instruments::evaluate(kind, state.config.table_revision, &answers)?;
    let referral = results.suggests_referral();

    tracing::info!(instrument = %kind, referral, "evaluation served");

    Ok(Json(EvaluateResponse {
        respondent,
        bands: results.bands(),
        referral,
        summary: instrument.to_structured_input(&results),
        results,
    }))
}
