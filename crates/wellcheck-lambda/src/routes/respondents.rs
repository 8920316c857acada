use axum::extract::rejection::JsonRejection;
use axum::Json;

use wellcheck_core::models::respondent::{Respondent, RespondentForm};

use crate::error::ApiError;

/// Check an intake form and hand back the normalised identity.
pub async fn validate_respondent(
    payload: Result<Json<RespondentForm>, JsonRejection>,
) -> Result<Json<Respondent>, ApiError> {
    let Json(form) = payload?;
    let respondent = form.validate()?;
    Ok(Json(respondent))
}
