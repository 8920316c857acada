use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use wellcheck_instruments::scoring::{QuestionInfo, ResponseScale};
use wellcheck_instruments::{all_instruments, get_instrument};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
    item_count: usize,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    scale: ResponseScale,
    questions: Vec<QuestionInfo>,
}

pub async fn list_instruments(State(state): State<AppState>) -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = all_instruments(state.config.table_revision)
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            item_count: i.questions().len(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let instrument = get_instrument(&id, state.config.table_revision)
        .ok_or_else(|| ApiError::NotFound(format!("instrument not found: {id}")))?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        scale: instrument.scale().clone(),
        questions: instrument.questions().to_vec(),
    }))
}
