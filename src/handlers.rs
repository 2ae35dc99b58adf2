use crate::errors::AppError;
use crate::models::{DisplaySnapshot, HealthResponse};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.display.snapshot()?;
    Ok(Html(render_index(&snapshot)))
}

pub async fn get_display(State(state): State<AppState>) -> Result<Json<DisplaySnapshot>, AppError> {
    Ok(Json(state.display.snapshot()?))
}

pub async fn get_health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    Ok(Json(state.stats.report()?))
}
