use crate::errors::AppError;
use crate::labels::{LabelFormat, DEFAULT_INPUT_FORMAT};
use crate::models::{ActivityReport, WorkoutSummary};
use crate::source::{load_activity, read_source};
use crate::state::AppState;
use crate::summary::summarize;
use crate::ui::{render_index, render_unavailable};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::warn;

pub async fn index(State(state): State<AppState>) -> Response {
    let config = &state.config;
    match load_activity(&config.data_path, &config.label_format).await {
        Ok(report) => Html(render_index(&report)).into_response(),
        Err(err) => {
            warn!("rendering dashboard without data: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(render_unavailable(&err.to_string())),
            )
                .into_response()
        }
    }
}

pub async fn get_activity(State(state): State<AppState>) -> Result<Json<ActivityReport>, AppError> {
    let config = &state.config;
    let report = load_activity(&config.data_path, &config.label_format).await?;
    Ok(Json(report))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<WorkoutSummary>, AppError> {
    let config = &state.config;
    let source = read_source(&config.data_path).await?;
    let Some(records) = source.records() else {
        return Err(AppError::bad_request(
            "summary is only computed for delimited activity logs",
        ));
    };

    let date_format = match &config.label_format {
        LabelFormat::Date { input, .. } => input.as_str(),
        LabelFormat::Raw => DEFAULT_INPUT_FORMAT,
    };
    Ok(Json(summarize(&records, date_format)))
}

pub async fn health() -> &'static str {
    "ok"
}
