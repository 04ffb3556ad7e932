//! API handlers for the estimator server
//!
//! Provides REST endpoints for:
//! - Estimates (`/api/calculate`)
//! - PDF reports (`/api/report`)
//! - Emailed reports (`/api/send-email`)
//! - Grade listing (`/api/grades`)

use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use calc_core::calculations::{estimate, EstimationResult};
use calc_core::materials::{ConcreteGrade, MixDesign};
use calc_core::pdf::render_report_pdf;
use calc_core::report::{Report, REPORT_FILE_NAME};
use calc_core::validation::BuildingRequest;

use crate::email::validate_recipient;
use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "calc_server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// One concrete grade and its mix
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeInfo {
    pub grade: ConcreteGrade,
    pub mix_design: MixDesign,
}

/// Handler: GET /api/grades
pub async fn handle_list_grades() -> Json<Vec<GradeInfo>> {
    Json(
        ConcreteGrade::ALL
            .into_iter()
            .map(|grade| GradeInfo {
                grade,
                mix_design: grade.mix_design(),
            })
            .collect(),
    )
}

/// Handler: POST /api/calculate
pub async fn handle_calculate(
    payload: Result<Json<BuildingRequest>, JsonRejection>,
) -> Result<Json<EstimationResult>, ServerError> {
    let Json(request) = payload.map_err(reject)?;
    debug!("Calculate request: {:?}", request);

    let params = request.validate()?;
    let result = estimate(&params);

    info!(
        building_type = %params.building_type,
        grade = %params.concrete_grade,
        floors = params.floors,
        total_cost = result.costs.total,
        "Estimate computed"
    );

    Ok(Json(result))
}

/// Handler: POST /api/report
pub async fn handle_report(
    State(state): State<AppState>,
    payload: Result<Json<EstimationResult>, JsonRejection>,
) -> Result<Response, ServerError> {
    let Json(result) = payload.map_err(reject)?;
    let report = Report::new(result);
    info!(report_id = %report.id, "Report requested");

    let (_, pdf) = render_pdf(report, state.config.render_timeout).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", REPORT_FILE_NAME),
            ),
        ],
        pdf,
    )
        .into_response())
}

/// Email request body
#[derive(Deserialize)]
pub struct SendEmailRequest {
    pub email: String,
    pub result: EstimationResult,
}

/// Email response body
#[derive(Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub id: String,
}

/// Handler: POST /api/send-email
pub async fn handle_send_email(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, ServerError> {
    let Json(request) = payload.map_err(reject)?;
    validate_recipient(&request.email)?;

    let report = Report::new(request.result);
    info!(report_id = %report.id, mailer = state.mailer.describe(), "Email requested");

    let (report, pdf) = render_pdf(report, state.config.render_timeout).await?;
    let receipt = state.mailer.send_report(&request.email, &report, &pdf).await?;

    Ok(Json(SendEmailResponse {
        success: true,
        id: receipt.id,
    }))
}

/// Malformed or mistyped bodies are the client's fault
fn reject(rejection: JsonRejection) -> ServerError {
    ServerError::InvalidRequest(rejection.body_text())
}

/// Render on the blocking pool, bounded by `timeout`
async fn render_pdf(report: Report, timeout: Duration) -> Result<(Report, Vec<u8>), ServerError> {
    let task = tokio::task::spawn_blocking(move || {
        let pdf = render_report_pdf(&report);
        (report, pdf)
    });

    match tokio::time::timeout(timeout, task).await {
        Err(_) => Err(ServerError::Timeout(timeout.as_millis() as u64)),
        Ok(Err(join_error)) => Err(ServerError::Internal(format!(
            "Render task failed: {}",
            join_error
        ))),
        Ok(Ok((report, pdf))) => Ok((report, pdf?)),
    }
}
