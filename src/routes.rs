//! HTTP surface over the report pipeline.
//!
//! Only the delete path maps error kinds to HTTP statuses; create and
//! resend answer 200 with the error embedded in the body, so callers must
//! inspect the body to detect most failures.

use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;

use crate::error::AppError;
use crate::service::ReportPipeline;

#[derive(Debug, serde::Deserialize)]
pub struct SeoRequest {
    pub url: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct SendReportRequest {
    pub report_id: String,
    pub to: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct DeleteReportRequest {
    pub report_id: String,
}

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(json!({ "status": "ok" }))
}

#[post("/seo-report")]
async fn seo_report(
    payload: web::Json<SeoRequest>,
    pipeline: web::Data<ReportPipeline>,
) -> actix_web::Result<impl Responder> {
    match pipeline.generate_report(&payload.url).await {
        Ok(report) => Ok(HttpResponse::Ok().json(report)),
        Err(e) => {
            log::error!("[ROUTES] report generation failed: {}", e);
            Ok(HttpResponse::Ok().json(json!({ "error": e.to_string() })))
        }
    }
}

#[post("/send-seo-report")]
async fn send_seo_report(
    payload: web::Json<SendReportRequest>,
    pipeline: web::Data<ReportPipeline>,
) -> actix_web::Result<impl Responder> {
    let req = payload.into_inner();
    match pipeline.resend_report(&req.report_id, &req.to).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "status": "sent" }))),
        Err(e @ AppError::NotFound(_)) => {
            Ok(HttpResponse::Ok().json(json!({ "error": e.to_string() })))
        }
        Err(e) => {
            log::error!("[ROUTES] resend failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })))
        }
    }
}

#[post("/delete-seo-report")]
async fn delete_seo_report(
    payload: web::Json<DeleteReportRequest>,
    pipeline: web::Data<ReportPipeline>,
) -> actix_web::Result<impl Responder> {
    match pipeline.delete_report(&payload.report_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "status": "deleted" }))),
        Err(e @ AppError::Validation(_)) => {
            Ok(HttpResponse::BadRequest().json(json!({ "error": e.to_string() })))
        }
        Err(e @ AppError::NotFound(_)) => {
            Ok(HttpResponse::NotFound().json(json!({ "error": e.to_string() })))
        }
        Err(e) => {
            log::error!("[ROUTES] delete failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(json!({ "error": e.to_string() })))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(seo_report)
        .service(send_seo_report)
        .service(delete_seo_report);
}
