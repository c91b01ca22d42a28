//! Output endpoints: the preview projection and the two output actions.
//!
//! Both actions freeze the record through a scoped `OutputGuard` and render
//! from the snapshot taken under the lock, so the output cannot diverge from
//! what the clerk saw. The guard releases the lock on every exit path;
//! collaborator failures answer 500 instead of leaving the editor frozen.

use actix_web::http::header::ContentDisposition;
use actix_web::{web, HttpResponse, Responder};

use super::common::output_filename;
use super::preview::CertificatePreview;
use super::{RenderedCertificate, TypstRenderEngine};
use crate::certificate::store::OutputGuard;
use crate::state::AppState;
use crate::ErrorResponse;

#[utoipa::path(
    get,
    path = "/api/birth-certificate/preview",
    tag = "Birth Certificate",
    responses(
        (status = 200, description = "Print-styled projection of the current record", body = CertificatePreview)
    )
)]
pub async fn get_preview(state: web::Data<AppState>) -> impl Responder {
    let preview = {
        let store = state.store.read();
        CertificatePreview::project(store.record())
    };
    HttpResponse::Ok().json(preview)
}

fn render_snapshot(state: &AppState, guard: &OutputGuard) -> Result<RenderedCertificate, HttpResponse> {
    let record = guard.snapshot();
    let preview = CertificatePreview::project(record);
    let source = state.template.render(&preview);
    let filename = output_filename(record);

    TypstRenderEngine::render(&source, &filename).map_err(|e| {
        log::error!("Certificate rendering failed: {}", e);
        HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Certificate rendering failed"))
    })
}

async fn clear_draft_after_output(state: &AppState) {
    if let Err(e) = state.draft.remove().await {
        log::warn!("Failed to remove draft slot after output: {}", e);
    }
}

#[utoipa::path(
    post,
    path = "/api/birth-certificate/export",
    tag = "Birth Certificate",
    responses(
        (status = 200, description = "Single-page A4 PDF named {firstToken}_{year}.pdf", content_type = "application/pdf"),
        (status = 409, description = "An output action is already in flight", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn export_certificate(state: web::Data<AppState>) -> impl Responder {
    let Some(guard) = OutputGuard::acquire(&state.store) else {
        return HttpResponse::Conflict().json(ErrorResponse::locked());
    };

    let rendered = match render_snapshot(&state, &guard) {
        Ok(rendered) => rendered,
        Err(response) => return response,
    };

    clear_draft_after_output(&state).await;
    log::info!("Exported certificate {}", rendered.filename);

    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition::attachment(rendered.filename))
        .body(rendered.pdf)
    // guard drops here: lock released on every path
}

#[utoipa::path(
    post,
    path = "/api/birth-certificate/print",
    tag = "Birth Certificate",
    responses(
        (status = 200, description = "Certificate handed to the print spooler"),
        (status = 409, description = "An output action is already in flight", body = ErrorResponse),
        (status = 500, description = "Rendering or spooling failed", body = ErrorResponse)
    )
)]
pub async fn print_certificate(state: web::Data<AppState>) -> impl Responder {
    let Some(guard) = OutputGuard::acquire(&state.store) else {
        return HttpResponse::Conflict().json(ErrorResponse::locked());
    };

    let rendered = match render_snapshot(&state, &guard) {
        Ok(rendered) => rendered,
        Err(response) => return response,
    };

    if let Err(e) = state.spooler.spool(&rendered.pdf, &rendered.filename) {
        log::error!("Print spooling failed: {}", e);
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::internal_error("Print spooling failed"));
    }

    clear_draft_after_output(&state).await;
    log::info!("Printed certificate {}", rendered.filename);

    HttpResponse::Ok().finish()
}
