//! HTTP surface of the record store: field mutations, the address-mirror
//! flag, clear, and the record fetch the form view re-renders from.
//!
//! Rejected writes (over-limit, locked, unparseable) are silent no-ops: the
//! handler answers 200 with the unchanged record, matching the form's
//! "just don't let them type it" behavior.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::{CertificateRecord, FieldId};
use crate::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetFieldRequest {
    pub field: FieldId,
    pub value: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SameAddressRequest {
    pub enabled: bool,
}

/// Current editor state: the record plus the two auxiliary flags the form
/// needs to disable controls.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub record: CertificateRecord,
    pub same_address: bool,
    pub locked: bool,
}

fn current_state(state: &AppState) -> RecordResponse {
    let store = state.store.read();
    RecordResponse {
        record: store.record().clone(),
        same_address: store.same_address(),
        locked: store.locked(),
    }
}

/// Write-through of the current record to the draft slot. Persistence
/// failures are logged, never surfaced to the form.
async fn persist_draft(state: &AppState) {
    let snapshot = state.store.read().record().clone();
    if let Err(e) = state.draft.save(&snapshot).await {
        log::warn!("Failed to persist draft: {}", e);
    }
}

#[utoipa::path(
    get,
    path = "/api/birth-certificate/record",
    tag = "Birth Certificate",
    responses(
        (status = 200, description = "Current record and editor flags", body = RecordResponse)
    )
)]
pub async fn get_record(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(current_state(&state))
}

#[utoipa::path(
    put,
    path = "/api/birth-certificate/record/field",
    tag = "Birth Certificate",
    request_body = SetFieldRequest,
    responses(
        (status = 200, description = "Editor state after the write (unchanged if rejected)", body = RecordResponse)
    )
)]
pub async fn set_field(
    state: web::Data<AppState>,
    body: web::Json<SetFieldRequest>,
) -> impl Responder {
    let outcome = state.store.write().set_field(body.field, &body.value);
    if outcome.is_applied() {
        persist_draft(&state).await;
    }
    HttpResponse::Ok().json(current_state(&state))
}

#[utoipa::path(
    put,
    path = "/api/birth-certificate/record/same-address",
    tag = "Birth Certificate",
    request_body = SameAddressRequest,
    responses(
        (status = 200, description = "Editor state after the toggle", body = RecordResponse)
    )
)]
pub async fn set_same_address(
    state: web::Data<AppState>,
    body: web::Json<SameAddressRequest>,
) -> impl Responder {
    let outcome = state.store.write().set_same_address(body.enabled);
    if outcome.is_applied() {
        persist_draft(&state).await;
    }
    HttpResponse::Ok().json(current_state(&state))
}

#[utoipa::path(
    post,
    path = "/api/birth-certificate/record/clear",
    tag = "Birth Certificate",
    responses(
        (status = 200, description = "Editor state after the reset", body = RecordResponse)
    )
)]
pub async fn clear_record(state: web::Data<AppState>) -> impl Responder {
    state.store.write().clear();
    if let Err(e) = state.draft.remove().await {
        log::warn!("Failed to remove draft slot on clear: {}", e);
    }
    HttpResponse::Ok().json(current_state(&state))
}
