//! End-to-end tests of the editor API: field writes, the address mirror,
//! draft persistence, clear, preview, and output-lock release.

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tempfile::TempDir;

use birth_cert_server::certificate::OutputGuard;
use birth_cert_server::draft::{DraftStorage, FileDraftStorage};
use birth_cert_server::registry::{self, CertificateRegistry};
use birth_cert_server::renderer::{PrintError, PrintSpooler};
use birth_cert_server::{editor_scope, AppState};

/// Spooler that records job names instead of printing.
#[derive(Default)]
struct RecordingSpooler {
    jobs: Mutex<Vec<String>>,
}

impl PrintSpooler for RecordingSpooler {
    fn spool(&self, _pdf: &[u8], job_name: &str) -> Result<(), PrintError> {
        self.jobs.lock().push(job_name.to_string());
        Ok(())
    }
}

struct TestContext {
    state: web::Data<AppState>,
    draft_dir: TempDir,
    spooler: Arc<RecordingSpooler>,
}

async fn setup() -> TestContext {
    let draft_dir = tempfile::tempdir().unwrap();
    let draft: Arc<dyn DraftStorage> = Arc::new(FileDraftStorage::new(draft_dir.path()).unwrap());
    let spooler = Arc::new(RecordingSpooler::default());
    let state = AppState::new_with_collaborators(draft, spooler.clone())
        .await
        .unwrap();
    TestContext {
        state: web::Data::new(state),
        draft_dir,
        spooler,
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.state.clone())
                .app_data(web::Data::new(CertificateRegistry::with_defaults()))
                .service(
                    web::scope("/api")
                        .service(
                            web::resource("/certificates")
                                .route(web::get().to(registry::list_certificates)),
                        )
                        .service(editor_scope("/birth-certificate")),
                ),
        )
        .await
    };
}

fn draft_path(ctx: &TestContext) -> std::path::PathBuf {
    ctx.draft_dir.path().join("birth_cert_draft.json")
}

#[actix_web::test]
async fn test_list_certificates_and_search() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/certificates").to_request();
    let kinds: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(kinds.as_array().unwrap().len(), 1);
    assert_eq!(kinds[0]["id"], "birth");
    assert_eq!(kinds[0]["path"], "/birth-certificate");

    let req = test::TestRequest::get()
        .uri("/api/certificates?search=BIRTH")
        .to_request();
    let kinds: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(kinds.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/certificates?search=death")
        .to_request();
    let kinds: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(kinds.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn test_fresh_record_has_todays_reg_date() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/birth-certificate/record")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(body["record"]["regDate"], Value::String(today));
    assert_eq!(body["locked"], false);
    assert_eq!(body["sameAddress"], false);
}

#[actix_web::test]
async fn test_set_field_upper_cases_and_persists_draft() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "name", "value": "Asha Rao"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["record"]["name"], "ASHA RAO");

    // Accepted write is written through to the draft slot.
    let draft = std::fs::read_to_string(draft_path(&ctx)).unwrap();
    let draft: Value = serde_json::from_str(&draft).unwrap();
    assert_eq!(draft["name"], "ASHA RAO");
}

#[actix_web::test]
async fn test_over_limit_write_is_a_silent_no_op() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "regNo", "value": "X".repeat(31)}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get()
        .uri("/api/birth-certificate/record")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["record"]["regNo"], "");
    // A rejected write does not create a draft.
    assert!(!draft_path(&ctx).exists());
}

#[actix_web::test]
async fn test_same_address_mirror_via_api() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "birthAddr1", "value": "12 Main St"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/same-address")
        .set_json(json!({"enabled": true}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["record"]["permanentAddr1"], "12 MAIN ST");
    assert_eq!(body["sameAddress"], true);

    // Later birth-address edits keep flowing through.
    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "birthAddr2", "value": "Near Temple"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["record"]["permanentAddr2"], "NEAR TEMPLE");

    // Toggling off blanks the mirrored values.
    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/same-address")
        .set_json(json!({"enabled": false}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["record"]["permanentAddr1"], "");
    assert_eq!(body["record"]["permanentAddr2"], "");
    assert_eq!(body["record"]["birthAddr1"], "12 MAIN ST");
}

#[actix_web::test]
async fn test_clear_resets_record_and_removes_draft() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "name", "value": "Asha Rao"}))
        .to_request();
    test::call_service(&app, req).await;
    assert!(draft_path(&ctx).exists());

    let req = test::TestRequest::post()
        .uri("/api/birth-certificate/record/clear")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["record"]["name"], "");
    assert_eq!(body["record"]["regDate"], "");
    assert!(!draft_path(&ctx).exists());
}

#[actix_web::test]
async fn test_preview_formats_dates() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "dob", "value": "2020-03-15"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/birth-certificate/preview")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["dateOfBirth"], "15/03/2020");
    assert_eq!(body["header"][3], "BIRTH CERTIFICATE");
    assert_eq!(body["birthAddress"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn test_export_returns_named_pdf_and_clears_draft() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "name", "value": "Asha Rao"}))
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "dob", "value": "2020-03-15"}))
        .to_request();
    test::call_service(&app, req).await;
    assert!(draft_path(&ctx).exists());

    // With no `typst` binary on the test host the render step fails with
    // 500; with one installed the PDF comes back. Lock release and record
    // survival must hold either way.
    let req = test::TestRequest::post()
        .uri("/api/birth-certificate/export")
        .to_request();
    let resp = test::call_service(&app, req).await;

    if resp.status().is_success() {
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/pdf"
        );
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(disposition.contains("ASHA_2020.pdf"), "{disposition}");
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF"));
        // Successful export clears the draft slot.
        assert!(!draft_path(&ctx).exists());
    } else {
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Failed render leaves the draft intact.
        assert!(draft_path(&ctx).exists());
    }

    let req = test::TestRequest::get()
        .uri("/api/birth-certificate/record")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["locked"], false);
    // The in-memory record is not reset by the export.
    assert_eq!(body["record"]["name"], "ASHA RAO");
}

#[actix_web::test]
async fn test_output_actions_conflict_while_locked() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let guard = OutputGuard::acquire(&ctx.state.store).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/birth-certificate/print")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Locked");

    let req = test::TestRequest::post()
        .uri("/api/birth-certificate/export")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    drop(guard);

    // The editor accepts writes again once the action ends.
    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "name", "value": "Asha Rao"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["record"]["name"], "ASHA RAO");
}

#[actix_web::test]
async fn test_output_lock_is_released_on_every_path() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "name", "value": "Asha Rao"}))
        .to_request();
    test::call_service(&app, req).await;

    // With no `typst` binary on the test host this fails at the render
    // step; with one installed it succeeds and spools. The lock must be
    // released either way.
    let req = test::TestRequest::post()
        .uri("/api/birth-certificate/print")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let printed = resp.status().is_success();

    let req = test::TestRequest::get()
        .uri("/api/birth-certificate/record")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["locked"], false);
    // The in-memory record survives a completed output action.
    assert_eq!(body["record"]["name"], "ASHA RAO");

    if printed {
        // Successful print hands the job to the spooler and clears the draft.
        assert_eq!(*ctx.spooler.jobs.lock(), vec!["ASHA_YEAR.pdf".to_string()]);
        assert!(!draft_path(&ctx).exists());
    } else {
        // Failed render surfaces an error but leaves the draft intact.
        assert!(draft_path(&ctx).exists());
    }

    // The editor is still usable after the action.
    let req = test::TestRequest::put()
        .uri("/api/birth-certificate/record/field")
        .set_json(json!({"field": "name", "value": "New Name"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["record"]["name"], "NEW NAME");
}
