use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod certificate;
pub mod config;
pub mod draft;
pub mod registry;
pub mod renderer;
pub mod state;

pub use crate::state::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }

    pub fn locked() -> Self {
        Self::new("Locked", "An output action is already in flight")
    }
}

/// Editor routes for one certificate type, mounted at the path the registry
/// names for it. Only the birth-certificate editor exists today.
pub fn editor_scope(path: &str) -> actix_web::Scope {
    web::scope(path)
        .service(web::resource("/record").route(web::get().to(certificate::handlers::get_record)))
        .service(
            web::resource("/record/field").route(web::put().to(certificate::handlers::set_field)),
        )
        .service(
            web::resource("/record/same-address")
                .route(web::put().to(certificate::handlers::set_same_address)),
        )
        .service(
            web::resource("/record/clear")
                .route(web::post().to(certificate::handlers::clear_record)),
        )
        .service(web::resource("/preview").route(web::get().to(renderer::handlers::get_preview)))
        .service(
            web::resource("/print").route(web::post().to(renderer::handlers::print_certificate)),
        )
        .service(
            web::resource("/export").route(web::post().to(renderer::handlers::export_certificate)),
        )
}

pub async fn run() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::registry::list_certificates,
            crate::certificate::handlers::get_record,
            crate::certificate::handlers::set_field,
            crate::certificate::handlers::set_same_address,
            crate::certificate::handlers::clear_record,
            crate::renderer::handlers::get_preview,
            crate::renderer::handlers::export_certificate,
            crate::renderer::handlers::print_certificate
        ),
        components(
            schemas(
                certificate::model::CertificateRecord,
                certificate::model::Sex,
                certificate::model::FieldId,
                certificate::handlers::SetFieldRequest,
                certificate::handlers::SameAddressRequest,
                certificate::handlers::RecordResponse,
                renderer::preview::CertificatePreview,
                registry::CertificateKind,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Certificate Registry", description = "Available certificate types."),
            (name = "Birth Certificate", description = "Birth certificate editor, preview and outputs.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file
    let app_config = crate::config::AppConfig::from_env();
    let app_state = match AppState::new(&app_config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!(
                "Failed to start the certificate editor. Please check DRAFT_DIR and the static \
                 template directory. Error: {}",
                e
            );
            std::process::exit(1);
        }
    };

    let certificate_registry = registry::CertificateRegistry::with_defaults();

    log::info!("Starting server at http://{}", app_config.bind_addr);

    let bind_addr = app_config.bind_addr.clone();
    HttpServer::new(move || {
        let app_state = app_state.clone();
        let certificate_registry = certificate_registry.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        let mut api = web::scope("/api").service(
            web::resource("/certificates").route(web::get().to(registry::list_certificates)),
        );
        for kind in certificate_registry.kinds() {
            api = api.service(editor_scope(&kind.path));
        }

        App::new()
            .wrap(Compress::default())
            .wrap(cors)
            .app_data(app_state)
            .app_data(web::Data::new(certificate_registry.clone()))
            .service(api)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
