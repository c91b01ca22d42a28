//! Certificate-type registry: an immutable configuration table built once at
//! startup and handed to the routing layer, plus the dashboard listing
//! endpoint with its title search.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry of the registry: a certificate type and the path its editor is
/// mounted under.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CertificateKind {
    pub id: String,
    pub title: String,
    pub description: String,
    pub path: String,
}

/// Immutable table of available certificate types.
#[derive(Debug, Clone)]
pub struct CertificateRegistry {
    kinds: Vec<CertificateKind>,
}

impl CertificateRegistry {
    pub fn new(kinds: Vec<CertificateKind>) -> Self {
        Self { kinds }
    }

    /// The registry this deployment ships with: the birth-certificate editor.
    pub fn with_defaults() -> Self {
        Self::new(vec![CertificateKind {
            id: "birth".to_string(),
            title: "Birth Certificate".to_string(),
            description: "Registration of birth details".to_string(),
            path: "/birth-certificate".to_string(),
        }])
    }

    pub fn kinds(&self) -> &[CertificateKind] {
        &self.kinds
    }

    /// Case-insensitive title filter, as the dashboard search box applies.
    pub fn search(&self, query: &str) -> Vec<CertificateKind> {
        let needle = query.to_lowercase();
        self.kinds
            .iter()
            .filter(|k| k.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/certificates",
    tag = "Certificate Registry",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive title filter")
    ),
    responses(
        (status = 200, description = "Available certificate types", body = Vec<CertificateKind>)
    )
)]
pub async fn list_certificates(
    registry: web::Data<CertificateRegistry>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    let kinds = match &query.search {
        Some(q) => registry.search(q),
        None => registry.kinds().to_vec(),
    };
    HttpResponse::Ok().json(kinds)
}
