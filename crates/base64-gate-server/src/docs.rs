// ABOUTME: OpenAPI description of the base64-gate API, generated from handler annotations.
// ABOUTME: Browsable at /docs, served as JSON at /docs/openapi.json and printed by the CLI.

use askama::Template;
use askama_derive_axum::IntoResponse as AskamaIntoResponse;
use axum::Json;
use axum::extract::State;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};

use crate::api::codec::{CodecRequest, CodecResponse};
use crate::api::error::MessageBody;
use crate::app_state::SharedState;
use crate::auth::API_KEY_HEADER;

/// Name of the security scheme referenced by protected operations.
pub const API_KEY_SCHEME: &str = "apiKeyAuth";

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/docs/openapi.json";

const DOCS_TITLE: &str = "Base64 Encoder/Decoder API";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Base64 Encoder/Decoder API",
        version = "1.0.0",
        description = "A simple API to encode and decode Base64 strings"
    ),
    paths(
        crate::routes::root,
        crate::api::codec::encode,
        crate::api::codec::decode
    ),
    components(schemas(CodecRequest, CodecResponse, MessageBody)),
    modifiers(&ApiKeyAddon),
    tags((name = "codec", description = "Base64 text transforms"))
)]
pub struct ApiDoc;

struct ApiKeyAddon;

impl Modify for ApiKeyAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            API_KEY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

/// Build the OpenAPI document advertising `public_base_url` as the server.
pub fn build_openapi(public_base_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(public_base_url)]);
    doc
}

/// Interactive API explorer that loads the JSON document from `spec_url`.
#[derive(Template, AskamaIntoResponse)]
#[template(path = "docs.html")]
pub struct DocsPage {
    pub title: &'static str,
    pub spec_url: &'static str,
}

/// GET /docs - Render the interactive API docs.
pub async fn docs_page() -> DocsPage {
    DocsPage {
        title: DOCS_TITLE,
        spec_url: OPENAPI_JSON_PATH,
    }
}

/// GET /docs/openapi.json - The OpenAPI document as JSON.
pub async fn openapi_json(State(state): State<SharedState>) -> Json<utoipa::openapi::OpenApi> {
    Json(state.openapi.clone())
}
