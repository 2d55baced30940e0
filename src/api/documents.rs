//! Printable form endpoints not tied to a stored record

use axum::{
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    documents::Document,
    error::AppResult,
    models::policy::{Action, Resource},
};

use super::AuthenticatedUser;

/// Output of a document endpoint: the JSON tree or its plain-text preview
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DocumentQuery {
    /// `json` (default) or `text`
    #[serde(default)]
    pub format: DocumentFormat,
}

/// Render a document in the requested format
pub fn respond(document: Document, format: DocumentFormat) -> Response {
    match format {
        DocumentFormat::Json => Json(document).into_response(),
        DocumentFormat::Text => (
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            document.to_plain_text(),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BlankFormQuery {
    /// Machine whose specs pre-fill the equipment section
    pub machine_id: Option<i32>,
    /// Variant of that machine
    pub variant_id: Option<Uuid>,
    /// `json` (default) or `text`
    #[serde(default)]
    pub format: DocumentFormat,
}

/// Blank installation form
#[utoipa::path(
    get,
    path = "/documents/blank-form",
    tag = "documents",
    security(("bearer_auth" = [])),
    params(BlankFormQuery),
    responses(
        (status = 200, description = "Document tree, or plain text with format=text", body = Document),
        (status = 404, description = "Machine or variant not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn blank_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Query(query): Query<BlankFormQuery>,
) -> AppResult<Response> {
    session.require(Resource::Checklists, Action::View)?;
    let document = state
        .services
        .checklists
        .blank_form(query.machine_id, query.variant_id)
        .await?;
    Ok(respond(document, query.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Section;

    fn sample() -> Document {
        Document {
            title: "Checklist".into(),
            subtitle: None,
            sections: vec![Section::new("Local").field("Cliente", None)],
            footer: None,
        }
    }

    #[test]
    fn test_text_format_renders_plain_text() {
        let response = respond(sample(), DocumentFormat::Text);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_json_is_the_default_format() {
        let query: DocumentQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.format, DocumentFormat::Json);
        let response = respond(sample(), query.format);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "application/json");
    }
}
