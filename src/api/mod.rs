//! API handlers for Amiste REST endpoints

pub mod auth;
pub mod checklists;
pub mod documents;
pub mod drafts;
pub mod health;
pub mod history;
pub mod machines;
pub mod openapi;
pub mod portfolios;
pub mod profiles;
pub mod recipes;
pub mod stock;
pub mod supplies;
pub mod wiki;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::profile::{Session, SessionClaims},
    AppState,
};

/// Extractor for the authenticated staff session.
///
/// Verifies the provider-issued bearer token, then loads the profile and
/// resolves its capabilities once for the whole request.
pub struct AuthenticatedUser(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = SessionClaims::from_token(token, &state.config.auth.jwt_secret, &state.config.auth.audience)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        let session = state.services.profiles.session_for(&claims).await?;
        Ok(AuthenticatedUser(session))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Session
        .route("/auth/me", get(auth::me))
        // Machines
        .route("/machines", get(machines::list_machines).post(machines::create_machine))
        .route(
            "/machines/:id",
            get(machines::get_machine)
                .put(machines::update_machine)
                .delete(machines::delete_machine),
        )
        .route("/machines/:id/specs", get(machines::get_machine_specs))
        .route("/machines/:id/variants", post(machines::add_variant))
        .route(
            "/machines/:id/variants/:variant_id",
            put(machines::update_variant).delete(machines::remove_variant),
        )
        // Checklist wizard drafts
        .route("/drafts", post(drafts::start_draft))
        .route("/drafts/:id", get(drafts::get_draft).delete(drafts::discard_draft))
        .route("/drafts/:id/commands", post(drafts::dispatch))
        .route("/drafts/:id/next", post(drafts::next_step))
        .route("/drafts/:id/prev", post(drafts::prev_step))
        .route("/drafts/:id/submit", post(drafts::submit_draft))
        // Checklists
        .route("/checklists", get(checklists::list_checklists))
        .route(
            "/checklists/:id",
            get(checklists::get_checklist).delete(checklists::delete_checklist),
        )
        .route("/checklists/:id/cancel", post(checklists::cancel_checklist))
        .route("/checklists/:id/document", get(checklists::checklist_document))
        // Printable forms
        .route("/documents/blank-form", get(documents::blank_form))
        // Supplies
        .route("/supplies", get(supplies::list_supplies).post(supplies::create_supply))
        .route(
            "/supplies/:id",
            get(supplies::get_supply)
                .put(supplies::update_supply)
                .delete(supplies::delete_supply),
        )
        // Portfolios
        .route("/portfolios", get(portfolios::list_portfolios).post(portfolios::create_portfolio))
        .route(
            "/portfolios/:id",
            get(portfolios::get_portfolio)
                .put(portfolios::update_portfolio)
                .delete(portfolios::delete_portfolio),
        )
        .route("/portfolios/:id/document", get(portfolios::portfolio_document))
        // Recipes
        .route("/recipes", get(recipes::list_recipes).post(recipes::create_recipe))
        .route(
            "/recipes/:id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        // Wiki
        .route("/wiki", get(wiki::search_solutions).post(wiki::create_solution))
        .route(
            "/wiki/:id",
            get(wiki::get_solution)
                .put(wiki::update_solution)
                .delete(wiki::delete_solution),
        )
        // Stock
        .route("/stock", get(stock::list_stock).post(stock::create_stock_item))
        .route(
            "/stock/:id",
            get(stock::get_stock_item)
                .put(stock::update_stock_item)
                .delete(stock::delete_stock_item),
        )
        .route("/stock/:id/count", post(stock::count_stock_item))
        // Profiles
        .route("/profiles", get(profiles::list_profiles))
        .route("/profiles/:id", get(profiles::get_profile))
        .route("/profiles/:id/role", put(profiles::update_role))
        // History
        .route("/history", get(history::list_history))
        .route("/history/stream", get(history::stream_history))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
