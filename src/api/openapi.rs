//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, checklists, documents, drafts, health, history, machines, portfolios, profiles, recipes,
    stock, supplies, wiki,
};

/// Registers the bearer token scheme referenced by `security(("bearer_auth" = []))`
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Amiste API",
        version = "1.0.0",
        description = "Amiste Café machine rental and sales administration API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&BearerAuth),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Session
        auth::me,
        // Machines
        machines::list_machines,
        machines::get_machine,
        machines::get_machine_specs,
        machines::create_machine,
        machines::update_machine,
        machines::delete_machine,
        machines::add_variant,
        machines::update_variant,
        machines::remove_variant,
        // Drafts
        drafts::start_draft,
        drafts::get_draft,
        drafts::discard_draft,
        drafts::dispatch,
        drafts::next_step,
        drafts::prev_step,
        drafts::submit_draft,
        // Checklists
        checklists::list_checklists,
        checklists::get_checklist,
        checklists::cancel_checklist,
        checklists::delete_checklist,
        checklists::checklist_document,
        // Documents
        documents::blank_form,
        // Supplies
        supplies::list_supplies,
        supplies::get_supply,
        supplies::create_supply,
        supplies::update_supply,
        supplies::delete_supply,
        // Portfolios
        portfolios::list_portfolios,
        portfolios::get_portfolio,
        portfolios::create_portfolio,
        portfolios::update_portfolio,
        portfolios::delete_portfolio,
        portfolios::portfolio_document,
        // Recipes
        recipes::list_recipes,
        recipes::get_recipe,
        recipes::create_recipe,
        recipes::update_recipe,
        recipes::delete_recipe,
        // Wiki
        wiki::search_solutions,
        wiki::get_solution,
        wiki::create_solution,
        wiki::update_solution,
        wiki::delete_solution,
        // Stock
        stock::list_stock,
        stock::get_stock_item,
        stock::create_stock_item,
        stock::update_stock_item,
        stock::count_stock_item,
        stock::delete_stock_item,
        // Profiles
        profiles::list_profiles,
        profiles::get_profile,
        profiles::update_role,
        // History
        history::list_history,
        history::stream_history,
    ),
    components(
        schemas(
            // Session
            crate::models::profile::Session,
            crate::models::profile::Profile,
            crate::models::profile::UpdateRole,
            crate::models::policy::Role,
            crate::models::policy::Resource,
            crate::models::policy::Access,
            crate::models::policy::Capabilities,
            // Machines
            crate::models::machine::Machine,
            crate::models::machine::MachineVariant,
            crate::models::machine::MachineSpecs,
            crate::models::machine::CreateMachine,
            crate::models::machine::UpdateMachine,
            crate::models::machine::VariantInput,
            // Wizard
            crate::wizard::DraftSession,
            crate::wizard::DraftView,
            crate::wizard::DraftCommand,
            crate::wizard::ChecklistDraft,
            crate::wizard::MachineSnapshot,
            crate::wizard::WizardStep,
            crate::wizard::draft::Identity,
            crate::wizard::draft::Equipment,
            crate::wizard::draft::Technical,
            crate::wizard::draft::Financials,
            crate::wizard::draft::Contract,
            crate::wizard::draft::IdentityPatch,
            crate::wizard::draft::UnitPatch,
            crate::wizard::draft::TechnicalPatch,
            crate::wizard::draft::LocalValidationPatch,
            crate::wizard::draft::FinancialsPatch,
            crate::wizard::draft::QuantityInput,
            crate::wizard::draft::SelectionList,
            crate::wizard::draft::CustomList,
            drafts::SubmitRequest,
            drafts::SubmitResponse,
            drafts::NextResponse,
            // Checklists
            crate::models::checklist::Checklist,
            crate::models::checklist::ChecklistShort,
            crate::models::checklist::MachineUnit,
            crate::models::checklist::DrinksList,
            crate::models::checklist::AccessoriesList,
            crate::models::checklist::SuppliesList,
            crate::models::checklist::SupplySelection,
            crate::models::checklist::LocalValidation,
            crate::models::checklist::FinancialsRecord,
            crate::models::enums::InstallType,
            crate::models::enums::ChecklistStatus,
            crate::models::enums::SubmitStatus,
            crate::models::enums::YesNo,
            checklists::ChecklistsListResponse,
            // Documents
            crate::documents::Document,
            crate::documents::Section,
            crate::documents::Block,
            documents::DocumentFormat,
            // Supplies
            crate::models::supply::Supply,
            crate::models::supply::CreateSupply,
            crate::models::supply::UpdateSupply,
            // Portfolios
            crate::models::portfolio::Portfolio,
            crate::models::portfolio::PortfolioView,
            crate::models::portfolio::ProposalLine,
            crate::models::portfolio::CreatePortfolio,
            crate::models::portfolio::UpdatePortfolio,
            crate::models::enums::PortfolioStatus,
            // Recipes
            crate::models::recipe::Recipe,
            crate::models::recipe::Ingredient,
            crate::models::recipe::CreateRecipe,
            crate::models::recipe::UpdateRecipe,
            // Wiki
            crate::models::wiki::WikiSolution,
            crate::models::wiki::CreateWikiSolution,
            crate::models::wiki::UpdateWikiSolution,
            // Stock
            crate::models::stock::StockItem,
            crate::models::stock::StockItemView,
            crate::models::stock::CreateStockItem,
            crate::models::stock::UpdateStockItem,
            crate::models::stock::StockCount,
            // History
            crate::models::history::HistoryEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Current session"),
        (name = "machines", description = "Machine catalog and model variants"),
        (name = "drafts", description = "Installation checklist wizard"),
        (name = "checklists", description = "Saved installation checklists"),
        (name = "documents", description = "Printable forms"),
        (name = "supplies", description = "Supply catalog"),
        (name = "portfolios", description = "Sales proposals"),
        (name = "recipes", description = "Drink recipes"),
        (name = "wiki", description = "Maintenance solutions"),
        (name = "stock", description = "Stock counts"),
        (name = "profiles", description = "Staff administration"),
        (name = "history", description = "Audit history")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
