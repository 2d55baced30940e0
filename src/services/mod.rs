//! Business logic services

pub mod checklists;
pub mod drafts;
pub mod history;
pub mod machines;
pub mod portfolios;
pub mod profiles;
pub mod recipes;
pub mod stock;
pub mod supplies;
pub mod wiki;

use crate::{config::HistoryConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub profiles: profiles::ProfilesService,
    pub machines: machines::MachinesService,
    pub checklists: checklists::ChecklistsService,
    pub supplies: supplies::SuppliesService,
    pub portfolios: portfolios::PortfoliosService,
    pub recipes: recipes::RecipesService,
    pub wiki: wiki::WikiService,
    pub stock: stock::StockService,
    pub history: history::HistoryService,
    pub drafts: drafts::DraftStore,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository and draft store
    pub fn new(repository: Repository, drafts: drafts::DraftStore, history_config: &HistoryConfig) -> Self {
        let history = history::HistoryService::new(repository.clone(), history_config.channel_capacity);
        Self {
            profiles: profiles::ProfilesService::new(repository.clone(), history.clone()),
            machines: machines::MachinesService::new(repository.clone(), history.clone()),
            checklists: checklists::ChecklistsService::new(repository.clone(), drafts.clone(), history.clone()),
            supplies: supplies::SuppliesService::new(repository.clone(), history.clone()),
            portfolios: portfolios::PortfoliosService::new(repository.clone(), history.clone()),
            recipes: recipes::RecipesService::new(repository.clone(), history.clone()),
            wiki: wiki::WikiService::new(repository.clone(), history.clone()),
            stock: stock::StockService::new(repository.clone(), history.clone()),
            history,
            drafts,
            repository,
        }
    }

    /// Check that Postgres and Redis both answer
    pub async fn ready(&self) -> AppResult<()> {
        self.repository.ping().await?;
        self.drafts.ping().await
    }
}
