//! Repository layer for database operations

pub mod checklists;
pub mod history;
pub mod machines;
pub mod portfolios;
pub mod profiles;
pub mod recipes;
pub mod stock;
pub mod supplies;
pub mod wiki;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub machines: machines::MachinesRepository,
    pub checklists: checklists::ChecklistsRepository,
    pub supplies: supplies::SuppliesRepository,
    pub portfolios: portfolios::PortfoliosRepository,
    pub recipes: recipes::RecipesRepository,
    pub wiki: wiki::WikiRepository,
    pub stock: stock::StockRepository,
    pub profiles: profiles::ProfilesRepository,
    pub history: history::HistoryRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            machines: machines::MachinesRepository::new(pool.clone()),
            checklists: checklists::ChecklistsRepository::new(pool.clone()),
            supplies: supplies::SuppliesRepository::new(pool.clone()),
            portfolios: portfolios::PortfoliosRepository::new(pool.clone()),
            recipes: recipes::RecipesRepository::new(pool.clone()),
            wiki: wiki::WikiRepository::new(pool.clone()),
            stock: stock::StockRepository::new(pool.clone()),
            profiles: profiles::ProfilesRepository::new(pool.clone()),
            history: history::HistoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
