//! Portfolios (sales proposals) service

use rust_decimal::Decimal;
use serde_json::json;
use validator::Validate;

use super::history::HistoryService;
use crate::{
    documents::{self, Document},
    error::{AppError, AppResult},
    models::{
        money::check_amount,
        portfolio::{CreatePortfolio, Portfolio, ProposalLine, UpdatePortfolio},
        profile::Session,
    },
    repository::Repository,
};

fn check_lines(lines: &[ProposalLine]) -> AppResult<()> {
    for line in lines {
        if line.description.trim().is_empty() {
            return Err(AppError::Validation("Proposal line description is required".to_string()));
        }
        if line.quantity < 1 {
            return Err(AppError::Validation("Proposal line quantity must be at least 1".to_string()));
        }
        check_amount("Proposal line price", &line.unit_price)?;
    }
    Ok(())
}

fn check_discount(discount: Option<&Decimal>) -> AppResult<()> {
    match discount {
        Some(discount) => check_amount("Discount", discount),
        None => Ok(()),
    }
}

#[derive(Clone)]
pub struct PortfoliosService {
    repository: Repository,
    history: HistoryService,
}

impl PortfoliosService {
    pub fn new(repository: Repository, history: HistoryService) -> Self {
        Self { repository, history }
    }

    pub async fn list(&self) -> AppResult<Vec<Portfolio>> {
        self.repository.portfolios.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Portfolio> {
        self.repository.portfolios.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreatePortfolio, session: &Session) -> AppResult<Portfolio> {
        data.validate()?;
        check_lines(&data.lines)?;
        check_discount(data.discount.as_ref())?;
        let portfolio = self.repository.portfolios.create(data).await?;
        self.history
            .note(
                session,
                "create",
                "portfolios",
                portfolio.id,
                json!({ "client_name": portfolio.client_name }),
            )
            .await;
        Ok(portfolio)
    }

    pub async fn update(&self, id: i32, data: &UpdatePortfolio, session: &Session) -> AppResult<Portfolio> {
        if let Some(lines) = &data.lines {
            check_lines(lines)?;
        }
        check_discount(data.discount.as_ref())?;
        let portfolio = self.repository.portfolios.update(id, data).await?;
        self.history
            .note(
                session,
                "update",
                "portfolios",
                id,
                json!({ "status": portfolio.status.as_str() }),
            )
            .await;
        Ok(portfolio)
    }

    pub async fn delete(&self, id: i32, session: &Session) -> AppResult<()> {
        self.repository.portfolios.delete(id).await?;
        self.history.note(session, "delete", "portfolios", id, json!({})).await;
        Ok(())
    }

    /// Printable proposal
    pub async fn proposal(&self, id: i32) -> AppResult<Document> {
        let portfolio = self.repository.portfolios.get_by_id(id).await?;
        let machine = match portfolio.machine_id {
            Some(machine_id) => self.repository.machines.find(machine_id).await?,
            None => None,
        };
        documents::proposal::render(&portfolio, machine.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(description: &str, quantity: i32, cents: i64) -> ProposalLine {
        ProposalLine {
            description: description.into(),
            quantity,
            unit_price: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn test_check_lines() {
        assert!(check_lines(&[]).is_ok());
        assert!(check_lines(&[line("Locação", 1, 0)]).is_ok());
        assert!(check_lines(&[line(" ", 1, 100)]).is_err());
        assert!(check_lines(&[line("Locação", 0, 100)]).is_err());
        assert!(check_lines(&[line("Locação", 1, -100)]).is_err());
        let huge = ProposalLine {
            unit_price: "50000000000000000000000000000".parse().unwrap(),
            ..line("Locação", 1, 0)
        };
        assert!(matches!(check_lines(&[huge]), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_check_discount() {
        assert!(check_discount(None).is_ok());
        assert!(check_discount(Some(&Decimal::from(50))).is_ok());
        assert!(check_discount(Some(&Decimal::from(-5))).is_err());
    }
}
