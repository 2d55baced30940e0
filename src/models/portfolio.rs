//! Portfolio (sales proposal) model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use validator::Validate;

use super::{
    enums::PortfolioStatus,
    money::{checked_mul, checked_sub, checked_sum},
};
use crate::error::{AppError, AppResult};

/// One priced line of a proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProposalLine {
    pub description: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

impl ProposalLine {
    pub fn total(&self) -> AppResult<Decimal> {
        checked_mul(self.unit_price, Decimal::from(self.quantity))
    }
}

/// Internal row structure for portfolio queries
#[derive(Debug, Clone, FromRow)]
pub struct PortfolioRow {
    id: i32,
    client_name: String,
    contact: Option<String>,
    machine_id: Option<i32>,
    lines: Json<Vec<ProposalLine>>,
    discount: Decimal,
    valid_until: Option<NaiveDate>,
    notes: Option<String>,
    status: PortfolioStatus,
    created_at: Option<DateTime<Utc>>,
}

impl From<PortfolioRow> for Portfolio {
    fn from(row: PortfolioRow) -> Self {
        Portfolio {
            id: row.id,
            client_name: row.client_name,
            contact: row.contact,
            machine_id: row.machine_id,
            lines: row.lines.0,
            discount: row.discount,
            valid_until: row.valid_until,
            notes: row.notes,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Portfolio {
    pub id: i32,
    pub client_name: String,
    pub contact: Option<String>,
    pub machine_id: Option<i32>,
    pub lines: Vec<ProposalLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: PortfolioStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Portfolio {
    pub fn subtotal(&self) -> AppResult<Decimal> {
        let totals = self
            .lines
            .iter()
            .map(ProposalLine::total)
            .collect::<AppResult<Vec<_>>>()?;
        checked_sum(totals)
    }

    /// Subtotal minus discount, never below zero
    pub fn total(&self) -> AppResult<Decimal> {
        Ok(checked_sub(self.subtotal()?, self.discount)?.max(Decimal::ZERO))
    }
}

/// Portfolio with computed totals, as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PortfolioView {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl TryFrom<Portfolio> for PortfolioView {
    type Error = AppError;

    fn try_from(portfolio: Portfolio) -> AppResult<Self> {
        Ok(Self {
            subtotal: portfolio.subtotal()?,
            total: portfolio.total()?,
            portfolio,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePortfolio {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,
    pub contact: Option<String>,
    pub machine_id: Option<i32>,
    #[serde(default)]
    pub lines: Vec<ProposalLine>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePortfolio {
    pub client_name: Option<String>,
    pub contact: Option<String>,
    pub machine_id: Option<i32>,
    pub lines: Option<Vec<ProposalLine>>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    pub valid_until: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: Option<PortfolioStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i32, cents: i64) -> ProposalLine {
        ProposalLine {
            description: "Locação".into(),
            quantity: qty,
            unit_price: Decimal::new(cents, 2),
        }
    }

    fn portfolio(lines: Vec<ProposalLine>, discount: Decimal) -> Portfolio {
        Portfolio {
            id: 1,
            client_name: "Padaria Central".into(),
            contact: None,
            machine_id: None,
            lines,
            discount,
            valid_until: None,
            notes: None,
            status: PortfolioStatus::Open,
            created_at: None,
        }
    }

    #[test]
    fn test_totals() {
        let p = Portfolio {
            id: 1,
            client_name: "Padaria Central".into(),
            contact: None,
            machine_id: None,
            lines: vec![line(2, 15000), line(1, 8990)],
            discount: Decimal::from(50),
            valid_until: None,
            notes: None,
            status: PortfolioStatus::Open,
            created_at: None,
        };
        assert_eq!(p.subtotal().unwrap(), Decimal::new(38990, 2));
        assert_eq!(p.total().unwrap(), Decimal::new(33990, 2));
    }

    #[test]
    fn test_total_never_negative() {
        let p = Portfolio {
            id: 1,
            client_name: "X".into(),
            contact: None,
            machine_id: None,
            lines: vec![line(1, 1000)],
            discount: Decimal::from(100),
            valid_until: None,
            notes: None,
            status: PortfolioStatus::Open,
            created_at: None,
        };
        assert_eq!(p.total().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_lines_are_rejected() {
        let huge = ProposalLine {
            description: "Lote".into(),
            quantity: 2,
            unit_price: "50000000000000000000000000000".parse().unwrap(),
        };
        assert!(matches!(huge.total(), Err(AppError::Validation(_))));

        let p = portfolio(vec![huge], Decimal::ZERO);
        assert!(matches!(p.subtotal(), Err(AppError::Validation(_))));
        assert!(PortfolioView::try_from(p).is_err());

        let ok = portfolio(vec![line(3, 1000)], Decimal::ZERO);
        assert_eq!(PortfolioView::try_from(ok).unwrap().total, Decimal::from(30));
    }
}
