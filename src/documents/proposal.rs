//! Sales proposal document

use super::{format_brl, Document, Section, PLACEHOLDER};
use crate::{
    error::AppResult,
    models::{machine::Machine, portfolio::Portfolio},
};

pub fn render(portfolio: &Portfolio, machine: Option<&Machine>) -> AppResult<Document> {
    let client = Section::new("Cliente")
        .field("Cliente", Some(portfolio.client_name.as_str()))
        .field("Contato", portfolio.contact.as_deref())
        .field(
            "Validade",
            portfolio
                .valid_until
                .map(|d| d.format("%d/%m/%Y").to_string())
                .as_deref(),
        );

    let equipment = match machine {
        Some(m) => Section::new("Equipamento")
            .field("Máquina", Some(m.name.as_str()))
            .field("Marca", m.brand.as_deref())
            .field("Tipo", m.machine_type.as_deref())
            .field("Voltagem", m.voltage.as_deref()),
        None => Section::new("Equipamento").paragraph(PLACEHOLDER),
    };

    let rows = portfolio
        .lines
        .iter()
        .map(|line| {
            Ok(vec![
                line.description.clone(),
                line.quantity.to_string(),
                format_brl(line.unit_price),
                format_brl(line.total()?),
            ])
        })
        .collect::<AppResult<Vec<_>>>()?;

    let pricing = Section::new("Investimento")
        .table(&["Descrição", "Qtd.", "Valor unitário", "Total"], rows)
        .field("Subtotal", Some(format_brl(portfolio.subtotal()?).as_str()))
        .field("Desconto", Some(format_brl(portfolio.discount).as_str()))
        .field("Total", Some(format_brl(portfolio.total()?).as_str()));

    let mut sections = vec![client, equipment, pricing];
    if let Some(notes) = portfolio.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        sections.push(Section::new("Observações").paragraph(notes));
    }
    sections.push(Section::new("Aceite").signature("Cliente").signature("Amiste Café"));

    Ok(Document {
        title: format!("Proposta Comercial #{}", portfolio.id),
        subtitle: Some(format!("{} - {}", portfolio.client_name, portfolio.status)),
        sections,
        footer: Some("Amiste Café".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{enums::PortfolioStatus, portfolio::ProposalLine};
    use rust_decimal::Decimal;

    #[test]
    fn test_proposal_totals_and_placeholders() {
        let portfolio = Portfolio {
            id: 12,
            client_name: "Hotel Mar Azul".into(),
            contact: None,
            machine_id: None,
            lines: vec![ProposalLine {
                description: "Locação mensal".into(),
                quantity: 2,
                unit_price: Decimal::new(45000, 2),
            }],
            discount: Decimal::new(5000, 2),
            valid_until: None,
            notes: Some("  ".into()),
            status: PortfolioStatus::Open,
            created_at: None,
        };
        let doc = render(&portfolio, None).unwrap();
        let text = doc.to_plain_text();
        assert!(text.contains("Locação mensal | 2 | R$ 450,00 | R$ 900,00"));
        assert!(text.contains("Total: R$ 850,00"));
        assert!(text.contains("Contato: -"));
        assert!(!doc.sections.iter().any(|s| s.heading == "Observações"));
        assert_eq!(doc.subtitle.as_deref(), Some("Hotel Mar Azul - Aberta"));
    }
}
