//! Blank installation form to be filled by hand, optionally seeded with a
//! machine's catalog specs

use super::{Document, Section};
use crate::{
    models::machine::{MachineSpecs, WATER_SYSTEM_PLUMBED},
    wizard::steps::LAST_STEP,
};

/// Rows left blank for units when no quantity is known
const BLANK_UNIT_ROWS: usize = 3;

pub fn render(specs: Option<&MachineSpecs>) -> Document {
    let identity = Section::new("Identificação")
        .checkbox("Cliente", None)
        .checkbox("Evento", None)
        .blank_line("Nome do cliente / evento")
        .blank_line("Data de instalação")
        .blank_line("Data de retirada")
        .blank_line("Responsável")
        .blank_line("Telefone")
        .blank_line("Endereço");

    let equipment = match specs {
        Some(specs) => Section::new("Equipamento")
            .field("Máquina", Some(specs.name.as_str()))
            .field("Modelo", specs.variant_name.as_deref())
            .field("Marca", specs.brand.as_deref())
            .field("Voltagem", specs.voltage.as_deref())
            .field("Amperagem", specs.amperage.as_deref())
            .field("Sistema de água", specs.water_system.as_deref())
            .field("Dimensões", specs.dimensions.as_deref())
            .field("Peso", specs.weight.as_deref())
            .field("Reservatório", specs.reservoir_capacity.as_deref()),
        None => Section::new("Equipamento")
            .blank_line("Máquina")
            .blank_line("Modelo")
            .blank_line("Voltagem"),
    }
    .blank_line("Quantidade")
    .table(
        &["#", "Voltagem", "Série", "Patrimônio"],
        (1..=BLANK_UNIT_ROWS)
            .map(|i| vec![i.to_string(), String::new(), String::new(), String::new()])
            .collect(),
    );

    // Water and steam come pre-ticked from the catalog; sewage is always
    // confirmed on site
    let technical = Section::new("Instalação técnica")
        .checkbox(
            "Instalação hídrica",
            specs.map(|s| s.water_system.as_deref() == Some(WATER_SYSTEM_PLUMBED)),
        )
        .checkbox("Esgoto", None)
        .checkbox("Vaporizador", specs.map(|s| s.has_steamer))
        .checkbox("Sistema de pagamento", None);

    let lists = ["Ferramentas", "Preparações", "Bebidas", "Acessórios", "Insumos"]
        .into_iter()
        .map(|heading| {
            Section::new(heading).table(
                &["Item", "Quantidade"],
                (0..5).map(|_| vec![String::new(), String::new()]).collect(),
            )
        });

    let validation = Section::new("Validação do local")
        .checkbox("Tomada adequada", None)
        .checkbox("Ponto de água", None)
        .checkbox("Espaço adequado", None)
        .blank_line("Acesso")
        .blank_line("Validado por");

    let closing = Section::new("Encerramento")
        .blank_line("Contrato")
        .blank_line("Observações")
        .signature("Técnico responsável")
        .signature("Cliente");

    let mut sections = vec![identity, equipment, technical];
    sections.extend(lists);
    sections.push(validation);
    sections.push(closing);

    Document {
        title: "Checklist de Instalação".to_string(),
        subtitle: specs.map(|s| match &s.variant_name {
            Some(variant) => format!("{} ({})", s.name, variant),
            None => s.name.clone(),
        }),
        sections,
        footer: Some(format!("Amiste Café - formulário de {} etapas", LAST_STEP)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::Block;

    #[test]
    fn test_blank_form_without_machine() {
        let doc = render(None);
        assert_eq!(doc.subtitle, None);
        let technical = doc.sections.iter().find(|s| s.heading == "Instalação técnica").unwrap();
        assert!(technical
            .blocks
            .iter()
            .all(|b| matches!(b, Block::Checkbox { checked: None, .. })));
        assert!(doc.to_plain_text().contains("Máquina: ____"));
    }

    #[test]
    fn test_seeded_form_prints_specs() {
        let specs = MachineSpecs {
            machine_id: 1,
            name: "Saeco Aulika".into(),
            variant_name: Some("Aulika 110".into()),
            voltage: Some("110v".into()),
            water_system: Some("Reservatório".into()),
            has_steamer: true,
            ..Default::default()
        };
        let doc = render(Some(&specs));
        let text = doc.to_plain_text();
        assert_eq!(doc.subtitle.as_deref(), Some("Saeco Aulika (Aulika 110)"));
        assert!(text.contains("Voltagem: 110v"));
        assert!(text.contains("Peso: -"));
        assert!(text.contains("[-] Instalação hídrica"));
        assert!(text.contains("[x] Vaporizador"));
        assert!(text.contains("[ ] Esgoto"));
    }
}
