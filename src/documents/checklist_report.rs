//! Filled installation report for a persisted checklist

use super::{format_brl, or_placeholder, Document, Section, PLACEHOLDER};
use crate::models::{
    checklist::{Checklist, Selection},
    enums::InstallType,
};

fn date(value: Option<chrono::NaiveDate>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn selection_rows(selection: &Selection) -> Vec<Vec<String>> {
    selection
        .iter()
        .map(|(item, value)| vec![item.clone(), or_placeholder(Some(value.as_str()))])
        .collect()
}

fn custom_rows(custom: &[String]) -> Vec<Vec<String>> {
    custom
        .iter()
        .map(|item| vec![item.clone(), PLACEHOLDER.to_string()])
        .collect()
}

fn list_section(heading: &str, selection: &Selection, custom: &[String], none_selected: bool) -> Section {
    let section = Section::new(heading);
    if none_selected {
        return section.paragraph("Nenhum item");
    }
    let mut rows = selection_rows(selection);
    rows.extend(custom_rows(custom));
    if rows.is_empty() {
        section.paragraph(PLACEHOLDER)
    } else {
        section.table(&["Item", "Quantidade"], rows)
    }
}

pub fn render(checklist: &Checklist) -> Document {
    let identity = match checklist.install_type {
        InstallType::Client => Section::new("Identificação")
            .field("Tipo", Some(checklist.install_type.as_str()))
            .field("Cliente", checklist.client_name.as_deref()),
        InstallType::Event => Section::new("Identificação")
            .field("Tipo", Some(checklist.install_type.as_str()))
            .field("Evento", checklist.event_name.as_deref())
            .field(
                "Dias de evento",
                checklist.event_days.map(|d| d.to_string()).as_deref(),
            )
            .field("Retirada", Some(date(checklist.pickup_date).as_str())),
    }
    .field("Data de instalação", Some(date(checklist.install_date).as_str()))
    .field("Responsável", checklist.responsible.as_deref())
    .field("Telefone", checklist.phone.as_deref())
    .field("Endereço", checklist.address.as_deref());

    let units = checklist
        .machine_units
        .iter()
        .enumerate()
        .map(|(i, unit)| {
            vec![
                (i + 1).to_string(),
                or_placeholder(Some(unit.voltage.as_str())),
                or_placeholder(Some(unit.serial.as_str())),
                or_placeholder(Some(unit.patrimony.as_str())),
            ]
        })
        .collect();

    let equipment = Section::new("Equipamento")
        .field("Máquina", checklist.machine_name.as_deref())
        .field("Quantidade", Some(checklist.quantity.to_string().as_str()))
        .table(&["#", "Voltagem", "Série", "Patrimônio"], units);

    let technical = Section::new("Instalação técnica")
        .checkbox("Instalação hídrica", Some(checklist.water_install.is_yes()))
        .checkbox("Esgoto", Some(checklist.sewage_install.is_yes()))
        .checkbox("Vaporizador", Some(checklist.steam_wand.is_yes()))
        .checkbox("Sistema de pagamento", Some(checklist.payment_system.is_yes()));

    let tools = list_section("Ferramentas", &checklist.tools_list, &[], false);
    let preparations = list_section("Preparações", &checklist.preparations, &[], false);
    let drinks = list_section(
        "Bebidas",
        &checklist.drinks_list.standard,
        &checklist.drinks_list.custom,
        false,
    );
    let accessories = list_section(
        "Acessórios",
        &checklist.accessories_list.standard,
        &checklist.accessories_list.custom,
        checklist.accessories_list.no_accessories,
    );

    let supplies = {
        let section = Section::new("Insumos");
        let list = &checklist.supplies_list;
        if list.no_supplies {
            section.paragraph("Nenhum item")
        } else {
            let mut rows: Vec<Vec<String>> = list
                .standard
                .iter()
                .flat_map(|(category, items)| {
                    items
                        .iter()
                        .filter(|(_, selection)| selection.active)
                        .map(move |(item, selection)| {
                            vec![category.clone(), item.clone(), or_placeholder(Some(selection.qty.as_str()))]
                        })
                })
                .collect();
            rows.extend(
                list.custom
                    .iter()
                    .map(|item| vec!["Outros".to_string(), item.clone(), PLACEHOLDER.to_string()]),
            );
            if rows.is_empty() {
                section.paragraph(PLACEHOLDER)
            } else {
                section.table(&["Categoria", "Item", "Quantidade"], rows)
            }
        }
    };

    let local = &checklist.local_validation;
    let validation = Section::new("Validação do local")
        .checkbox("Tomada adequada", Some(local.power_outlet.is_yes()))
        .checkbox("Ponto de água", Some(local.water_point.is_yes()))
        .checkbox("Espaço adequado", Some(local.space_ok.is_yes()))
        .field("Acesso", Some(local.access_notes.as_str()))
        .field("Validado por", Some(local.validated_by.as_str()));

    let f = &checklist.financials;
    let financials = Section::new("Financeiro")
        .field("Máquina", Some(format_brl(f.machine).as_str()))
        .field("Insumos", Some(format_brl(f.supplies).as_str()))
        .field("Serviços", Some(format_brl(f.services).as_str()))
        .field("Extras", Some(format_brl(f.extras).as_str()))
        .field("Total", Some(format_brl(f.total).as_str()));

    let closing = Section::new("Encerramento")
        .field("Contrato", checklist.contract_num.as_deref())
        .field("Observações", checklist.notes.as_deref())
        .signature("Técnico responsável")
        .signature("Cliente");

    Document {
        title: format!("Checklist de Instalação #{}", checklist.id),
        subtitle: Some(format!(
            "{} - {}",
            or_placeholder(checklist.display_name()),
            checklist.status
        )),
        sections: vec![
            identity,
            equipment,
            technical,
            tools,
            preparations,
            drinks,
            accessories,
            supplies,
            validation,
            financials,
            closing,
        ],
        footer: Some("Amiste Café".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        checklist::{ChecklistShort, MachineUnit, SupplySelection},
        enums::{ChecklistStatus, YesNo},
    };
    use crate::documents::Block;
    use rust_decimal::Decimal;

    fn checklist() -> Checklist {
        let record: serde_json::Value = serde_json::json!({
            "id": 5,
            "install_type": "Evento",
            "client_name": null,
            "event_name": "Feira do Café",
            "install_date": "2026-03-10",
            "pickup_date": null,
            "event_days": 3,
            "responsible": null,
            "phone": null,
            "address": null,
            "quantity": 2,
            "machine_id": 1,
            "machine_name": "Saeco Aulika",
            "water_install": "Sim",
            "sewage_install": "Não",
            "steam_wand": "Sim",
            "payment_system": "Não",
            "machine_units": [
                {"voltage": "220v", "serial": "SN1", "patrimony": ""},
                {"voltage": "110v", "serial": "", "patrimony": "P-2"}
            ],
            "tools_list": {},
            "preparations": {},
            "drinks_list": {"standard": {"Espresso": "1"}, "custom": ["Mocha"]},
            "accessories_list": {"standard": {}, "custom": [], "noAccessories": true},
            "supplies_list": {"standard": {}, "custom": [], "noSupplies": false},
            "local_validation": {
                "power_outlet": "Sim", "water_point": "Não", "space_ok": "Sim",
                "access_notes": "", "validated_by": ""
            },
            "financials": {"machine": 1500.0, "supplies": 0.0, "services": 200.0, "extras": 0.0, "total": 1700.0},
            "contract_num": "C-100",
            "notes": null,
            "status": "Finalizado",
            "created_by": null,
            "created_at": null
        });
        serde_json::from_value(record).unwrap()
    }

    fn section<'a>(doc: &'a Document, heading: &str) -> &'a Section {
        doc.sections.iter().find(|s| s.heading == heading).unwrap()
    }

    #[test]
    fn test_missing_values_render_placeholders() {
        let doc = render(&checklist());
        let text = doc.to_plain_text();
        assert!(text.contains("Responsável: -"));
        assert!(text.contains("Retirada: -"));
        assert!(text.contains("Dias de evento: 3"));
        assert!(text.contains("Data de instalação: 10/03/2026"));
        assert!(text.contains("1 | 220v | SN1 | -"));
        assert!(text.contains("Total: R$ 1.700,00"));
        assert_eq!(doc.subtitle.as_deref(), Some("Feira do Café - Finalizado"));
    }

    #[test]
    fn test_lists() {
        let doc = render(&checklist());
        assert_eq!(
            section(&doc, "Acessórios").blocks,
            vec![Block::Paragraph { text: "Nenhum item".into() }]
        );
        assert_eq!(
            section(&doc, "Ferramentas").blocks,
            vec![Block::Paragraph { text: "-".into() }]
        );
        match &section(&doc, "Bebidas").blocks[0] {
            Block::Table { rows, .. } => {
                assert_eq!(rows[0], vec!["Espresso".to_string(), "1".to_string()]);
                assert_eq!(rows[1], vec!["Mocha".to_string(), "-".to_string()]);
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_only_active_supplies_are_listed() {
        let mut record = checklist();
        let mut items = indexmap::IndexMap::new();
        items.insert("Grão 1kg".to_string(), SupplySelection { active: true, qty: "4".into() });
        items.insert("Moído 500g".to_string(), SupplySelection { active: false, qty: "9".into() });
        record.supplies_list.standard.insert("Cafés".to_string(), items);

        let doc = render(&record);
        match &section(&doc, "Insumos").blocks[0] {
            Block::Table { rows, .. } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0][1], "Grão 1kg");
            }
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_client_report_has_no_event_fields() {
        let mut record = checklist();
        record.install_type = InstallType::Client;
        record.client_name = Some("Padaria Central".into());
        record.machine_units = vec![MachineUnit::default()];
        record.water_install = YesNo::No;
        record.status = ChecklistStatus::Draft;
        record.financials.total = Decimal::ZERO;

        let text = render(&record).to_plain_text();
        assert!(text.contains("Cliente: Padaria Central"));
        assert!(!text.contains("Dias de evento"));
        assert!(text.contains("[-] Instalação hídrica"));

        // list rows stay renderable from the short projection too
        let short: ChecklistShort = serde_json::from_value(serde_json::json!({
            "id": 5, "install_type": "Cliente", "client_name": "Padaria Central",
            "event_name": null, "install_date": null, "machine_name": null,
            "quantity": 1, "contract_num": null, "status": "Rascunho", "created_at": null
        }))
        .unwrap();
        assert_eq!(short.status, ChecklistStatus::Draft);
    }
}
