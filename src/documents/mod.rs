//! Printable document projections.
//!
//! Each projection is a pure `record -> Document` transform. The tree is
//! handed to the client-side renderer as JSON; `to_plain_text` gives a
//! dependency-free rendering for previews and tests.

pub mod blank_form;
pub mod checklist_report;
pub mod proposal;

use serde::Serialize;
use utoipa::ToSchema;

/// Shown wherever an optional value is missing
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Document {
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Field { label: String, value: String },
    /// `checked: None` renders an empty box to be ticked by hand
    Checkbox { label: String, checked: Option<bool> },
    Table { columns: Vec<String>, rows: Vec<Vec<String>> },
    Paragraph { text: String },
    /// Empty line to be filled by hand
    BlankLine { label: String },
    Signature { label: String },
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            blocks: Vec::new(),
        }
    }

    pub fn field(mut self, label: &str, value: Option<&str>) -> Self {
        self.blocks.push(Block::Field {
            label: label.to_string(),
            value: or_placeholder(value),
        });
        self
    }

    pub fn checkbox(mut self, label: &str, checked: Option<bool>) -> Self {
        self.blocks.push(Block::Checkbox {
            label: label.to_string(),
            checked,
        });
        self
    }

    pub fn table(mut self, columns: &[&str], rows: Vec<Vec<String>>) -> Self {
        self.blocks.push(Block::Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        });
        self
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph { text: text.into() });
        self
    }

    pub fn blank_line(mut self, label: &str) -> Self {
        self.blocks.push(Block::BlankLine {
            label: label.to_string(),
        });
        self
    }

    pub fn signature(mut self, label: &str) -> Self {
        self.blocks.push(Block::Signature {
            label: label.to_string(),
        });
        self
    }
}

/// Trimmed value, or the placeholder when missing or blank
pub fn or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Brazilian currency formatting ("R$ 1.234,50")
pub fn format_brl(value: rust_decimal::Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}R$ {},{}", if negative { "-" } else { "" }, grouped, frac_part)
}

impl Document {
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        if let Some(subtitle) = &self.subtitle {
            out.push_str(subtitle);
            out.push('\n');
        }

        for section in &self.sections {
            out.push('\n');
            out.push_str(&format!("== {} ==\n", section.heading));
            for block in &section.blocks {
                match block {
                    Block::Field { label, value } => {
                        out.push_str(&format!("{}: {}\n", label, value));
                    }
                    Block::Checkbox { label, checked } => {
                        let mark = match checked {
                            Some(true) => "[x]",
                            Some(false) => "[-]",
                            None => "[ ]",
                        };
                        out.push_str(&format!("{} {}\n", mark, label));
                    }
                    Block::Table { columns, rows } => {
                        out.push_str(&columns.join(" | "));
                        out.push('\n');
                        for row in rows {
                            out.push_str(&row.join(" | "));
                            out.push('\n');
                        }
                    }
                    Block::Paragraph { text } => {
                        out.push_str(text);
                        out.push('\n');
                    }
                    Block::BlankLine { label } => {
                        out.push_str(&format!("{}: ______________________________\n", label));
                    }
                    Block::Signature { label } => {
                        out.push_str(&format!("\n______________________________\n{}\n", label));
                    }
                }
            }
        }

        if let Some(footer) = &self.footer {
            out.push('\n');
            out.push_str(footer);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_placeholder() {
        assert_eq!(or_placeholder(None), "-");
        assert_eq!(or_placeholder(Some("   ")), "-");
        assert_eq!(or_placeholder(Some(" 220v ")), "220v");
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_brl(Decimal::new(123450, 2)), "R$ 1.234,50");
        assert_eq!(format_brl(Decimal::new(100000000, 2)), "R$ 1.000.000,00");
        assert_eq!(format_brl(Decimal::new(-995, 1)), "-R$ 99,50");
    }

    #[test]
    fn test_plain_text_rendering() {
        let doc = Document {
            title: "Checklist".into(),
            subtitle: None,
            sections: vec![Section::new("Local")
                .field("Cliente", None)
                .checkbox("Ponto de água", None)
                .blank_line("Observações")],
            footer: None,
        };
        let text = doc.to_plain_text();
        assert!(text.contains("== Local =="));
        assert!(text.contains("Cliente: -"));
        assert!(text.contains("[ ] Ponto de água"));
        assert!(text.contains("Observações: ____"));
    }

    #[test]
    fn test_block_wire_format() {
        let json = serde_json::to_value(Block::Checkbox { label: "Vapor".into(), checked: Some(true) }).unwrap();
        assert_eq!(json["kind"], "checkbox");
        assert_eq!(json["checked"], true);
    }
}
