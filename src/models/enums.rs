//! Shared domain enums stored as text columns

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements string conversions and SQLx text encoding for a fieldless enum
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!("Invalid {} value: {}", stringify!($name), other)),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
                let s: String = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// InstallType
// ---------------------------------------------------------------------------

/// Who the installation is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum InstallType {
    #[default]
    #[serde(rename = "Cliente")]
    Client,
    #[serde(rename = "Evento")]
    Event,
}

text_enum!(InstallType {
    Client => "Cliente",
    Event => "Evento",
});

// ---------------------------------------------------------------------------
// ChecklistStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a persisted checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ChecklistStatus {
    #[serde(rename = "Rascunho")]
    Draft,
    #[serde(rename = "Finalizado")]
    Finalized,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

text_enum!(ChecklistStatus {
    Draft => "Rascunho",
    Finalized => "Finalizado",
    Cancelled => "Cancelado",
});

/// Statuses a checklist may be submitted with (cancellation is a separate action)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SubmitStatus {
    #[serde(rename = "Rascunho")]
    Draft,
    #[serde(rename = "Finalizado")]
    Finalized,
}

impl From<SubmitStatus> for ChecklistStatus {
    fn from(s: SubmitStatus) -> Self {
        match s {
            SubmitStatus::Draft => ChecklistStatus::Draft,
            SubmitStatus::Finalized => ChecklistStatus::Finalized,
        }
    }
}

// ---------------------------------------------------------------------------
// YesNo
// ---------------------------------------------------------------------------

/// Technical flag as recorded on the installation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum YesNo {
    #[serde(rename = "Sim")]
    Yes,
    #[default]
    #[serde(rename = "Não")]
    No,
}

text_enum!(YesNo {
    Yes => "Sim",
    No => "Não",
});

impl From<bool> for YesNo {
    fn from(b: bool) -> Self {
        if b {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

// ---------------------------------------------------------------------------
// PortfolioStatus
// ---------------------------------------------------------------------------

/// Sales proposal outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum PortfolioStatus {
    #[default]
    #[serde(rename = "Aberta")]
    Open,
    #[serde(rename = "Aprovada")]
    Approved,
    #[serde(rename = "Recusada")]
    Rejected,
}

text_enum!(PortfolioStatus {
    Open => "Aberta",
    Approved => "Aprovada",
    Rejected => "Recusada",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip_uses_portuguese_labels() {
        assert_eq!(ChecklistStatus::Finalized.as_str(), "Finalizado");
        assert_eq!("Cancelado".parse::<ChecklistStatus>(), Ok(ChecklistStatus::Cancelled));
        assert_eq!("Evento".parse::<InstallType>(), Ok(InstallType::Event));
        assert!("finalizado".parse::<ChecklistStatus>().is_err());
    }

    #[test]
    fn test_serde_labels_match_text_labels() {
        assert_eq!(serde_json::to_string(&YesNo::No).unwrap(), "\"Não\"");
        assert_eq!(serde_json::to_string(&InstallType::Client).unwrap(), "\"Cliente\"");
        let status: SubmitStatus = serde_json::from_str("\"Rascunho\"").unwrap();
        assert_eq!(ChecklistStatus::from(status), ChecklistStatus::Draft);
    }
}
