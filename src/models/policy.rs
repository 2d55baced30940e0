//! Role-based capability table.
//!
//! Roles are parsed once from the profile's free-form role string and resolved
//! into a [`Capabilities`] set for the whole request session. Handlers consume
//! plain booleans through [`Capabilities::allows`] instead of comparing role
//! names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Staff roles known to the admin app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Dev,
    Admin,
    Gestor,
    Comercial,
    Tecnico,
    Visitante,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Dev => "dev",
            Role::Admin => "admin",
            Role::Gestor => "gestor",
            Role::Comercial => "comercial",
            Role::Tecnico => "tecnico",
            Role::Visitante => "visitante",
        }
    }

    /// Lenient parse of stored role labels ("DEV", "Dev.", "Técnico", ...).
    /// Unknown labels fall back to the least privileged role.
    pub fn parse_lenient(s: &str) -> Self {
        let normalized: String = s
            .trim()
            .trim_end_matches('.')
            .chars()
            .map(|c| match c {
                'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
                'é' | 'ê' | 'É' | 'Ê' => 'e',
                'í' | 'Í' => 'i',
                'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
                'ú' | 'Ú' => 'u',
                'ç' | 'Ç' => 'c',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "dev" | "developer" => Role::Dev,
            "admin" | "administrador" => Role::Admin,
            "gestor" | "gerente" => Role::Gestor,
            "comercial" | "vendas" => Role::Comercial,
            "tecnico" => Role::Tecnico,
            _ => Role::Visitante,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guarded areas of the admin app
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Machines,
    Supplies,
    Checklists,
    Portfolios,
    Recipes,
    Wiki,
    Stock,
    Users,
    History,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Machines,
        Resource::Supplies,
        Resource::Checklists,
        Resource::Portfolios,
        Resource::Recipes,
        Resource::Wiki,
        Resource::Stock,
        Resource::Users,
        Resource::History,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        };
        write!(f, "{}", label)
    }
}

/// What a role may do on one resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Access {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Access {
    const NONE: Access = Access { view: false, create: false, edit: false, delete: false };
    const READ: Access = Access { view: true, create: false, edit: false, delete: false };
    const WRITE: Access = Access { view: true, create: true, edit: true, delete: false };
    const FULL: Access = Access { view: true, create: true, edit: true, delete: true };

    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }
}

fn access_for(role: Role, resource: Resource) -> Access {
    use Resource::*;

    match role {
        Role::Dev | Role::Admin => Access::FULL,
        Role::Gestor => match resource {
            Users => Access::READ,
            _ => Access::FULL,
        },
        Role::Comercial => match resource {
            Portfolios => Access::WRITE,
            Checklists => Access::WRITE,
            Machines | Supplies | Recipes | Wiki | Stock => Access::READ,
            Users | History => Access::NONE,
        },
        Role::Tecnico => match resource {
            Checklists | Wiki | Stock => Access::WRITE,
            Machines | Supplies | Recipes => Access::READ,
            Portfolios | Users | History => Access::NONE,
        },
        Role::Visitante => match resource {
            Machines | Recipes | Wiki => Access::READ,
            _ => Access::NONE,
        },
    }
}

/// Capability set resolved for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Capabilities {
    pub role: Role,
    #[schema(value_type = Object)]
    pub grants: BTreeMap<Resource, Access>,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        let grants = Resource::ALL
            .iter()
            .map(|&resource| (resource, access_for(role, resource)))
            .collect();
        Self { role, grants }
    }

    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.grants
            .get(&resource)
            .map(|access| access.allows(action))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_label_variants_collapse() {
        for label in ["DEV", "Dev", "Dev.", " dev "] {
            assert_eq!(Role::parse_lenient(label), Role::Dev);
        }
        assert_eq!(Role::parse_lenient("Técnico"), Role::Tecnico);
        assert_eq!(Role::parse_lenient("ADMIN"), Role::Admin);
        assert_eq!(Role::parse_lenient("estagiário"), Role::Visitante);
        assert_eq!(Role::parse_lenient(""), Role::Visitante);
    }

    #[test]
    fn test_admin_has_everything() {
        let caps = Capabilities::for_role(Role::Admin);
        for resource in Resource::ALL {
            assert!(caps.allows(resource, Action::Delete));
        }
    }

    #[test]
    fn test_technician_cannot_delete_checklists() {
        let caps = Capabilities::for_role(Role::Tecnico);
        assert!(caps.allows(Resource::Checklists, Action::Create));
        assert!(caps.allows(Resource::Checklists, Action::View));
        assert!(!caps.allows(Resource::Checklists, Action::Delete));
        assert!(!caps.allows(Resource::Portfolios, Action::View));
    }

    #[test]
    fn test_visitor_is_read_only() {
        let caps = Capabilities::for_role(Role::Visitante);
        assert!(caps.allows(Resource::Machines, Action::View));
        assert!(!caps.allows(Resource::Machines, Action::Edit));
        assert!(!caps.allows(Resource::Users, Action::View));
        assert!(!caps.allows(Resource::History, Action::View));
    }

    #[test]
    fn test_table_covers_every_resource() {
        let caps = Capabilities::for_role(Role::Gestor);
        assert_eq!(caps.grants.len(), Resource::ALL.len());
        assert!(caps.allows(Resource::Users, Action::View));
        assert!(!caps.allows(Resource::Users, Action::Edit));
    }
}
