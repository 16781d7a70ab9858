//! Role Policy
//!
//! Client-side role gating. Decides which task mutations a view offers;
//! the remote store itself accepts every request.

use std::fmt;

/// Active view role, derived from the URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Developer,
    Manager,
}

/// Mutations a role may trigger from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub create: bool,
    pub edit: bool,
    pub toggle: bool,
    pub delete: bool,
}

impl Role {
    /// Role for a path; anything other than `/manager` is a developer
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/manager" => Role::Manager,
            _ => Role::Developer,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Role::Developer => "/developer",
            Role::Manager => "/manager",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Developer => "Developer",
            Role::Manager => "Manager",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Role::Developer => Role::Manager,
            Role::Manager => Role::Developer,
        }
    }

    pub fn permissions(&self) -> Permissions {
        match self {
            Role::Developer => Permissions {
                create: true,
                edit: true,
                toggle: false,
                delete: false,
            },
            Role::Manager => Permissions {
                create: false,
                edit: true,
                toggle: true,
                delete: true,
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Developer => "developer",
            Role::Manager => "manager",
        })
    }
}
