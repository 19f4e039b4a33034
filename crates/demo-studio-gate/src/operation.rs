//! Gate operations and the role permission table
//!
//! [`Operation::permits`] is the single source of truth for who may do what.
//! Every row matches on the role exhaustively, so adding a role fails to
//! compile until each row has been revisited.

use crate::error::RoleSet;
use demo_studio_types::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation exposed by the workflow gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateTemplate,
    ApproveTemplate,
    ListTemplates,
    CreateDemo,
    CloneDemo,
    PublishDemo,
    ShareLinks,
    ReadAnalytics,
    CreateGuestGrant,
    RevokeGuestGrant,
    #[serde(rename = "register_chatgpt_app")]
    RegisterChatGptApp,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateTemplate => "create_template",
            Operation::ApproveTemplate => "approve_template",
            Operation::ListTemplates => "list_templates",
            Operation::CreateDemo => "create_demo",
            Operation::CloneDemo => "clone_demo",
            Operation::PublishDemo => "publish_demo",
            Operation::ShareLinks => "share_links",
            Operation::ReadAnalytics => "read_analytics",
            Operation::CreateGuestGrant => "create_guest_grant",
            Operation::RevokeGuestGrant => "revoke_guest_grant",
            Operation::RegisterChatGptApp => "register_chatgpt_app",
        }
    }

    /// Whether `role` may perform this operation
    pub fn permits(&self, role: Role) -> bool {
        use Role::{Admin, Developer, Sales, SalesEngineer};

        match self {
            Operation::CreateTemplate | Operation::ApproveTemplate => match role {
                Developer | Admin => true,
                Sales | SalesEngineer => false,
            },
            Operation::CreateDemo | Operation::CloneDemo | Operation::CreateGuestGrant => {
                match role {
                    Sales | SalesEngineer | Admin => true,
                    Developer => false,
                }
            }
            Operation::PublishDemo
            | Operation::RevokeGuestGrant
            | Operation::RegisterChatGptApp => match role {
                SalesEngineer | Admin => true,
                Sales | Developer => false,
            },
            Operation::ShareLinks | Operation::ListTemplates | Operation::ReadAnalytics => {
                match role {
                    Sales | SalesEngineer | Developer | Admin => true,
                }
            }
        }
    }

    /// Roles allowed to perform this operation, or `None` when it is open
    pub fn required_roles(&self) -> Option<RoleSet> {
        let allowed: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| self.permits(*role))
            .collect();

        if allowed.len() == Role::ALL.len() {
            None
        } else {
            Some(RoleSet(allowed))
        }
    }

    /// Open operations skip the role check entirely
    pub fn is_open(&self) -> bool {
        self.required_roles().is_none()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
