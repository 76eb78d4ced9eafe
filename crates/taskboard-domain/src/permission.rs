use serde::{Deserialize, Serialize};

use crate::{board::BoardId, card::CardId, column::ColumnId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    AddColumn,
    DeleteColumn,
    EditColumn,
    Reorder,
    AddTask,
    DeleteTask,
    EditTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Resource {
    Board(BoardId),
    Column(ColumnId),
    Card(CardId),
}

/// Decides whether the current user may perform an action on a resource.
pub trait PermissionGate: Send + Sync {
    fn can_perform(&self, action: Action, resource: Resource) -> bool;
}

pub struct AllowAll;

impl PermissionGate for AllowAll {
    fn can_perform(&self, _action: Action, _resource: Resource) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ProjectManager,
    Member,
    Viewer,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "admin" => Some(Self::Admin),
            "projectmanager" | "pm" => Some(Self::ProjectManager),
            "member" => Some(Self::Member),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }
}

/// Static role table: managers shape the board, members work the cards.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    pub role: Role,
}

impl RoleGate {
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

impl PermissionGate for RoleGate {
    fn can_perform(&self, action: Action, _resource: Resource) -> bool {
        match self.role {
            Role::Admin | Role::ProjectManager => true,
            Role::Member => matches!(
                action,
                Action::Reorder | Action::AddTask | Action::EditTask
            ),
            Role::Viewer => false,
        }
    }
}
