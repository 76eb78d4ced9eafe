use std::path::Path;
use std::sync::Arc;

use taskboard_core::{AppConfig, BoardResult};
use taskboard_domain::{
    AllowAll, BoardSession, CardId, ColumnId, PermissionGate, ProjectId, Role, RoleGate,
};
use taskboard_persistence::{FileBoardBackend, JsonFileStore};

pub struct CliContext {
    pub backend: Arc<FileBoardBackend<JsonFileStore>>,
    gate: Arc<dyn PermissionGate>,
    config: AppConfig,
}

impl CliContext {
    pub fn new(file_path: &Path, role: Option<Role>) -> Self {
        let gate: Arc<dyn PermissionGate> = match role {
            Some(role) => Arc::new(RoleGate::new(role)),
            None => Arc::new(AllowAll),
        };
        Self {
            backend: Arc::new(FileBoardBackend::new(JsonFileStore::new(file_path))),
            gate,
            config: AppConfig::load(),
        }
    }

    pub async fn session(&self, project_id: ProjectId) -> BoardResult<BoardSession> {
        BoardSession::load(
            self.backend.clone(),
            self.gate.clone(),
            project_id,
            self.config.clone(),
        )
        .await
    }

    pub async fn session_for_column(&self, column_id: ColumnId) -> BoardResult<BoardSession> {
        let project_id = self.backend.project_for_column(column_id).await?;
        self.session(project_id).await
    }

    pub async fn session_for_card(&self, card_id: CardId) -> BoardResult<BoardSession> {
        let project_id = self.backend.project_for_card(card_id).await?;
        self.session(project_id).await
    }
}
