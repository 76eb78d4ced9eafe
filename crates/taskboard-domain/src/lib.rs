pub mod announce;
pub mod board;
pub mod card;
pub mod column;
pub mod drag;
pub mod permission;
pub mod reorder;
pub mod services;
pub mod session;
pub mod store;

pub use board::{Board, BoardId, BoardView, ColumnView, ProjectId};
pub use card::{Card, CardId, NewCard, UserId};
pub use column::{validate_title, Column, ColumnColor, ColumnId};
pub use drag::{DragEngine, DragPayload, DragSource, DragState, DropTarget, GestureOutcome};
pub use permission::{Action, AllowAll, PermissionGate, Resource, Role, RoleGate};
pub use reorder::{array_move, PositionWrite};
pub use services::{AssigneeNotifier, BoardBackend, TracingNotifier};
pub use session::{BoardSession, FailedWrite, ReconcileReport};
pub use store::{BoardSnapshot, BoardStore};
