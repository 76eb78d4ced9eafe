//! Position bookkeeping shared by the store and the drag engine.

use serde::{Deserialize, Serialize};

use crate::{card::CardId, column::ColumnId};

/// Move the element at `from` so that it ends up at index `to`.
///
/// Moving an element onto its own index leaves the slice untouched, and
/// out-of-range indices are ignored rather than dropping or duplicating items.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// One stored position update, keyed by entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionWrite {
    Column {
        column_id: ColumnId,
        position: i32,
    },
    Card {
        card_id: CardId,
        column_id: ColumnId,
        position: i32,
    },
}
