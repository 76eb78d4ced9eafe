//! In-memory view of one board.
//!
//! Columns are kept in display order. Cards live in a single flat list tagged
//! with their `column_id`, so a card can change parents mid-gesture; the order
//! of a column is the order of its cards within that flat list. Stored
//! `position` fields are only authoritative at rest, after a renormalization.

use std::collections::HashSet;

use taskboard_core::{BoardError, BoardResult};

use crate::{
    board::{Board, BoardView, ColumnView},
    card::{Card, CardId},
    column::{Column, ColumnColor, ColumnId},
    reorder::{array_move, PositionWrite},
};

/// Captured columns and cards, used to roll back a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    columns: Vec<Column>,
    cards: Vec<Card>,
}

impl BoardSnapshot {
    /// True when the write would store what the entity already had.
    pub fn is_unchanged(&self, write: &PositionWrite) -> bool {
        match *write {
            PositionWrite::Column {
                column_id,
                position,
            } => self
                .columns
                .iter()
                .any(|c| c.id == column_id && c.position == position),
            PositionWrite::Card {
                card_id,
                column_id,
                position,
            } => self
                .cards
                .iter()
                .any(|c| c.id == card_id && c.column_id == column_id && c.position == position),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoardStore {
    board: Board,
    columns: Vec<Column>,
    cards: Vec<Card>,
}

impl BoardStore {
    pub fn from_view(view: BoardView) -> Self {
        let mut column_views = view.columns;
        column_views.sort_by_key(|cv| cv.column.position);

        let mut columns = Vec::with_capacity(column_views.len());
        let mut cards = Vec::new();
        for ColumnView {
            column,
            cards: mut column_cards,
        } in column_views
        {
            column_cards.sort_by_key(|card| card.position);
            for mut card in column_cards {
                // Nesting in the payload is the parentage at load time.
                card.column_id = column.id;
                cards.push(card);
            }
            columns.push(column);
        }

        Self {
            board: view.board,
            columns,
            cards,
        }
    }

    pub fn to_view(&self) -> BoardView {
        BoardView {
            board: self.board.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| ColumnView {
                    column: column.clone(),
                    cards: self.cards_in(column.id).into_iter().cloned().collect(),
                })
                .collect(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Every card in flat order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn cards_in(&self, column_id: ColumnId) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|c| c.column_id == column_id)
            .collect()
    }

    pub fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn card_index(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Index of the card within its own column, with the column's card count.
    pub fn card_index_in_column(&self, id: CardId) -> Option<(usize, usize)> {
        let column_id = self.card(id)?.column_id;
        let siblings = self.cards_in(column_id);
        let index = siblings.iter().position(|c| c.id == id)?;
        Some((index, siblings.len()))
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            columns: self.columns.clone(),
            cards: self.cards.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: BoardSnapshot) {
        self.columns = snapshot.columns;
        self.cards = snapshot.cards;
    }

    fn require_column(&self, id: ColumnId) -> BoardResult<&Column> {
        self.column(id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", id)))
    }

    fn require_card(&self, id: CardId) -> BoardResult<&Card> {
        self.card(id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", id)))
    }

    /// Slide the dragged card onto the hovered card's slot, adopting its column.
    /// Positions are left stale until the gesture ends.
    pub(crate) fn preview_card_over_card(
        &mut self,
        card_id: CardId,
        over_id: CardId,
    ) -> BoardResult<()> {
        let over_column = self.require_card(over_id)?.column_id;
        let from = self
            .card_index(card_id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", card_id)))?;
        let to = self
            .card_index(over_id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", over_id)))?;

        self.cards[from].column_id = over_column;
        array_move(&mut self.cards, from, to);
        Ok(())
    }

    pub(crate) fn preview_card_over_column(
        &mut self,
        card_id: CardId,
        column_id: ColumnId,
    ) -> BoardResult<()> {
        self.require_column(column_id)?;
        let index = self
            .card_index(card_id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", card_id)))?;
        self.cards[index].column_id = column_id;
        Ok(())
    }

    /// Move a column to `to_index` and return a write for every column whose
    /// stored position no longer matches its index.
    pub fn move_column(
        &mut self,
        column_id: ColumnId,
        to_index: usize,
    ) -> BoardResult<Vec<PositionWrite>> {
        let from = self
            .column_index(column_id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", column_id)))?;
        let to = to_index.min(self.columns.len().saturating_sub(1));
        array_move(&mut self.columns, from, to);
        Ok(self.renormalize_columns())
    }

    /// Reinsert a card inside its own column, directly before `before`, or at
    /// the end of the column when `before` is `None`.
    pub fn move_card_within_column(
        &mut self,
        card_id: CardId,
        before: Option<CardId>,
    ) -> BoardResult<Vec<PositionWrite>> {
        let column_id = self.require_card(card_id)?.column_id;
        self.place_card(card_id, column_id, before)?;
        Ok(self.renormalize_cards(&[column_id]))
    }

    /// Re-parent a card into `to_column`, directly before `before`, or at the
    /// end of that column when `before` is `None`. Both columns are renumbered.
    pub fn move_card_across_columns(
        &mut self,
        card_id: CardId,
        to_column: ColumnId,
        before: Option<CardId>,
    ) -> BoardResult<Vec<PositionWrite>> {
        let origin = self.require_card(card_id)?.column_id;
        self.require_column(to_column)?;
        self.place_card(card_id, to_column, before)?;
        Ok(self.renormalize_cards(&[origin, to_column]))
    }

    fn place_card(
        &mut self,
        card_id: CardId,
        column_id: ColumnId,
        before: Option<CardId>,
    ) -> BoardResult<()> {
        if let Some(before_id) = before {
            if before_id == card_id {
                return Ok(());
            }
            let anchor = self.require_card(before_id)?;
            if anchor.column_id != column_id {
                return Err(BoardError::InvalidGesture(format!(
                    "Card {} is not in column {}",
                    before_id, column_id
                )));
            }
        }

        let index = self
            .card_index(card_id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", card_id)))?;
        let mut card = self.cards.remove(index);
        card.column_id = column_id;

        // Looking the anchor up after removal absorbs the shift when the card
        // came from above it in the same column.
        match before.and_then(|id| self.card_index(id)) {
            Some(anchor_index) => self.cards.insert(anchor_index, card),
            None => self.cards.push(card),
        }
        Ok(())
    }

    /// Assign `0..n` to each listed column's cards in their current order.
    /// Returns one write per card in those columns, changed or not.
    pub fn renormalize_cards(&mut self, column_ids: &[ColumnId]) -> Vec<PositionWrite> {
        let mut seen = HashSet::new();
        let mut writes = Vec::new();
        for &column_id in column_ids {
            if !seen.insert(column_id) {
                continue;
            }
            let mut next = 0;
            for card in self.cards.iter_mut().filter(|c| c.column_id == column_id) {
                if card.position != next {
                    card.move_to_column(column_id, next);
                }
                writes.push(PositionWrite::Card {
                    card_id: card.id,
                    column_id,
                    position: next,
                });
                next += 1;
            }
        }
        writes
    }

    /// Align stored column positions with display order. Only columns whose
    /// position actually changed produce a write.
    pub fn renormalize_columns(&mut self) -> Vec<PositionWrite> {
        let mut writes = Vec::new();
        for (index, column) in self.columns.iter_mut().enumerate() {
            let position = index as i32;
            if column.position != position {
                column.update_position(position);
                writes.push(PositionWrite::Column {
                    column_id: column.id,
                    position,
                });
            }
        }
        writes
    }

    /// Add a column after the last one.
    pub fn append_column(&mut self, mut column: Column) -> &Column {
        column.position = self.columns.len() as i32;
        self.columns.push(column);
        &self.columns[self.columns.len() - 1]
    }

    /// Add a card at the end of its column without touching existing cards.
    pub fn append_card(&mut self, mut card: Card) -> BoardResult<&Card> {
        self.require_column(card.column_id)?;
        card.position = self.cards_in(card.column_id).len() as i32;
        self.cards.push(card);
        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Drop a column and every card in it. Returns the column writes needed to
    /// close the gap it leaves.
    pub fn remove_column(&mut self, id: ColumnId) -> Option<(Column, Vec<PositionWrite>)> {
        let index = self.column_index(id)?;
        let column = self.columns.remove(index);
        self.cards.retain(|c| c.column_id != id);
        let writes = self.renormalize_columns();
        Some((column, writes))
    }

    /// Drop a card and return writes for the siblings that shifted up.
    pub fn remove_card(&mut self, id: CardId) -> Option<(Card, Vec<PositionWrite>)> {
        let index = self.card_index(id)?;
        let before = self.snapshot();
        let card = self.cards.remove(index);
        let writes = self
            .renormalize_cards(&[card.column_id])
            .into_iter()
            .filter(|w| !before.is_unchanged(w))
            .collect();
        Some((card, writes))
    }

    pub fn rename_column(&mut self, id: ColumnId, title: String) -> BoardResult<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", id)))?;
        column.update_title(title);
        Ok(())
    }

    pub fn set_column_color(&mut self, id: ColumnId, color: ColumnColor) -> BoardResult<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", id)))?;
        column.set_color(color);
        Ok(())
    }

    pub fn rename_card(&mut self, id: CardId, title: String) -> BoardResult<()> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("Card {}", id)))?;
        card.update_title(title);
        Ok(())
    }
}
