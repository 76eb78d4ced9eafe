//! Drag-and-drop state machine for one board.
//!
//! A gesture goes `Idle -> Dragging -> Idle`. Hovering applies preview
//! reorders to the store so the board can render them, but nothing is written
//! until the drop. The drop is always applied to the layout captured at pick-up,
//! so the path the pointer took never leaks into the result, and a cancel puts
//! that layout back.

use serde::{Deserialize, Serialize};
use taskboard_core::{AppConfig, BoardError, BoardResult, PositionWrites};

use crate::{
    announce,
    card::CardId,
    column::ColumnId,
    reorder::PositionWrite,
    store::{BoardSnapshot, BoardStore},
};

/// What the pointer picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DragSource {
    Column(ColumnId),
    Card(CardId),
}

/// What the pointer is over: a card, or a column's empty area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    Column(ColumnId),
    Card(CardId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DragPayload {
    Column {
        column_id: ColumnId,
    },
    Card {
        card_id: CardId,
        origin_column_id: ColumnId,
    },
}

#[derive(Debug, Clone, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
        before: BoardSnapshot,
    },
}

/// Result of a completed drop: the positions to persist and what to announce.
#[derive(Debug, Clone, Serialize)]
pub struct GestureOutcome {
    pub payload: DragPayload,
    pub writes: Vec<PositionWrite>,
    pub announcement: Option<String>,
}

#[derive(Debug)]
pub struct DragEngine {
    state: DragState,
    position_writes: PositionWrites,
    announcements: bool,
}

impl DragEngine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: DragState::Idle,
            position_writes: config.position_writes,
            announcements: config.announcements,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn payload(&self) -> Option<DragPayload> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { payload, .. } => Some(*payload),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    fn announce(&self, message: String) -> Option<String> {
        self.announcements.then_some(message)
    }

    pub fn start(
        &mut self,
        store: &BoardStore,
        source: DragSource,
    ) -> BoardResult<Option<String>> {
        if !self.is_idle() {
            return Err(BoardError::InvalidGesture(
                "A drag is already in progress".to_string(),
            ));
        }

        let (payload, message) = match source {
            DragSource::Column(column_id) => {
                let column = store
                    .column(column_id)
                    .ok_or_else(|| BoardError::NotFound(format!("Column {}", column_id)))?;
                let index = store.column_index(column_id).unwrap_or_default();
                (
                    DragPayload::Column { column_id },
                    announce::picked_up_column(&column.title, index, store.columns().len()),
                )
            }
            DragSource::Card(card_id) => {
                let card = store
                    .card(card_id)
                    .ok_or_else(|| BoardError::NotFound(format!("Card {}", card_id)))?;
                let (index, len) = store.card_index_in_column(card_id).unwrap_or((0, 0));
                (
                    DragPayload::Card {
                        card_id,
                        origin_column_id: card.column_id,
                    },
                    announce::picked_up_card(
                        &card.title,
                        index,
                        len,
                        &column_title(store, card.column_id),
                    ),
                )
            }
        };

        tracing::debug!(?payload, "Drag started");
        self.state = DragState::Dragging {
            payload,
            before: store.snapshot(),
        };
        Ok(self.announce(message))
    }

    /// Hover feedback. Card previews mutate the store; column hovers do not.
    pub fn over(
        &mut self,
        store: &mut BoardStore,
        target: DropTarget,
    ) -> BoardResult<Option<String>> {
        let payload = self
            .payload()
            .ok_or_else(|| BoardError::InvalidGesture("No drag in progress".to_string()))?;

        let message = match (payload, target) {
            (DragPayload::Column { column_id }, DropTarget::Column(over)) => {
                if column_id == over {
                    return Ok(None);
                }
                let index = store
                    .column_index(over)
                    .ok_or_else(|| BoardError::NotFound(format!("Column {}", over)))?;
                announce::column_over_column(
                    &column_title(store, column_id),
                    &column_title(store, over),
                    index,
                    store.columns().len(),
                )
            }
            (DragPayload::Column { .. }, DropTarget::Card(_)) => return Ok(None),
            (DragPayload::Card { card_id, .. }, DropTarget::Card(over)) => {
                if card_id == over {
                    return Ok(None);
                }
                store.preview_card_over_card(card_id, over)?;
                let over_card = store
                    .card(over)
                    .ok_or_else(|| BoardError::NotFound(format!("Card {}", over)))?;
                announce::card_over_card(
                    &card_title(store, card_id),
                    &over_card.title,
                    &column_title(store, over_card.column_id),
                )
            }
            (DragPayload::Card { card_id, .. }, DropTarget::Column(column_id)) => {
                store.preview_card_over_column(card_id, column_id)?;
                announce::card_over_column(
                    &card_title(store, card_id),
                    &column_title(store, column_id),
                )
            }
        };

        tracing::debug!(?target, "Drag over");
        Ok(self.announce(message))
    }

    /// Finish the gesture. Dropping outside any target (`None`) behaves like a
    /// cancel and yields no writes.
    pub fn end(
        &mut self,
        store: &mut BoardStore,
        target: Option<DropTarget>,
    ) -> BoardResult<GestureOutcome> {
        let (payload, before) = match std::mem::take(&mut self.state) {
            DragState::Idle => {
                return Err(BoardError::InvalidGesture(
                    "No drag in progress".to_string(),
                ))
            }
            DragState::Dragging { payload, before } => (payload, before),
        };

        store.restore(before.clone());

        let Some(target) = target else {
            tracing::debug!(?payload, "Dropped outside any target");
            return Ok(GestureOutcome {
                payload,
                writes: Vec::new(),
                announcement: self.announce(cancelled_message(store, payload)),
            });
        };

        let result = match payload {
            DragPayload::Column { column_id } => self.drop_column(store, column_id, target),
            DragPayload::Card {
                card_id,
                origin_column_id,
            } => self.drop_card(store, card_id, origin_column_id, target, &before),
        };

        match result {
            Ok(writes) => {
                tracing::info!(?payload, writes = writes.len(), "Gesture completed");
                Ok(GestureOutcome {
                    payload,
                    writes,
                    announcement: self.announce(dropped_message(store, payload)),
                })
            }
            Err(err) => {
                store.restore(before);
                Err(err)
            }
        }
    }

    /// Abandon the gesture and put the pre-drag layout back.
    pub fn cancel(&mut self, store: &mut BoardStore) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { payload, before } => {
                store.restore(before);
                tracing::debug!(?payload, "Drag cancelled");
                self.announce(cancelled_message(store, payload))
            }
        }
    }

    fn drop_column(
        &self,
        store: &mut BoardStore,
        column_id: ColumnId,
        target: DropTarget,
    ) -> BoardResult<Vec<PositionWrite>> {
        let target_column = match target {
            DropTarget::Column(id) => id,
            DropTarget::Card(card_id) => store
                .card(card_id)
                .map(|c| c.column_id)
                .ok_or_else(|| BoardError::NotFound(format!("Card {}", card_id)))?,
        };
        let to_index = store
            .column_index(target_column)
            .ok_or_else(|| BoardError::NotFound(format!("Column {}", target_column)))?;
        store.move_column(column_id, to_index)
    }

    fn drop_card(
        &self,
        store: &mut BoardStore,
        card_id: CardId,
        origin: ColumnId,
        target: DropTarget,
        before: &BoardSnapshot,
    ) -> BoardResult<Vec<PositionWrite>> {
        let writes = match target {
            DropTarget::Card(over) if over == card_id => store.renormalize_cards(&[origin]),
            DropTarget::Card(over) => {
                let destination = store
                    .card(over)
                    .map(|c| c.column_id)
                    .ok_or_else(|| BoardError::NotFound(format!("Card {}", over)))?;
                if destination == origin {
                    store.move_card_within_column(card_id, Some(over))?
                } else {
                    store.move_card_across_columns(card_id, destination, Some(over))?
                }
            }
            DropTarget::Column(destination) if destination == origin => {
                store.move_card_within_column(card_id, None)?
            }
            DropTarget::Column(destination) => {
                store.move_card_across_columns(card_id, destination, None)?
            }
        };

        Ok(match self.position_writes {
            PositionWrites::All => writes,
            PositionWrites::ChangedOnly => writes
                .into_iter()
                .filter(|w| !before.is_unchanged(w))
                .collect(),
        })
    }
}

fn column_title(store: &BoardStore, id: ColumnId) -> String {
    store
        .column(id)
        .map(|c| c.title.clone())
        .unwrap_or_default()
}

fn card_title(store: &BoardStore, id: CardId) -> String {
    store.card(id).map(|c| c.title.clone()).unwrap_or_default()
}

fn dropped_message(store: &BoardStore, payload: DragPayload) -> String {
    match payload {
        DragPayload::Column { column_id } => announce::dropped_column(
            &column_title(store, column_id),
            store.column_index(column_id).unwrap_or_default(),
            store.columns().len(),
        ),
        DragPayload::Card { card_id, .. } => {
            let (index, len) = store.card_index_in_column(card_id).unwrap_or((0, 0));
            let column = store
                .card(card_id)
                .map(|c| column_title(store, c.column_id))
                .unwrap_or_default();
            announce::dropped_card(&card_title(store, card_id), index, len, &column)
        }
    }
}

fn cancelled_message(store: &BoardStore, payload: DragPayload) -> String {
    match payload {
        DragPayload::Column { column_id } => {
            announce::cancelled("Column", &column_title(store, column_id))
        }
        DragPayload::Card { card_id, .. } => {
            announce::cancelled("Task", &card_title(store, card_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{board_with, card_id, column_id, column_titles, layout_of};

    fn pairs(items: &[(&str, i32)]) -> Vec<(String, i32)> {
        items.iter().map(|(t, p)| (t.to_string(), *p)).collect()
    }

    fn engine() -> DragEngine {
        DragEngine::new(&AppConfig::default())
    }

    fn changed_only_engine() -> DragEngine {
        DragEngine::new(&AppConfig {
            position_writes: PositionWrites::ChangedOnly,
            ..AppConfig::default()
        })
    }

    fn assert_contiguous(store: &BoardStore) {
        for column in store.columns() {
            let positions: Vec<i32> = store
                .cards_in(column.id)
                .iter()
                .map(|c| c.position)
                .collect();
            let expected: Vec<i32> = (0..positions.len() as i32).collect();
            assert_eq!(positions, expected, "column {}", column.title);
        }
        let column_positions: Vec<i32> = store.columns().iter().map(|c| c.position).collect();
        let expected: Vec<i32> = (0..column_positions.len() as i32).collect();
        assert_eq!(column_positions, expected);
    }

    fn drag_card(
        engine: &mut DragEngine,
        store: &mut BoardStore,
        card: CardId,
        hovers: &[DropTarget],
        drop: Option<DropTarget>,
    ) -> GestureOutcome {
        engine.start(store, DragSource::Card(card)).unwrap();
        for &target in hovers {
            engine.over(store, target).unwrap();
        }
        engine.end(store, drop).unwrap()
    }

    #[test]
    fn test_positions_stay_contiguous_across_gestures() {
        let mut store = board_with(&[
            ("Todo", &["A", "B", "C"]),
            ("Doing", &["D"]),
            ("Done", &[]),
        ]);
        let mut engine = engine();

        let a = card_id(&store, "A");
        let d = card_id(&store, "D");
        let c = card_id(&store, "C");
        let done = column_id(&store, "Done");

        drag_card(&mut engine, &mut store, a, &[DropTarget::Card(d)], Some(DropTarget::Card(d)));
        assert_contiguous(&store);
        drag_card(&mut engine, &mut store, c, &[], Some(DropTarget::Column(done)));
        assert_contiguous(&store);
        let b = card_id(&store, "B");
        drag_card(&mut engine, &mut store, d, &[], Some(DropTarget::Card(b)));
        assert_contiguous(&store);

        assert_eq!(layout_of(&store, "Todo"), pairs(&[("D", 0), ("B", 1)]));
        assert_eq!(layout_of(&store, "Doing"), pairs(&[("A", 0)]));
        assert_eq!(layout_of(&store, "Done"), pairs(&[("C", 0)]));
    }

    #[test]
    fn test_column_positions_stay_contiguous() {
        let mut store = board_with(&[("Col1", &[]), ("Col2", &[]), ("Col3", &[]), ("Col4", &[])]);
        let mut engine = engine();
        let col2 = column_id(&store, "Col2");
        let col4 = column_id(&store, "Col4");

        let before = store.snapshot();
        engine.start(&store, DragSource::Column(col2)).unwrap();
        engine.over(&mut store, DropTarget::Column(col4)).unwrap();
        assert_eq!(store.snapshot(), before);
        engine.end(&mut store, Some(DropTarget::Column(col4))).unwrap();

        assert_contiguous(&store);
        assert_eq!(
            column_titles(&store),
            pairs(&[("Col1", 0), ("Col3", 1), ("Col4", 2), ("Col2", 3)])
        );
    }

    #[test]
    fn test_dropping_card_on_itself_rewrites_same_values() {
        let mut store = board_with(&[("Todo", &["A", "B", "C"])]);
        let before = store.snapshot();
        let b = card_id(&store, "B");
        let mut engine = engine();

        let outcome = drag_card(
            &mut engine,
            &mut store,
            b,
            &[DropTarget::Card(b)],
            Some(DropTarget::Card(b)),
        );

        assert_eq!(outcome.writes.len(), 3);
        assert!(outcome.writes.iter().all(|w| before.is_unchanged(w)));
        assert_eq!(
            layout_of(&store, "Todo"),
            pairs(&[("A", 0), ("B", 1), ("C", 2)])
        );
    }

    #[test]
    fn test_dropping_card_on_itself_changed_only_writes_nothing() {
        let mut store = board_with(&[("Todo", &["A", "B", "C"])]);
        let b = card_id(&store, "B");
        let mut engine = changed_only_engine();

        let outcome = drag_card(&mut engine, &mut store, b, &[], Some(DropTarget::Card(b)));
        assert!(outcome.writes.is_empty());
    }

    #[test]
    fn test_cross_column_move_to_end_of_column() {
        let mut store = board_with(&[("A", &["card1", "card2"]), ("B", &["card3"])]);
        let card1 = card_id(&store, "card1");
        let b = column_id(&store, "B");
        let mut engine = engine();

        drag_card(
            &mut engine,
            &mut store,
            card1,
            &[DropTarget::Column(b)],
            Some(DropTarget::Column(b)),
        );

        assert_eq!(layout_of(&store, "A"), pairs(&[("card2", 0)]));
        assert_eq!(
            layout_of(&store, "B"),
            pairs(&[("card3", 0), ("card1", 1)])
        );
    }

    #[test]
    fn test_column_gesture_never_touches_cards() {
        let mut store = board_with(&[("Todo", &["A", "B"]), ("Done", &["C"])]);
        let cards_before = store.cards().to_vec();
        let todo = column_id(&store, "Todo");
        let done = column_id(&store, "Done");
        let a = card_id(&store, "A");
        let mut engine = engine();

        engine.start(&store, DragSource::Column(done)).unwrap();
        engine.over(&mut store, DropTarget::Card(a)).unwrap();
        let outcome = engine.end(&mut store, Some(DropTarget::Column(todo))).unwrap();

        assert_eq!(store.cards(), cards_before.as_slice());
        assert!(outcome
            .writes
            .iter()
            .all(|w| matches!(w, PositionWrite::Column { .. })));
    }

    #[test]
    fn test_card_gesture_never_touches_columns() {
        let mut store = board_with(&[("Todo", &["A", "B"]), ("Done", &["C"])]);
        let columns_before = store.columns().to_vec();
        let a = card_id(&store, "A");
        let done = column_id(&store, "Done");
        let mut engine = engine();

        let outcome = drag_card(&mut engine, &mut store, a, &[], Some(DropTarget::Column(done)));

        assert_eq!(store.columns(), columns_before.as_slice());
        assert!(outcome
            .writes
            .iter()
            .all(|w| matches!(w, PositionWrite::Card { .. })));
    }

    #[test]
    fn test_drop_on_column_area_appends_after_existing_cards() {
        let mut store = board_with(&[("Todo", &["A", "B", "C"]), ("Done", &["D"])]);
        let c = card_id(&store, "C");
        let todo = column_id(&store, "Todo");
        let done = column_id(&store, "Done");
        let mut engine = engine();

        let outcome = drag_card(
            &mut engine,
            &mut store,
            c,
            &[DropTarget::Column(done)],
            Some(DropTarget::Column(done)),
        );

        assert_eq!(layout_of(&store, "Todo"), pairs(&[("A", 0), ("B", 1)]));
        assert_eq!(layout_of(&store, "Done"), pairs(&[("D", 0), ("C", 1)]));

        let a = card_id(&store, "A");
        let b = card_id(&store, "B");
        let d = card_id(&store, "D");
        assert_eq!(
            outcome.writes,
            vec![
                PositionWrite::Card { card_id: a, column_id: todo, position: 0 },
                PositionWrite::Card { card_id: b, column_id: todo, position: 1 },
                PositionWrite::Card { card_id: d, column_id: done, position: 0 },
                PositionWrite::Card { card_id: c, column_id: done, position: 1 },
            ]
        );
    }

    #[test]
    fn test_drop_on_column_area_changed_only() {
        let mut store = board_with(&[("Todo", &["A", "B", "C"]), ("Done", &["D"])]);
        let c = card_id(&store, "C");
        let done = column_id(&store, "Done");
        let mut engine = changed_only_engine();

        let outcome = drag_card(&mut engine, &mut store, c, &[], Some(DropTarget::Column(done)));

        assert_eq!(
            outcome.writes,
            vec![PositionWrite::Card { card_id: c, column_id: done, position: 1 }]
        );
    }

    #[test]
    fn test_drop_on_empty_column() {
        let mut store = board_with(&[("Todo", &["A", "B"]), ("Done", &[])]);
        let b = card_id(&store, "B");
        let done = column_id(&store, "Done");
        let mut engine = engine();

        drag_card(&mut engine, &mut store, b, &[], Some(DropTarget::Column(done)));
        assert_eq!(layout_of(&store, "Done"), pairs(&[("B", 0)]));
        assert_eq!(layout_of(&store, "Todo"), pairs(&[("A", 0)]));
    }

    #[test]
    fn test_column_array_move_to_front() {
        let mut store = board_with(&[("Col1", &[]), ("Col2", &[]), ("Col3", &[])]);
        let col1 = column_id(&store, "Col1");
        let col3 = column_id(&store, "Col3");
        let mut engine = engine();

        engine.start(&store, DragSource::Column(col3)).unwrap();
        let outcome = engine.end(&mut store, Some(DropTarget::Column(col1))).unwrap();

        assert_eq!(
            column_titles(&store),
            pairs(&[("Col3", 0), ("Col1", 1), ("Col2", 2)])
        );
        assert_eq!(outcome.writes.len(), 3);
    }

    #[test]
    fn test_column_move_skips_unchanged_positions() {
        let mut store = board_with(&[("Col1", &[]), ("Col2", &[]), ("Col3", &[])]);
        let col2 = column_id(&store, "Col2");
        let col3 = column_id(&store, "Col3");
        let mut engine = engine();

        engine.start(&store, DragSource::Column(col3)).unwrap();
        let outcome = engine.end(&mut store, Some(DropTarget::Column(col2))).unwrap();

        assert_eq!(
            column_titles(&store),
            pairs(&[("Col1", 0), ("Col3", 1), ("Col2", 2)])
        );
        let col1 = column_id(&store, "Col1");
        assert!(outcome.writes.iter().all(|w| !matches!(
            w,
            PositionWrite::Column { column_id, .. } if *column_id == col1
        )));
        assert_eq!(outcome.writes.len(), 2);
    }

    #[test]
    fn test_same_column_drop_lands_before_target() {
        let mut store = board_with(&[("Todo", &["A", "B", "C", "D"])]);
        let a = card_id(&store, "A");
        let c = card_id(&store, "C");
        let d = card_id(&store, "D");
        let mut engine = engine();

        drag_card(&mut engine, &mut store, a, &[DropTarget::Card(c)], Some(DropTarget::Card(c)));
        assert_eq!(
            layout_of(&store, "Todo"),
            pairs(&[("B", 0), ("A", 1), ("C", 2), ("D", 3)])
        );

        drag_card(&mut engine, &mut store, d, &[DropTarget::Card(a)], Some(DropTarget::Card(a)));
        assert_eq!(
            layout_of(&store, "Todo"),
            pairs(&[("B", 0), ("D", 1), ("A", 2), ("C", 3)])
        );
    }

    #[test]
    fn test_preview_reparents_without_renumbering() {
        let mut store = board_with(&[("Todo", &["A", "B"]), ("Done", &["D"])]);
        let a = card_id(&store, "A");
        let d = card_id(&store, "D");
        let done = column_id(&store, "Done");
        let mut engine = engine();

        engine.start(&store, DragSource::Card(a)).unwrap();
        engine.over(&mut store, DropTarget::Card(d)).unwrap();

        let preview = store.card(a).unwrap();
        assert_eq!(preview.column_id, done);
        assert_eq!(preview.position, 0);
        assert_eq!(store.cards_in(done).len(), 2);
    }

    #[test]
    fn test_cancel_restores_pre_drag_layout() {
        let mut store = board_with(&[("Todo", &["A", "B"]), ("Done", &["D"])]);
        let before = store.snapshot();
        let a = card_id(&store, "A");
        let d = card_id(&store, "D");
        let done = column_id(&store, "Done");
        let mut engine = engine();

        engine.start(&store, DragSource::Card(a)).unwrap();
        engine.over(&mut store, DropTarget::Card(d)).unwrap();
        engine.over(&mut store, DropTarget::Column(done)).unwrap();
        let message = engine.cancel(&mut store);

        assert_eq!(store.snapshot(), before);
        assert!(engine.is_idle());
        assert_eq!(
            message.as_deref(),
            Some("Dragging was cancelled. Task A returned to its original position.")
        );
    }

    #[test]
    fn test_drop_outside_restores_and_writes_nothing() {
        let mut store = board_with(&[("Todo", &["A", "B"]), ("Done", &[])]);
        let before = store.snapshot();
        let a = card_id(&store, "A");
        let done = column_id(&store, "Done");
        let mut engine = engine();

        let outcome = drag_card(&mut engine, &mut store, a, &[DropTarget::Column(done)], None);

        assert!(outcome.writes.is_empty());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_hovering_third_column_leaves_it_untouched() {
        let mut store = board_with(&[("Todo", &["A"]), ("Doing", &["B"]), ("Done", &["C"])]);
        let a = card_id(&store, "A");
        let b = card_id(&store, "B");
        let done = column_id(&store, "Done");
        let mut engine = engine();

        let outcome = drag_card(
            &mut engine,
            &mut store,
            a,
            &[DropTarget::Column(done), DropTarget::Card(b)],
            Some(DropTarget::Card(b)),
        );

        assert_eq!(layout_of(&store, "Done"), pairs(&[("C", 0)]));
        assert_eq!(layout_of(&store, "Doing"), pairs(&[("A", 0), ("B", 1)]));
        let c = card_id(&store, "C");
        assert!(outcome.writes.iter().all(|w| !matches!(
            w,
            PositionWrite::Card { card_id, .. } if *card_id == c
        )));
    }

    #[test]
    fn test_second_start_is_rejected() {
        let store = board_with(&[("Todo", &["A", "B"])]);
        let mut engine = engine();
        engine.start(&store, DragSource::Card(card_id(&store, "A"))).unwrap();

        let result = engine.start(&store, DragSource::Card(card_id(&store, "B")));
        assert!(matches!(result, Err(BoardError::InvalidGesture(_))));
    }

    #[test]
    fn test_end_without_start_is_rejected() {
        let mut store = board_with(&[("Todo", &["A"])]);
        let mut engine = engine();
        let result = engine.end(&mut store, None);
        assert!(matches!(result, Err(BoardError::InvalidGesture(_))));
    }

    #[test]
    fn test_failed_drop_restores_and_returns_to_idle() {
        let mut store = board_with(&[("Todo", &["A", "B"])]);
        let before = store.snapshot();
        let mut engine = engine();
        engine.start(&store, DragSource::Card(card_id(&store, "A"))).unwrap();

        let missing = uuid::Uuid::new_v4();
        let result = engine.end(&mut store, Some(DropTarget::Column(missing)));

        assert!(matches!(result, Err(BoardError::NotFound(_))));
        assert!(engine.is_idle());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_announcements() {
        let mut store = board_with(&[("Todo", &["A", "B"]), ("Done", &[])]);
        let b = card_id(&store, "B");
        let done = column_id(&store, "Done");
        let mut engine = engine();

        let picked = engine.start(&store, DragSource::Card(b)).unwrap();
        assert_eq!(
            picked.as_deref(),
            Some("Picked up task B at position 2 of 2 in column Todo.")
        );
        let outcome = engine.end(&mut store, Some(DropTarget::Column(done))).unwrap();
        assert_eq!(
            outcome.announcement.as_deref(),
            Some("Dropped task B at position 1 of 1 in column Done.")
        );
    }

    #[test]
    fn test_announcements_can_be_disabled() {
        let store = board_with(&[("Todo", &["A"])]);
        let mut engine = DragEngine::new(&AppConfig {
            announcements: false,
            ..AppConfig::default()
        });
        let message = engine
            .start(&store, DragSource::Card(card_id(&store, "A")))
            .unwrap();
        assert!(message.is_none());
    }
}
