pub mod board;
pub mod card;
pub mod column;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use taskboard_core::{BoardResult, Notice};
use taskboard_domain::{BoardSession, DragSource, DropTarget, GestureOutcome, ReconcileReport};

/// Dates given on the command line mean the start of that day in UTC.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Everything a scripted drag produced, in the order a screen reader would
/// have heard it.
#[derive(Serialize)]
pub struct MoveReport {
    pub announcements: Vec<String>,
    pub outcome: GestureOutcome,
    pub reconcile: ReconcileReport,
    pub notices: Vec<Notice>,
}

/// Run one whole gesture: pick up, hover once over the target, drop, persist.
pub async fn drag(
    session: &mut BoardSession,
    source: DragSource,
    target: DropTarget,
) -> BoardResult<MoveReport> {
    let mut announcements = Vec::new();
    announcements.extend(session.drag_start(source)?);
    match session.drag_over(target) {
        Ok(message) => announcements.extend(message),
        Err(err) => {
            announcements.extend(session.drag_cancel());
            return Err(err);
        }
    }
    let outcome = session.drag_end(Some(target))?;
    announcements.extend(outcome.announcement.clone());

    let reconcile = session.reconcile().await;
    Ok(MoveReport {
        announcements,
        outcome,
        reconcile,
        notices: session.drain_notices(),
    })
}
