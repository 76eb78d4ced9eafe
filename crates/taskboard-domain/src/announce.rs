//! Status strings for assistive technology. Purely observational.

pub fn picked_up_card(title: &str, index: usize, len: usize, column: &str) -> String {
    format!(
        "Picked up task {} at position {} of {} in column {}.",
        title,
        index + 1,
        len,
        column
    )
}

pub fn picked_up_column(title: &str, index: usize, len: usize) -> String {
    format!(
        "Picked up column {} at position {} of {}.",
        title,
        index + 1,
        len
    )
}

pub fn card_over_card(title: &str, over: &str, column: &str) -> String {
    format!("Task {} is over task {} in column {}.", title, over, column)
}

pub fn card_over_column(title: &str, column: &str) -> String {
    format!("Task {} is over column {}.", title, column)
}

pub fn column_over_column(title: &str, over: &str, index: usize, len: usize) -> String {
    format!(
        "Column {} is over column {} at position {} of {}.",
        title,
        over,
        index + 1,
        len
    )
}

pub fn dropped_card(title: &str, index: usize, len: usize, column: &str) -> String {
    format!(
        "Dropped task {} at position {} of {} in column {}.",
        title,
        index + 1,
        len,
        column
    )
}

pub fn dropped_column(title: &str, index: usize, len: usize) -> String {
    format!(
        "Dropped column {} at position {} of {}.",
        title,
        index + 1,
        len
    )
}

pub fn cancelled(kind: &str, title: &str) -> String {
    format!(
        "Dragging was cancelled. {} {} returned to its original position.",
        kind, title
    )
}
