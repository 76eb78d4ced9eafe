use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_domain::{ColumnColor, Role};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Reorder columns and task cards on project boards", long_about = None)]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKBOARD_COMMIT"), ")")
)]
pub struct Cli {
    /// Path to the board data file (or set TASKBOARD_FILE env var)
    #[arg(long, value_name = "FILE", env = "TASKBOARD_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Act with a role's permissions: admin, project-manager, member, viewer
    #[arg(long, global = true, value_parser = parse_role)]
    pub role: Option<Role>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Task card operations
    Card(CardCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::parse(s).ok_or_else(|| format!("unknown role '{}'", s))
}

fn parse_color(s: &str) -> Result<ColumnColor, String> {
    ColumnColor::parse(s).ok_or_else(|| format!("unknown color '{}'", s))
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Create the board for a project
    Create {
        #[arg(long)]
        project_id: Uuid,
        #[arg(long)]
        name: String,
        /// First day of the project (YYYY-MM-DD)
        #[arg(long)]
        starts_on: Option<NaiveDate>,
        /// Last day of the project (YYYY-MM-DD)
        #[arg(long)]
        ends_on: Option<NaiveDate>,
    },
    /// Show a project's board with every column and card
    Show {
        #[arg(long)]
        project_id: Uuid,
    },
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Add a column after the last one
    Add {
        #[arg(long)]
        project_id: Uuid,
        #[arg(long)]
        title: String,
    },
    /// Rename a column
    Rename {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        title: String,
    },
    /// Change a column's color
    Color {
        #[arg(long)]
        id: Uuid,
        #[arg(long, value_parser = parse_color)]
        color: ColumnColor,
    },
    /// Delete a column and its cards
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Drag a column and drop it onto another column
    Move {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        onto: Uuid,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Add a task card at the end of a column
    Add(CardAddArgs),
    /// Rename a task card
    Rename {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        title: String,
    },
    /// Delete a task card
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Drag a task card onto another card or an empty column area
    Move(CardMoveArgs),
}

#[derive(Args)]
pub struct CardAddArgs {
    #[arg(long)]
    pub column_id: Uuid,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<NaiveDate>,
    /// User to assign; repeat for several
    #[arg(long = "assignee")]
    pub assignees: Vec<Uuid>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["onto_card", "onto_column"])))]
pub struct CardMoveArgs {
    #[arg(long)]
    pub id: Uuid,
    /// Drop before this card
    #[arg(long)]
    pub onto_card: Option<Uuid>,
    /// Drop at the end of this column
    #[arg(long)]
    pub onto_column: Option<Uuid>,
}
