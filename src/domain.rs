use std::env::VarError;
use std::io::Error;
use std::time::Duration;

use derive_setters::Setters;
use polars::error::PolarsError;
use ratatui::crossterm::event::KeyEvent;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum TVError {
    #[error("io error: {0}")]
    IoError(#[from] Error),
    #[error("polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),
    #[error("failed to expand path: {0}")]
    PathExpansion(#[from] shellexpand::LookupError<VarError>),
    #[error("loading failed: {0}")]
    LoadingFailed(String),
    #[error("column '{0}' is missing from the data file")]
    MissingColumn(String),
    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },
    #[error("file not found")]
    FileNotFound,
    #[error("permission denied")]
    PermissionDenied,
    #[error("unknown file type")]
    UnknownFileType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MovePageUp,
    MovePageDown,
    MoveBeginning,
    MoveEnd,
    Sort,
    MoveColumn,
    Save,
    Reset,
    ToggleLogin,
    Help,
    Enter,
    Exit,
    Resize(usize, usize),
    RawKey(KeyEvent),
}

/// Runtime settings of the table. Built from the command line in `main`.
#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_", into)]
pub struct TVConfig {
    pub event_poll_time: u64,
    /// Rows materialized when the table is mounted.
    pub initial_rows: usize,
    /// Rows appended on every load-more.
    pub page_size: usize,
    /// Distance (in rows) from the end of the window that triggers a load-more.
    pub load_threshold: usize,
    pub max_column_width: usize,
    /// Key under which the column layout is persisted.
    pub layout_key: String,
    pub status_timeout: Duration,
}

impl Default for TVConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            initial_rows: 15,
            page_size: 10,
            load_threshold: 3,
            max_column_width: 40,
            layout_key: "columnLayout".to_string(),
            status_timeout: Duration::from_secs(4),
        }
    }
}

pub const HELP_TEXT: &str = "\
Navigation
  Up/k, Down/j        move row
  Left/h, Right/l     move column
  PageUp, PageDown    move page
  g/Home, G/End       first / last loaded row

Table
  Enter, o            sort by the selected column (again to flip)
  m                   pick up the selected column (logged in only)
                      Left/Right to move, Enter to drop, Esc to cancel
  s                   save column layout
  r                   reset column layout

Session
  i                   log in / log out

  ?                   this help
  Esc                 close popup
  q                   quit";
