//! Constants for the interactive TUI module

/// Event polling interval in milliseconds
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// Double Ctrl+C timeout in seconds
pub const DOUBLE_CTRL_C_TIMEOUT_SECS: u64 = 1;

/// Height of the search bar component
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Page size for PageUp/PageDown navigation
pub const PAGE_SIZE: usize = 10;

/// Maximum width of the error dialog
pub const ERROR_DIALOG_MAX_WIDTH: u16 = 70;

/// Height of the error dialog
pub const ERROR_DIALOG_HEIGHT: u16 = 7;

pub const EXIT_PROMPT: &str = "Press Ctrl+C again to exit";
