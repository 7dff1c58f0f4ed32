/// Screener Terminal - Shared Library
///
/// Everything the `screener` binary needs besides its event loop:
/// - config: environment driven terminal settings
/// - client: HTTP client for the stock and options endpoints
/// - feed: background fetch tasks reporting over an mpsc channel
/// - cursor: scroll position within the chain table
/// - widget: ratatui rendering of the session
pub mod client;
pub mod config;
pub mod cursor;
pub mod feed;
pub mod widget;

// Re-export commonly used types for convenience
pub use client::{ApiClient, FetchError};
pub use config::TerminalConfig;
pub use cursor::ChainCursor;
pub use feed::{apply_event, spawn_options_fetch, spawn_stock_fetch, FetchEvent};
pub use widget::{render_ui, row_badge, sparkline_points, tone_color};
