//! SQL execution against a SQLite database.
//!
//! The database is opened for each statement and closed afterwards, so no
//! connection state is shared between tool calls. Results are rendered as
//! Markdown tables for display in chat clients.

pub mod connection;
pub mod extract;
pub mod format;

pub use connection::{SqlExecutor, SqlOutcome};
pub use extract::{ChatMessage, extract_sql_query};
pub use format::render_outcome;
