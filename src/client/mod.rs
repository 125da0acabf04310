//! Client side of the query service: HTTP helpers, the generic result
//! table, dropdown population and form validation.

pub mod api;
pub mod forms;
pub mod select;
pub mod table;

pub use api::{ApiClient, ClientError, StatusKind, StatusLine, DEFAULT_BASE_URL};
pub use table::{render_rows, rows_from_value, TableView};
