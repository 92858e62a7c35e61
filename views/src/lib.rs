//! Views Crate
//!
//! Pure, synchronous logic behind the dashboard pages. Nothing in this crate
//! performs I/O; the API server feeds it snapshots and form input.
//!
//! # Modules
//!
//! - `projects`: the projects page view model (filter, sort, aggregates)
//! - `validation`: declarative validation of the add-client, add-project and
//!   login forms
//!
//! # Example
//!
//! ```rust,ignore
//! use shared_types::{SortKey, StatusFilter};
//!
//! let view = views::derive_view(&projects, StatusFilter::All, SortKey::Budget);
//! println!("{} active of {}", view.active_count, view.total);
//! ```

pub mod projects;
pub mod validation;

pub use projects::{
    active_count, count_by_status, derive_view, filter_and_sort, total_budget,
    unrecognized_count,
};
pub use validation::{validate_credentials, validate_new_client, validate_new_project};
