//! Staff directory slice.
//!
//! Everything a host surface needs to show the employees of one group:
//! providers for groups and employees, the immutable query state, and the
//! pipeline that turns a raw collection into the visible page.

pub mod error;
pub mod filter;
pub mod http;
pub mod model;
pub mod pagination;
pub mod pipeline;
pub mod provider;
pub mod query;
pub mod seed;
pub mod session;
pub mod view;

pub use error::{DirectoryError, DirectoryResult};
pub use filter::FilterState;
pub use http::HttpDirectory;
pub use model::{Employee, EmployeeGroup, EmployeeStatus};
pub use pagination::{ITEMS_PER_PAGE, Pagination};
pub use provider::{DirectoryProvider, StaticDirectory};
pub use query::{DirectoryQuery, SortDirection, SortField, SortSpec};
pub use session::DirectorySession;
pub use view::{FetchTicket, ListView, LoadOutcome, LoadState, PageView, ViewChange};
