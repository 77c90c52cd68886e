//! Page-number pagination primitives for Person API list endpoints.
//!
//! Pagination is stateless. Clients send an optional zero-based `page` query
//! parameter and the server derives a skip/limit [`Window`] from it and a
//! fixed [`PageSize`]. Nothing is persisted between requests.
//!
//! Parsing is deliberately soft: a missing or unparsable page is treated as
//! the first page rather than a validation failure.
//!
//! # Examples
//! ```
//! use pagination::{PageRequest, PageSize};
//!
//! let request = PageRequest::from_query_value(Some("3"), PageSize::DEFAULT);
//! let window = request.window();
//! assert_eq!(window.skip(), 30);
//! assert_eq!(window.limit(), 10);
//!
//! let fallback = PageRequest::from_query_value(Some("abc"), PageSize::DEFAULT);
//! assert_eq!(fallback.page(), 0);
//! ```

mod page;
mod window;

pub use page::{PageRequest, PageSize, PageSizeError};
pub use window::Window;
