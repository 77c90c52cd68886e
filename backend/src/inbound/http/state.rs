//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the domain service and remain testable without I/O.

use pagination::PageSize;

use crate::domain::PersonService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Person use cases.
    pub persons: PersonService,
    /// Number of documents per list page.
    pub page_size: PageSize,
}

impl HttpState {
    /// Construct state with the default page size.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use person_api::domain::PersonService;
    /// use person_api::inbound::http::state::HttpState;
    /// use person_api::outbound::memory::InMemoryPersonRepository;
    ///
    /// let service = PersonService::new(
    ///     Arc::new(InMemoryPersonRepository::new()),
    ///     Duration::from_secs(5),
    /// );
    /// let state = HttpState::new(service);
    /// assert_eq!(state.page_size.get(), 10);
    /// ```
    pub fn new(persons: PersonService) -> Self {
        Self {
            persons,
            page_size: PageSize::default(),
        }
    }

    /// Override the list page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }
}
