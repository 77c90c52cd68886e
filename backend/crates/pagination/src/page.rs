//! Page index and page size types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::window::Window;

/// Errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// A page must hold at least one item.
    #[error("page size must be greater than zero")]
    Zero,
    /// The store expresses limits as signed 64-bit integers.
    #[error("page size must not exceed {max}")]
    TooLarge {
        /// Largest accepted page size.
        max: u64,
    },
}

/// Number of items returned per page.
///
/// ## Invariants
/// - Always within `1..=i64::MAX`, so it converts losslessly into the signed
///   limit used by document stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PageSize(u64);

impl PageSize {
    /// Page size used by the person listing endpoint.
    pub const DEFAULT: Self = Self(10);

    /// Largest page size accepted by [`PageSize::new`].
    pub const MAX: u64 = i64::MAX.unsigned_abs();

    /// Validate and construct a page size.
    ///
    /// # Errors
    /// Returns [`PageSizeError`] when `size` is zero or larger than
    /// [`PageSize::MAX`].
    pub const fn new(size: u64) -> Result<Self, PageSizeError> {
        if size == 0 {
            return Err(PageSizeError::Zero);
        }
        if size > Self::MAX {
            return Err(PageSizeError::TooLarge { max: Self::MAX });
        }
        Ok(Self(size))
    }

    /// Access the raw size.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u64> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for u64 {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// A zero-based page index paired with the page size it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u64,
    page_size: PageSize,
}

impl PageRequest {
    /// Construct a request for the given zero-based page.
    #[must_use]
    pub const fn new(page: u64, page_size: PageSize) -> Self {
        Self { page, page_size }
    }

    /// Request for the first page.
    #[must_use]
    pub const fn first(page_size: PageSize) -> Self {
        Self::new(0, page_size)
    }

    /// Derive a request from the raw `page` query value.
    ///
    /// A missing, empty, negative, or non-numeric value falls back to the
    /// first page. This never fails.
    #[must_use]
    pub fn from_query_value(raw: Option<&str>, page_size: PageSize) -> Self {
        let page = raw
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or_default();
        Self::new(page, page_size)
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Page size used to compute the window.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Skip/limit window covered by this page.
    ///
    /// The skip saturates instead of overflowing for absurdly large pages;
    /// such pages are simply empty.
    #[must_use]
    pub const fn window(&self) -> Window {
        let size = self.page_size.get();
        Window::new(self.page.saturating_mul(size), size)
    }
}
