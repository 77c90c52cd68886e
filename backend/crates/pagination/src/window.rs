//! Skip/limit windows derived from page requests.

use serde::{Deserialize, Serialize};

/// Number of items to skip and the maximum number to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    skip: u64,
    limit: u64,
}

impl Window {
    /// Construct a window directly.
    #[must_use]
    pub const fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Items to skip before the window starts.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        self.skip
    }

    /// Maximum number of items in the window.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Skip as the signed integer document stores expect.
    ///
    /// Saturated skips from huge page numbers are clamped to `i64::MAX`,
    /// which still lies past the end of any collection.
    #[must_use]
    pub fn signed_skip(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// Limit as the signed integer document stores expect.
    ///
    /// Windows built from a [`crate::PageSize`] always fit; anything larger
    /// is clamped to `i64::MAX`.
    #[must_use]
    pub fn signed_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    /// Apply the window to an already ordered sequence.
    ///
    /// # Examples
    /// ```
    /// use pagination::Window;
    ///
    /// let page: Vec<u32> = Window::new(2, 3).apply(0..10).collect();
    /// assert_eq!(page, vec![2, 3, 4]);
    /// ```
    pub fn apply<I>(&self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for window application.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Window::new(0, 10), 0..5, vec![0, 1, 2, 3, 4])]
    #[case(Window::new(10, 10), 0..25, (10..20).collect())]
    #[case(Window::new(20, 10), 0..25, (20..25).collect())]
    #[case(Window::new(30, 10), 0..25, Vec::new())]
    fn apply_slices_ordered_items(
        #[case] window: Window,
        #[case] items: std::ops::Range<u32>,
        #[case] expected: Vec<u32>,
    ) {
        assert_eq!(window.apply(items).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    #[case(Window::new(30, 10), 30)]
    #[case(Window::new(i64::MAX.unsigned_abs(), 10), i64::MAX)]
    #[case(Window::new(u64::MAX, 10), i64::MAX)]
    fn signed_skip_clamps(#[case] window: Window, #[case] expected: i64) {
        assert_eq!(window.signed_skip(), expected);
    }

    #[rstest]
    fn signed_limit_clamps() {
        assert_eq!(Window::new(0, 10).signed_limit(), 10);
        assert_eq!(Window::new(0, u64::MAX).signed_limit(), i64::MAX);
    }
}
