//! Sliding windows over flat sequences.
//!
//! Windows are exact: a sequence of length `N >= W` yields `N - W + 1`
//! windows sliding by one value, and a shorter sequence yields none.

use std::num::NonZeroUsize;

use tracing::warn;

use crate::logging::{event_names, Stage};

/// Number of windows of `size` over `len` values.
pub fn window_count(len: usize, size: NonZeroUsize) -> usize {
    (len + 1).saturating_sub(size.get())
}

/// Iterate the exact sliding windows of `values`.
///
/// A sequence shorter than the window yields nothing; that is logged, not an error.
pub fn sliding_windows(values: &[f64], size: NonZeroUsize) -> std::slice::Windows<'_, f64> {
    if !values.is_empty() && values.len() < size.get() {
        warn_short_sequence(values.len(), size);
    }
    values.windows(size.get())
}

pub(crate) fn warn_short_sequence(len: usize, size: NonZeroUsize) {
    warn!(
        event = event_names::SEQUENCE_TOO_SHORT,
        stage = %Stage::Window,
        len,
        window_size = size.get(),
        "sequence shorter than the window yields no windows"
    );
}

/// Convert a configured window size.
pub fn window_size(size: usize) -> Option<NonZeroUsize> {
    NonZeroUsize::new(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_exact_windows() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let windows: Vec<&[f64]> = sliding_windows(&xs, w(2)).collect();
        assert_eq!(windows, vec![&[1.0, 2.0][..], &[2.0, 3.0], &[3.0, 4.0]]);
        assert_eq!(window_count(xs.len(), w(2)), 3);
    }

    #[test]
    fn test_whole_sequence_is_one_window() {
        let xs = [1.0, 2.0, 3.0];
        assert_eq!(sliding_windows(&xs, w(3)).count(), 1);
        assert_eq!(window_count(3, w(3)), 1);
    }

    #[test]
    fn test_short_sequence_yields_nothing() {
        let xs = [1.0, 2.0];
        assert_eq!(sliding_windows(&xs, w(3)).count(), 0);
        assert_eq!(window_count(2, w(3)), 0);
        assert_eq!(window_count(0, w(1)), 0);
    }

    #[test]
    fn test_window_size_zero_rejected() {
        assert!(window_size(0).is_none());
        assert_eq!(window_size(16).map(NonZeroUsize::get), Some(16));
    }
}
