//! Sequence generators for laying out factor columns.
//!
//! Factorial data sets are usually written as a few short level lists
//! expanded by repetition. The two shapes used everywhere are "repeat each
//! element" and "repeat the whole sequence":
//!
//! ```
//! use yates::utils::{repeat_each, tile};
//!
//! assert_eq!(repeat_each(&[6, 12], 2), vec![6, 6, 12, 12]);
//! assert_eq!(tile(&[6, 12], 2), vec![6, 12, 6, 12]);
//! ```

/// Repeat every element `times` times in place.
///
/// `[a, b]` with `times = 3` becomes `[a, a, a, b, b, b]`.
///
/// # Examples
///
/// ```
/// use yates::utils::repeat_each;
///
/// assert_eq!(repeat_each(&["x", "y"], 3), vec!["x", "x", "x", "y", "y", "y"]);
/// assert!(repeat_each(&[1, 2], 0).is_empty());
/// ```
#[must_use]
pub fn repeat_each<T: Clone>(values: &[T], times: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len() * times);
    for v in values {
        out.extend(std::iter::repeat(v).take(times).cloned());
    }
    out
}

/// Concatenate the whole sequence `times` times.
///
/// `[a, b]` with `times = 3` becomes `[a, b, a, b, a, b]`.
///
/// # Examples
///
/// ```
/// use yates::utils::tile;
///
/// assert_eq!(tile(&["Spring", "Summer"], 2), vec!["Spring", "Summer", "Spring", "Summer"]);
/// assert!(tile::<u8>(&[], 4).is_empty());
/// ```
#[must_use]
pub fn tile<T: Clone>(values: &[T], times: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(values.len() * times);
    for _ in 0..times {
        out.extend_from_slice(values);
    }
    out
}
