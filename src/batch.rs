//! Elementwise batch evaluation over aligned columns.
//!
//! The batch entry points map the scalar contract over rows of tabular
//! input, broadcasting scalar arguments across the column length. They hold
//! none of the math themselves; every row goes through the same single-
//! instance functions as a scalar call, so batch and scalar evaluation can
//! never disagree.

use chrono::NaiveDateTime;

use crate::{get_position, get_times_with_height, Error, SunPosition, SunTimes};

/// One argument of a batch call: a scalar broadcast across every row, or a
/// column with one value per row.
#[derive(Copy, Clone, Debug)]
pub enum ColumnArg<'a, T> {
    /// Single value applied to every row
    Scalar(T),
    /// Per-row values; all columns of one call must have equal length
    Column(&'a [T]),
}

impl<T: Copy> ColumnArg<'_, T> {
    fn len(&self) -> Option<usize> {
        match self {
            ColumnArg::Scalar(_) => None,
            ColumnArg::Column(values) => Some(values.len()),
        }
    }

    fn row(&self, index: usize) -> T {
        match self {
            ColumnArg::Scalar(value) => *value,
            ColumnArg::Column(values) => values[index],
        }
    }
}

impl<T: Copy> From<T> for ColumnArg<'_, T> {
    fn from(value: T) -> Self {
        ColumnArg::Scalar(value)
    }
}

impl<'a, T: Copy> From<&'a [T]> for ColumnArg<'a, T> {
    fn from(values: &'a [T]) -> Self {
        ColumnArg::Column(values)
    }
}

impl<'a, T: Copy> From<&'a Vec<T>> for ColumnArg<'a, T> {
    fn from(values: &'a Vec<T>) -> Self {
        ColumnArg::Column(values.as_slice())
    }
}

/// Common row count of the given column lengths (`None` = scalar).
///
/// All-scalar input broadcasts to a single row.
fn broadcast_len(lens: &[Option<usize>]) -> Result<usize, Error> {
    let mut common = None;
    for len in lens.iter().copied().flatten() {
        match common {
            None => common = Some(len),
            Some(expected) if expected != len => {
                return Err(Error::ShapeMismatch { expected, actual: len })
            }
            Some(_) => {}
        }
    }
    Ok(common.unwrap_or(1))
}

/// Batch variant of [`get_position`](crate::get_position).
///
/// Accepts any mix of scalars and equal-length columns and returns one
/// [`SunPosition`] per broadcast row, in row order.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when two columns have different lengths.
///
/// # Example
///
/// ```
/// use suncalc::{get_position_batch, time::parse_utc};
///
/// let dates = vec![
///     parse_utc("2013-03-05T00:00:00Z").unwrap(),
///     parse_utc("2013-06-05T00:00:00Z").unwrap(),
/// ];
/// // One date per row, a single location broadcast across both rows.
/// let positions = get_position_batch(&dates, 30.5, 50.5).unwrap();
/// assert_eq!(positions.len(), 2);
/// ```
pub fn get_position_batch<'a>(
    dates: impl Into<ColumnArg<'a, NaiveDateTime>>,
    lngs: impl Into<ColumnArg<'a, f64>>,
    lats: impl Into<ColumnArg<'a, f64>>,
) -> Result<Vec<SunPosition>, Error> {
    let (dates, lngs, lats) = (dates.into(), lngs.into(), lats.into());
    let rows = broadcast_len(&[dates.len(), lngs.len(), lats.len()])?;
    Ok((0..rows)
        .map(|i| get_position(dates.row(i), lngs.row(i), lats.row(i)))
        .collect())
}

/// Batch variant of [`get_times_with_height`](crate::get_times_with_height).
///
/// Accepts any mix of scalars and equal-length columns and returns one
/// [`SunTimes`] per broadcast row, in row order. Rows are independent; a
/// no-crossing day in one row does not affect any other.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] when two columns have different lengths,
/// or [`Error::TimeOutOfRange`] when a row's events fall outside the
/// representable calendar range.
pub fn get_times_batch<'a>(
    dates: impl Into<ColumnArg<'a, NaiveDateTime>>,
    lngs: impl Into<ColumnArg<'a, f64>>,
    lats: impl Into<ColumnArg<'a, f64>>,
    heights: impl Into<ColumnArg<'a, f64>>,
) -> Result<Vec<SunTimes>, Error> {
    let (dates, lngs, lats, heights) = (dates.into(), lngs.into(), lats.into(), heights.into());
    let rows = broadcast_len(&[dates.len(), lngs.len(), lats.len(), heights.len()])?;
    (0..rows)
        .map(|i| get_times_with_height(dates.row(i), lngs.row(i), lats.row(i), heights.row(i)))
        .collect()
}
