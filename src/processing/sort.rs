//! Ordering operations.
//!
//! Sorting is the only step that materializes its input. All sorts here are stable: elements the
//! comparator considers equal keep their input order.

use std::cmp::Ordering;

/// Materializes `input` and returns it ordered by `comparator`.
pub fn sort<I, C>(input: I, comparator: C) -> Vec<I::Item>
where
    I: IntoIterator,
    C: FnMut(&I::Item, &I::Item) -> Ordering,
{
    let mut items: Vec<I::Item> = input.into_iter().collect();
    items.sort_by(comparator);
    items
}

/// Ascending sort by the element's own order.
pub fn sort_natural<I>(input: I) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Ord,
{
    let mut items: Vec<I::Item> = input.into_iter().collect();
    items.sort();
    items
}

/// Descending sort by the element's own order.
pub fn sort_descending<I>(input: I) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Ord,
{
    sort(input, |a, b| b.cmp(a))
}

/// Ascending sort by a derived key.
pub fn sort_by_key<I, K, F>(input: I, key: F) -> Vec<I::Item>
where
    I: IntoIterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut items: Vec<I::Item> = input.into_iter().collect();
    items.sort_by_key(key);
    items
}

/// Fallible variant of [`sort`].
///
/// The first comparator error aborts the sort and is returned unchanged; the partially ordered
/// elements are dropped.
pub fn try_sort<I, C, E>(input: I, mut comparator: C) -> Result<Vec<I::Item>, E>
where
    I: IntoIterator,
    C: FnMut(&I::Item, &I::Item) -> Result<Ordering, E>,
{
    merge_sort(input.into_iter().collect(), &mut comparator)
}

// Stable top-down merge sort that stops at the first comparator error.
fn merge_sort<T, C, E>(mut items: Vec<T>, comparator: &mut C) -> Result<Vec<T>, E>
where
    C: FnMut(&T, &T) -> Result<Ordering, E>,
{
    if items.len() <= 1 {
        return Ok(items);
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, comparator)?;
    let right = merge_sort(right, comparator)?;

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        // Right wins only when strictly smaller.
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => comparator(r, l)? == Ordering::Less,
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }
    out.extend(left);
    out.extend(right);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{sort, sort_by_key, sort_descending, sort_natural, try_sort};
    use crate::types::Employee;

    #[test]
    fn sort_natural_orders_ascending() {
        assert_eq!(sort_natural([12, 13, 14, 67, 12]), vec![12, 12, 13, 14, 67]);
        assert_eq!(
            sort_natural(["ANA", "AMANDA"]),
            vec!["AMANDA", "ANA"]
        );
    }

    #[test]
    fn sort_with_reversed_comparator_orders_descending() {
        assert_eq!(sort([13, 67], |a, b| b.cmp(a)), vec![67, 13]);
        assert_eq!(sort_descending([1, 3, 2]), vec![3, 2, 1]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let staff = vec![
            Employee::new(1, "Ana", 1200.0, "TI"),
            Employee::new(2, "Carlos", 1500.0, "Comercial"),
            Employee::new(4, "Marcos", 1800.0, "TI"),
            Employee::new(3, "Beatriz", 2000.0, "Financeiro"),
        ];
        let ids: Vec<i64> = sort_by_key(staff, |e| e.department.clone())
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn sort_handles_empty_and_single_inputs() {
        assert!(sort_natural(Vec::<i32>::new()).is_empty());
        assert_eq!(sort([5], |a: &i32, b: &i32| a.cmp(b)), vec![5]);
    }

    #[test]
    fn try_sort_matches_sort_when_comparator_succeeds() {
        let input = vec![5, 3, 9, 1, 3, 7, 0, 2];
        let out: Result<Vec<i32>, ()> = try_sort(input.clone(), |a, b| Ok(a.cmp(b)));
        assert_eq!(out.unwrap(), sort_natural(input));
    }

    #[test]
    fn try_sort_is_stable() {
        let pairs = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let out: Result<Vec<(i32, char)>, ()> = try_sort(pairs, |a, b| Ok(a.0.cmp(&b.0)));
        assert_eq!(out.unwrap(), vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn try_sort_returns_comparator_error() {
        let out = try_sort([3, 1, 2], |a: &i32, b: &i32| {
            if *a == 2 || *b == 2 {
                Err("incomparable")
            } else {
                Ok(a.cmp(b))
            }
        });
        assert_eq!(out, Err("incomparable"));
    }
}
