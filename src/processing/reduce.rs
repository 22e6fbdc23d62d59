//! Left folds with a caller-supplied accumulator.

/// Folds `input` left to right: starting from `seed`, each element is combined into the
/// accumulator with `combine(acc, element)`.
///
/// Returns `seed` unchanged for an empty input.
pub fn reduce<I, R, F>(input: I, seed: R, combine: F) -> R
where
    I: IntoIterator,
    F: FnMut(R, I::Item) -> R,
{
    input.into_iter().fold(seed, combine)
}

/// Fallible variant of [`reduce`]. Stops at the first `Err` and returns it unchanged.
pub fn try_reduce<I, R, F, E>(input: I, seed: R, combine: F) -> Result<R, E>
where
    I: IntoIterator,
    F: FnMut(R, I::Item) -> Result<R, E>,
{
    input.into_iter().try_fold(seed, combine)
}

#[cfg(test)]
mod tests {
    use super::{reduce, try_reduce};
    use crate::types::Employee;

    const VALUES: [i64; 5] = [12, 13, 14, 67, 12];

    #[test]
    fn reduce_sums_and_multiplies() {
        assert_eq!(reduce([1, 2, 3], 0, |a, b| a + b), 6);
        assert_eq!(reduce(VALUES, 0, |a, b| a + b), 118);
        assert_eq!(reduce(VALUES, 1, |a, b| a * b), 1_755_936);
    }

    #[test]
    fn reduce_threads_accumulator_left_to_right() {
        // a + b*b only squares the element, not the running total.
        assert_eq!(reduce(VALUES, 0, |a, b| a + b * b), 5_142);

        let joined = reduce(["a", "b", "c"], String::new(), |mut acc, s| {
            acc.push_str(s);
            acc
        });
        assert_eq!(joined, "abc");
    }

    #[test]
    fn reduce_of_empty_input_returns_seed() {
        assert_eq!(reduce(Vec::<i64>::new(), 42, |a, b| a + b), 42);
    }

    #[test]
    fn reduce_can_accumulate_records() {
        let payroll = [
            Employee::new(1, "Ana", 1200.0, "TI"),
            Employee::new(4, "Marcos", 1800.0, "TI"),
        ];
        let total = reduce(&payroll, 0.0, |acc, e| acc + e.salary);
        assert_eq!(total, 3000.0);
    }

    #[test]
    fn try_reduce_stops_at_first_error() {
        let mut visited = 0;
        let out = try_reduce(VALUES, 0i64, |acc, v| {
            visited += 1;
            acc.checked_add(v).filter(|s| *s < 50).ok_or(v)
        });
        assert_eq!(out, Err(67));
        assert_eq!(visited, 4);

        let ok: Result<i64, ()> = try_reduce(Vec::<i64>::new(), 7, |a, b| Ok(a + b));
        assert_eq!(ok, Ok(7));
    }
}
