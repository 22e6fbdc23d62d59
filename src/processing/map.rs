//! Element mapping.

/// Returns a lazy sequence with every element of `input` replaced by `transform(element)`.
///
/// The output has exactly as many elements as the input, in the same order.
pub fn map<I, F, U>(input: I, transform: F) -> impl Iterator<Item = U>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> U,
{
    input.into_iter().map(transform)
}

/// Fallible variant of [`map`].
///
/// Yields `Ok(transform(element))` until the first error, which is yielded once and ends the
/// sequence.
pub fn try_map<I, F, U, E>(input: I, mut transform: F) -> impl Iterator<Item = Result<U, E>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<U, E>,
{
    let mut failed = false;
    input.into_iter().map_while(move |item| {
        if failed {
            return None;
        }
        let out = transform(item);
        failed = out.is_err();
        Some(out)
    })
}

#[cfg(test)]
mod tests {
    use super::{map, try_map};

    #[test]
    fn map_transforms_each_element_and_preserves_length() {
        let input = [12, 13, 14, 67, 12];
        let out: Vec<i32> = map(input, |v| v * 10).collect();
        assert_eq!(out.len(), input.len());
        assert_eq!(out, vec![120, 130, 140, 670, 120]);
    }

    #[test]
    fn map_can_change_element_type() {
        let names = ["Ana", "Amanda"];
        let out: Vec<String> = map(names, str::to_uppercase).collect();
        assert_eq!(out, vec!["ANA".to_string(), "AMANDA".to_string()]);

        let lens: Vec<usize> = map(&names, |n| n.len()).collect();
        assert_eq!(lens, vec![3, 6]);
    }

    #[test]
    fn map_over_empty_input_is_empty() {
        assert_eq!(map(Vec::<i32>::new(), |v| v + 1).count(), 0);
    }

    #[test]
    fn try_map_parses_until_first_failure() {
        let ok: Result<Vec<i64>, std::num::ParseIntError> =
            try_map(["1", "2", "3"], str::parse::<i64>).collect();
        assert_eq!(ok.unwrap(), vec![1, 2, 3]);

        let err: Result<Vec<i64>, std::num::ParseIntError> =
            try_map(["1", "x", "3"], str::parse::<i64>).collect();
        assert!(err.is_err());
    }

    #[test]
    fn try_map_does_not_call_transform_after_error() {
        let mut calls = 0;
        let items: Vec<Result<i32, &str>> = try_map([1, 2, 3, 4], |v| {
            calls += 1;
            if v == 2 { Err("bad") } else { Ok(v) }
        })
        .collect();
        assert_eq!(items, vec![Ok(1), Err("bad")]);
        assert_eq!(calls, 2);
    }
}
