//! Element filtering.

/// Returns a lazy sequence of the elements of `input` for which `predicate` returns `true`.
///
/// Relative order is preserved. Nothing is evaluated until the result is consumed.
pub fn filter<I, P>(input: I, predicate: P) -> impl Iterator<Item = I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
{
    input.into_iter().filter(predicate)
}

/// Fallible variant of [`filter`].
///
/// Each kept element is yielded as `Ok`. The first predicate error is yielded as `Err` and the
/// sequence ends there, so collecting into `Result<Vec<_>, E>` aborts with the caller's error
/// unchanged.
pub fn try_filter<I, P, E>(input: I, mut predicate: P) -> impl Iterator<Item = Result<I::Item, E>>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> Result<bool, E>,
{
    let mut failed = false;
    input.into_iter().filter_map(move |item| {
        if failed {
            return None;
        }
        match predicate(&item) {
            Ok(true) => Some(Ok(item)),
            Ok(false) => None,
            Err(e) => {
                failed = true;
                Some(Err(e))
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{filter, try_filter};

    const VALUES: [i32; 5] = [12, 13, 14, 67, 12];

    #[test]
    fn filter_keeps_matching_elements_in_order() {
        let evens: Vec<i32> = filter(VALUES, |v| v % 2 == 0).collect();
        assert_eq!(evens, vec![12, 14, 12]);

        let over_twenty: Vec<i32> = filter(VALUES, |v| *v > 20).collect();
        assert_eq!(over_twenty, vec![67]);
    }

    #[test]
    fn filter_over_borrowed_input_leaves_source_unchanged() {
        let names = vec!["Ana".to_string(), "Marcos".to_string(), "Amanda".to_string()];
        let out: Vec<&String> = filter(&names, |n| n.starts_with('A')).collect();
        assert_eq!(out, vec!["Ana", "Amanda"]);
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn filter_can_return_empty_sequence() {
        assert_eq!(filter(VALUES, |_| false).count(), 0);
        assert_eq!(filter(Vec::<i32>::new(), |_| true).count(), 0);
    }

    #[test]
    fn filter_is_lazy() {
        let mut calls = 0;
        let mut it = filter(VALUES, |_| {
            calls += 1;
            true
        });
        assert_eq!(it.next(), Some(12));
        drop(it);
        assert_eq!(calls, 1);
    }

    #[test]
    fn try_filter_propagates_first_error_unchanged() {
        let out: Result<Vec<i32>, String> = try_filter(VALUES, |v| {
            if *v == 67 {
                Err(format!("cannot judge {v}"))
            } else {
                Ok(v % 2 == 0)
            }
        })
        .collect();
        assert_eq!(out, Err("cannot judge 67".to_string()));
    }

    #[test]
    fn try_filter_stops_after_error() {
        let mut seen = Vec::new();
        let items: Vec<Result<i32, &str>> = try_filter(VALUES, |v| {
            seen.push(*v);
            if *v == 13 { Err("boom") } else { Ok(true) }
        })
        .collect();
        assert_eq!(items, vec![Ok(12), Err("boom")]);
        assert_eq!(seen, vec![12, 13]);
    }
}
