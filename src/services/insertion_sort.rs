use std::cmp::Ordering;

use crate::models::span::Span;

/// Stable guarded insertion sort of the whole of `v`, ascending by `cmp`.
pub fn insertion_sort_by<T, F>(v: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && cmp(&v[i], &v[j - 1]) == Ordering::Less {
            j -= 1;
        }
        v[j..=i].rotate_right(1);
    }
}

/// Stable insertion sort of `v[span]` that relies on `v[span.left - 1]`
/// being no greater than anything in the span, so the scan needs no bound.
pub fn insertion_sort_unguarded_by<T, F>(v: &mut [T], span: Span, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(span.left > 0, "unguarded sort needs a sentinel at {}", span.left);

    for i in span.left + 1..span.right {
        let mut j = i;
        while cmp(&v[i], &v[j - 1]) == Ordering::Less {
            j -= 1;
        }
        v[j..=i].rotate_right(1);
    }
}
