// Element moves shared by the sorting routines.
//
// Scratch space never holds meaningful values, so every "move" is a swap:
// the destination's old contents are dead and may land anywhere.

/// Exchange `len` elements of `a` starting at `a_start` with those of `b`
/// starting at `b_start`.
pub fn swap_between<T>(a: &mut [T], a_start: usize, b: &mut [T], b_start: usize, len: usize) {
    a[a_start..a_start + len].swap_with_slice(&mut b[b_start..b_start + len]);
}

/// Exchange two non-overlapping blocks of `size` elements within `v`.
pub fn swap_blocks<T>(v: &mut [T], i: usize, j: usize, size: usize) {
    if size == 0 || i == j {
        return;
    }

    let (lo, hi) = if i < j { (i, j) } else { (j, i) };
    debug_assert!(lo + size <= hi, "blocks at {lo} and {hi} overlap");

    let (left, right) = v.split_at_mut(hi);
    left[lo..lo + size].swap_with_slice(&mut right[..size]);
}

/// Move `v[start..end]` right by `by` places. The `by` elements past `end`
/// must be dead; they end up in `v[start..start + by]`.
pub fn shift_right<T>(v: &mut [T], start: usize, end: usize, by: usize) {
    v[start..end + by].rotate_right(by);
}
