// Stable merges of adjacent sorted spans.
//
// "Up" merges run forward, "down" merges run backward, and "out" merges
// write into the scratch buffer. When the buffer is too small for a merge,
// the spans are split around a rotation and merged piecewise.

use std::cmp::Ordering;

use crate::models::span::Span;
use crate::utils::slice_ops::{swap_between, swap_blocks};

/// Run counts up to which boundary search is a linear scan.
const PREFER_LINEAR_SEARCH: usize = 24;

/// Where a span's elements currently live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The slice being sorted
    Main,
    /// The scratch buffer
    Scratch,
}

/// Boundary index in `runs[first..=last + 1]` whose start is closest to
/// `find`.
fn bisect_runs(runs: &[Span], first: usize, last: usize, find: usize) -> usize {
    if first >= last {
        return first;
    }

    let mut i = first;

    if last - first <= PREFER_LINEAR_SEARCH {
        while i < last && runs[i].left < find {
            i += 1;
        }
    } else {
        let mut d = last - first;
        while d > 0 {
            while i + d < last && runs[i + d].left <= find {
                i += d;
            }
            d >>= 1;
        }
    }

    // Take the nearer edge of the run we landed in
    let run = runs[i];
    i + usize::from(find.saturating_sub(run.left) > run.right.saturating_sub(find))
}

/// Number of trailing elements of `a` that must trade places with as many
/// leading elements of `b` before each side can be merged independently.
pub fn merge_radius<T, F>(v: &[T], a: Span, b: Span, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let range = a.len().min(b.len());
    if range == 0 {
        return 0;
    }

    let mut i = a.right;
    let mut j = b.left - 1;
    let min = i - range;

    let mut d = range;
    while d > 0 {
        while i >= min + d && cmp(&v[i - d], &v[j + d]) == Ordering::Greater {
            i -= d;
            j += d;
        }
        d >>= 1;
    }

    a.right - i
}

/// Forward merge of `a` (in `buf`) and `b` (in `v`) into `out` (in `v`).
/// `out` must end where `b` ends and be exactly as long as both.
pub fn merge_up<T, F>(v: &mut [T], buf: &mut [T], a: Span, b: Span, out: Span, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut l, mut r) = (a.left, b.left);
    let mut i = out.left;

    while i < out.right && l < a.right {
        if r >= b.right || cmp(&buf[l], &v[r]) != Ordering::Greater {
            std::mem::swap(&mut v[i], &mut buf[l]);
            l += 1;
        } else {
            v.swap(i, r);
            r += 1;
        }
        i += 1;
    }
}

/// Backward merge of `a` (in `v`) and `b` (in `v` or `buf`, per `b_src`)
/// into `out` (in `v`). `out` must start where `a` starts.
pub fn merge_down<T, F>(
    v: &mut [T],
    buf: &mut [T],
    a: Span,
    b: Span,
    b_src: Source,
    out: Span,
    cmp: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut l, mut r) = (a.right, b.right);
    let mut i = out.right;

    while i > out.left && r > b.left {
        i -= 1;

        let take_a = l > a.left && {
            let last_b = match b_src {
                Source::Main => &v[r - 1],
                Source::Scratch => &buf[r - 1],
            };
            cmp(&v[l - 1], last_b) == Ordering::Greater
        };

        if take_a {
            l -= 1;
            v.swap(i, l);
        } else {
            r -= 1;
            match b_src {
                Source::Main => v.swap(i, r),
                Source::Scratch => std::mem::swap(&mut v[i], &mut buf[r]),
            }
        }
    }
}

/// Merge `a` and `b` (both in `v`) into `out` (in `buf`).
pub fn merge_out<T, F>(v: &mut [T], buf: &mut [T], a: Span, b: Span, out: Span, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut l, mut r) = (a.left, b.left);
    let mut i = out.left;

    while i < out.right && l < a.right && r < b.right {
        if cmp(&v[l], &v[r]) == Ordering::Greater {
            std::mem::swap(&mut buf[i], &mut v[r]);
            r += 1;
        } else {
            std::mem::swap(&mut buf[i], &mut v[l]);
            l += 1;
        }
        i += 1;
    }

    if r == b.right {
        swap_between(buf, i, v, l, a.right - l);
    } else {
        swap_between(buf, i, v, r, b.right - r);
    }
}

/// Merge adjacent sorted spans `a` and `b` in place.
pub fn merge_in2<T, F>(v: &mut [T], buf: &mut [T], a: Span, b: Span, cmp: &mut F) -> Span
where
    F: FnMut(&T, &T) -> Ordering,
{
    let res = Span::join(a, b);
    if a.is_empty() || b.is_empty() {
        return res;
    }

    // 1. Everything in `a` follows everything in `b`
    if cmp(&v[a.left], &v[b.right - 1]) == Ordering::Greater {
        v[res.range()].rotate_left(a.len());
        return res;
    }

    // 2. Split both spans around the rotation radius
    let rad = merge_radius(v, a, b, cmp);
    let (s1, s2) = a.split_at(a.right - rad);
    let (s3, s4) = b.split_at(b.left + rad);

    // 3. Park the middle of `a` and merge both halves directly
    if rad <= buf.len() {
        swap_between(buf, 0, v, s2.left, rad);
        merge_down(v, buf, s1, s3, Source::Main, a, cmp);
        merge_up(v, buf, Span::new(0, rad), s4, b, cmp);
    }
    // 4. Rotate and merge again
    else {
        swap_blocks(v, s2.left, s3.left, rad);
        merge_in2(v, buf, s1, s2, cmp);
        merge_in2(v, buf, s3, s4, cmp);
    }

    res
}

/// Merge `a` and `b` out into the buffer, then up with `c`.
pub fn merge_up3<T, F>(v: &mut [T], buf: &mut [T], a: Span, b: Span, c: Span, cmp: &mut F) -> Span
where
    F: FnMut(&T, &T) -> Ordering,
{
    let ab = Span::new(0, a.len() + b.len());
    let res = Span::new(a.left, c.right);

    merge_out(v, buf, a, b, ab, cmp);
    merge_up(v, buf, ab, c, res, cmp);
    res
}

/// Merge `b` and `c` out into the buffer, then down with `a`.
pub fn merge_down3<T, F>(
    v: &mut [T],
    buf: &mut [T],
    a: Span,
    b: Span,
    c: Span,
    cmp: &mut F,
) -> Span
where
    F: FnMut(&T, &T) -> Ordering,
{
    let bc = Span::new(0, b.len() + c.len());
    let res = Span::new(a.left, c.right);

    merge_out(v, buf, b, c, bc, cmp);
    merge_down(v, buf, a, bc, Source::Scratch, res, cmp);
    res
}

/// Merge three adjacent sorted spans in place.
pub fn merge_in3<T, F>(v: &mut [T], buf: &mut [T], a: Span, b: Span, c: Span, cmp: &mut F) -> Span
where
    F: FnMut(&T, &T) -> Ordering,
{
    // Not enough space to merge out
    if a.len().min(c.len()) + b.len() > buf.len() {
        let ab = merge_in2(v, buf, a, b, cmp);
        return merge_in2(v, buf, ab, c, cmp);
    }

    if a.len() < c.len() {
        merge_up3(v, buf, a, b, c, cmp)
    } else {
        merge_down3(v, buf, a, b, c, cmp)
    }
}

/// Merge `runs[first..=last]`, which must be sorted and adjacent, into one
/// sorted span.
pub fn merge_runs<T, F>(
    v: &mut [T],
    buf: &mut [T],
    runs: &[Span],
    first: usize,
    last: usize,
    cmp: &mut F,
) -> Span
where
    F: FnMut(&T, &T) -> Ordering,
{
    let all = Span::new(runs[first].left, runs[last].right);

    // 1. Too few runs to merge
    if first >= last {
        return all;
    }

    // 2. Run boundaries nearest the quarter points
    let (n, start) = (all.len(), all.left);
    let mid = bisect_runs(runs, first, last, start + n / 2);
    let left = bisect_runs(runs, first, last, start + n / 4);
    let right = bisect_runs(runs, first, last, start + 3 * n / 4);

    let mut idx = vec![first, left, mid, right, last + 1];
    idx.sort_unstable();
    idx.dedup();

    // 3. Merge the pieces between those boundaries
    match idx.len() {
        2 => {
            let head = merge_runs(v, buf, runs, first, last - 1, cmp);
            merge_in2(v, buf, head, runs[last], cmp);
        }
        3 => {
            let a = merge_runs(v, buf, runs, idx[0], idx[1] - 1, cmp);
            let b = merge_runs(v, buf, runs, idx[1], idx[2] - 1, cmp);
            merge_in2(v, buf, a, b, cmp);
        }
        4 => {
            let a = merge_runs(v, buf, runs, idx[0], idx[1] - 1, cmp);
            let b = merge_runs(v, buf, runs, idx[1], idx[2] - 1, cmp);
            let c = merge_runs(v, buf, runs, idx[2], idx[3] - 1, cmp);
            merge_in3(v, buf, a, b, c, cmp);
        }
        _ => {
            // Left half fits in the buffer: merge it out
            if runs[idx[2] - 1].right - runs[idx[0]].left <= buf.len() {
                let a = merge_runs(v, buf, runs, idx[0], idx[1] - 1, cmp);
                let b = merge_runs(v, buf, runs, idx[1], idx[2] - 1, cmp);
                let c = merge_runs(v, buf, runs, idx[2], idx[4] - 1, cmp);
                merge_up3(v, buf, a, b, c, cmp);
            }
            // Right half fits in the buffer
            else if all.right - runs[idx[2]].left <= buf.len() {
                let a = merge_runs(v, buf, runs, idx[0], idx[2] - 1, cmp);
                let b = merge_runs(v, buf, runs, idx[2], idx[3] - 1, cmp);
                let c = merge_runs(v, buf, runs, idx[3], idx[4] - 1, cmp);
                merge_down3(v, buf, a, b, c, cmp);
            }
            // No space available for merging out
            else {
                let a = merge_runs(v, buf, runs, idx[0], idx[2] - 1, cmp);
                let b = merge_runs(v, buf, runs, idx[2], idx[4] - 1, cmp);
                merge_in2(v, buf, a, b, cmp);
            }
        }
    }

    all
}
