// Stable block-partition quicksort.
//
// Elements bound for the right side are collected in the scratch buffer and
// deposited into the slice a whole buffer at a time. A bit per block records
// which side it belongs to, and a cycle sort over the blocks finishes the
// partition without ever needing more than the buffer.

use std::cmp::Ordering;

use crate::models::bit_sum_array::BitSumArray;
use crate::models::span::Span;
use crate::services::insertion_sort::{insertion_sort_by, insertion_sort_unguarded_by};
use crate::utils::slice_ops::{shift_right, swap_between, swap_blocks};

/// Maximum length sorted by insertion sort instead of partitioning.
pub const SMALL_ARRAY: usize = 24;

/// Maximum number of samples used for pivot selection.
const SAMPLE_SPACE: usize = 31;

/// Minimum sample count at which each sample is a local median of three.
const BIG_SELECTION: usize = 15;

/// Maximum number of pieces produced when restoring a partition.
const PARTITION_LIMIT: usize = 32;

/// Which elements a partition sends to the right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Condition {
    Greater,
    GreaterOrEqual,
}

impl Condition {
    fn holds(self, ord: Ordering) -> bool {
        match self {
            Condition::Greater => ord == Ordering::Greater,
            Condition::GreaterOrEqual => ord != Ordering::Less,
        }
    }
}

/// Number of samples used to pick a pivot for `n` elements.
fn sample_size(n: usize) -> usize {
    let root = (n as f64).cbrt() as usize;
    ((2 + root) | 1).clamp(1, SAMPLE_SPACE)
}

/// Sort `v[span]` ascending by `cmp`, using `buf` as scratch.
///
/// Ranges are kept on an explicit stack. Ranges of at most [`SMALL_ARRAY`]
/// elements are insertion sorted; any range that does not start at
/// `span.left` has a no-greater neighbour on its left and skips the bound
/// check.
///
/// `buf` must hold at least one element whenever `span` is longer than
/// [`SMALL_ARRAY`].
pub(crate) fn quick_sort_by<T, F>(v: &mut [T], buf: &mut [T], span: Span, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let guard = span.left;
    let mut parts = vec![span];

    while let Some(cur) = parts.pop() {
        if cur.len() <= SMALL_ARRAY {
            if cur.left == guard {
                insertion_sort_by(&mut v[cur.range()], cmp);
            } else {
                insertion_sort_unguarded_by(v, cur, cmp);
            }
            continue;
        }

        debug_assert!(!buf.is_empty(), "partitioning {cur} needs scratch space");
        let pivot = select_pivot(v, cur, cmp);
        partition(&mut parts, v, buf, cur, &pivot, cmp, Condition::Greater);
    }
}

/// Stably partition `v[span]` around `pivot`: elements matching `cond` go
/// right. Ranges still needing work are pushed onto `parts`.
fn partition<T, F>(
    parts: &mut Vec<Span>,
    v: &mut [T],
    buf: &mut [T],
    span: Span,
    pivot: &T,
    cmp: &mut F,
    cond: Condition,
) where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let (start, end) = (span.left, span.right);
    let w = buf.len();
    let mut blocks = BitSumArray::new(span.len().div_ceil(w) + 1);

    // x: next free slot for left elements in `v`
    // y: number of right elements waiting in `buf`
    let mut x = start;
    let mut y;
    let mut cnt = 0;
    let mut i = start;

    // 1. Partition into blocks
    'scan: loop {
        y = 0;
        loop {
            if i == end {
                break 'scan;
            }

            if cond.holds(cmp(&v[i], pivot)) {
                std::mem::swap(&mut buf[y], &mut v[i]);
                y += 1;
                i += 1;
                if y == w {
                    break;
                }
            } else {
                v.swap(x, i);
                x += 1;
                i += 1;
            }
        }

        // Shift the partial block right and deposit the full buffer
        let pre = (x - start) / w;
        let dest = start + pre * w;

        shift_right(v, dest, x, w);
        swap_between(v, dest, buf, 0, w);

        blocks.set(pre);
        cnt = pre + 1;
        x += w;
    }

    // 2. No deposits made: split the buffered right side further
    if cnt == 0 && y != 0 && x != start && cond == Condition::Greater {
        restore(parts, buf, y, v, x, cmp);
        parts.push(Span::new(start, x));
        return;
    }

    cnt = cnt.max((x - start) / w);

    // 3. Right remainder goes to the end
    swap_between(v, x, buf, 0, y);

    // 4. Order the blocks and place the left remainder
    let rem = x - start - cnt * w;
    let mid = arrange_partition(v, start, &mut blocks, cnt, w, rem);

    // 5. Queue what is left to sort
    match cond {
        Condition::GreaterOrEqual => parts.push(Span::new(start, mid)),
        // Nothing above the pivot: pull the pivot's equals out instead
        Condition::Greater if mid == end => partition(
            parts,
            v,
            buf,
            Span::new(start, mid),
            pivot,
            cmp,
            Condition::GreaterOrEqual,
        ),
        Condition::Greater => {
            parts.push(Span::new(mid, end));
            parts.push(Span::new(start, mid));
        }
    }
}

/// Cycle sort `cnt` blocks of `w` elements starting at `start` so that left
/// blocks precede right blocks, then rotate the `r` trailing left elements in
/// behind the left blocks.
///
/// Returns the index where the right side begins.
fn arrange_partition<T>(
    v: &mut [T],
    start: usize,
    blocks: &mut BitSumArray,
    cnt: usize,
    w: usize,
    r: usize,
) -> usize {
    if cnt == 0 {
        return start + r;
    }

    blocks.build_sums();
    let cnt0 = cnt - blocks.cardinality(cnt);

    // 1. Every non-trivial cycle passes through a left destination
    let mut placed = BitSumArray::new(cnt);

    for i in 0..cnt0 {
        if placed.get(i) {
            continue;
        }

        placed.set(i);
        let mut next = destination(blocks, i, cnt0);

        while next != i {
            swap_blocks(v, start + i * w, start + next * w, w);
            placed.set(next);
            next = destination(blocks, next, cnt0);
        }
    }

    // 2. Left remainder sits after the right blocks
    let end0 = start + cnt0 * w;
    if r == 0 {
        return end0;
    }

    shift_right(v, end0, start + cnt * w, r);
    end0 + r
}

/// Final block index of the block currently labelled `i`.
fn destination(blocks: &BitSumArray, i: usize, cnt0: usize) -> usize {
    let offset = blocks.cardinality(i);
    if blocks.get(i) {
        cnt0 + offset
    } else {
        i - offset
    }
}

/// Repeatedly partition the `count` elements of `buf` into `v` starting at
/// `ins`, each time keeping the elements above a fresh pivot in `buf`.
fn restore<T, F>(
    parts: &mut Vec<Span>,
    buf: &mut [T],
    mut count: usize,
    v: &mut [T],
    mut ins: usize,
    cmp: &mut F,
) where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if count <= SMALL_ARRAY {
        swap_between(v, ins, buf, 0, count);
        parts.push(Span::with_len(ins, count));
        return;
    }

    let mut pieces = Vec::with_capacity(PARTITION_LIMIT + 1);

    while count > SMALL_ARRAY && pieces.len() < PARTITION_LIMIT {
        let pivot = select_pivot(buf, Span::new(0, count), cmp);
        let from = ins;
        let mut y = 0;

        for i in 0..count {
            if cmp(&buf[i], &pivot) == Ordering::Greater {
                buf.swap(y, i);
                y += 1;
            } else {
                std::mem::swap(&mut v[ins], &mut buf[i]);
                ins += 1;
            }
        }

        pieces.push(Span::new(from, ins));
        count = y;
    }

    swap_between(v, ins, buf, 0, count);
    pieces.push(Span::with_len(ins, count));

    // Lowest piece ends up on top of the stack
    parts.extend(pieces.into_iter().rev());
}

/// Estimate the median of `v[span]` from evenly spaced samples.
fn select_pivot<T, F>(v: &[T], span: Span, cmp: &mut F) -> T
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let amount = sample_size(span.len());
    let step = span.len() / (amount + 1);

    let mut samples = [0usize; SAMPLE_SPACE];
    for (k, sample) in samples.iter_mut().take(amount).enumerate() {
        let at = span.left + (k + 1) * step;
        *sample = if amount >= BIG_SELECTION {
            local_median(v, at, cmp)
        } else {
            at
        };
    }

    let samples = &mut samples[..amount];
    insertion_sort_by(samples, &mut |a: &usize, b: &usize| cmp(&v[*a], &v[*b]));
    v[samples[amount >> 1]].clone()
}

/// Index of the median of `v[i - 1]`, `v[i]` and `v[i + 1]`.
fn local_median<T, F>(v: &[T], i: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut a, mut b, mut c) = (i - 1, i, i + 1);

    // Three-element sorting network; stability doesn't matter
    if cmp(&v[a], &v[b]) == Ordering::Greater {
        std::mem::swap(&mut a, &mut b);
    }
    if cmp(&v[a], &v[c]) == Ordering::Greater {
        std::mem::swap(&mut a, &mut c);
    }
    if cmp(&v[b], &v[c]) == Ordering::Greater {
        std::mem::swap(&mut b, &mut c);
    }

    b
}
