// FadeSort driver: find runs, put each run in order, then merge them.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::report::RunProfile;
use crate::models::span::{RunKind, Span, TypedRun};
use crate::services::merges::merge_runs;
use crate::services::quick_sort::quick_sort_by;
use crate::utils::config::SortSettings;
use crate::utils::error::{FadeSortError, Result};

/// Smallest scratch buffer worth sorting with. Shorter buffers are replaced.
pub const MINIMUM_BUFFER_SIZE: usize = 24;

/// Minimum length of a sorted stretch to be kept as a run when sorting `n`
/// elements.
pub fn minimum_run_length(n: usize) -> usize {
    if n <= 256 {
        4 + (n >> 6)
    } else {
        (n as f64).sqrt() as usize
    }
}

//==========================================================================
// Entry points
//==========================================================================

/// Sort `v` ascending, stably, with a minimum-size scratch buffer.
pub fn sort<T: Ord + Clone>(v: &mut [T]) {
    sort_by(v, T::cmp);
}

/// Sort `v` stably by `compare` with a minimum-size scratch buffer.
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() < 2 {
        return;
    }

    let mut buf = minimal_buffer(v);
    sort_in_place(v, &mut buf, &mut compare);
}

/// Sort `v` stably by the key `f` extracts. The key is recomputed on every
/// comparison.
pub fn sort_by_key<T, K, F>(v: &mut [T], mut f: F)
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    sort_by(v, |a, b| f(a).cmp(&f(b)));
}

/// Sort `v` ascending using `buf` as scratch. The contents of `buf` are
/// arbitrary afterwards.
pub fn sort_with_buffer<T: Ord + Clone>(v: &mut [T], buf: &mut [T]) {
    sort_with_buffer_by(v, buf, T::cmp);
}

/// Sort `v` stably by `compare` using `buf` as scratch.
///
/// A buffer shorter than both [`MINIMUM_BUFFER_SIZE`] and `v` is not used;
/// a minimum-size buffer is allocated instead.
pub fn sort_with_buffer_by<T, F>(v: &mut [T], buf: &mut [T], mut compare: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() < 2 {
        return;
    }

    if buf.len() < MINIMUM_BUFFER_SIZE && buf.len() < v.len() {
        debug!(
            requested = buf.len(),
            "For performance, using minimum buffer size {MINIMUM_BUFFER_SIZE}"
        );
        let mut fallback = minimal_buffer(v);
        sort_in_place(v, &mut fallback, &mut compare);
    } else {
        sort_in_place(v, buf, &mut compare);
    }
}

/// Sort `v[start..end]` ascending using `buf` as scratch.
pub fn sort_range<T: Ord + Clone>(v: &mut [T], buf: &mut [T], start: usize, end: usize) -> Result<()> {
    sort_range_by(v, buf, start, end, T::cmp)
}

/// Sort `v[start..end]` stably by `compare` using `buf` as scratch.
pub fn sort_range_by<T, F>(v: &mut [T], buf: &mut [T], start: usize, end: usize, compare: F) -> Result<()>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if end > v.len() {
        return Err(FadeSortError::IndexOutOfBounds { index: end, len: v.len() });
    }

    if start > end {
        return Err(FadeSortError::InvalidRange { start, end });
    }

    sort_with_buffer_by(&mut v[start..end], buf, compare);
    Ok(())
}

/// Summarise the runs `v` would be split into, without sorting it.
pub fn profile_runs<T, F>(v: &[T], mut compare: F) -> RunProfile
where
    F: FnMut(&T, &T) -> Ordering,
{
    let min_run_len = minimum_run_length(v.len());
    let runs = if v.len() < 2 {
        Vec::new()
    } else {
        create_runs(v, min_run_len, &mut compare)
    };

    RunProfile::from_runs(v.len(), min_run_len, &runs)
}

/// A sorter with a preferred scratch buffer length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSorter {
    buffer_len: usize,
}

impl Default for FadeSorter {
    fn default() -> Self {
        Self::new()
    }
}

impl FadeSorter {
    pub const fn new() -> Self {
        Self {
            buffer_len: MINIMUM_BUFFER_SIZE,
        }
    }

    /// Use a scratch buffer of up to `buffer_len` elements
    pub const fn with_buffer_len(buffer_len: usize) -> Self {
        Self { buffer_len }
    }

    pub const fn from_settings(settings: &SortSettings) -> Self {
        Self::with_buffer_len(settings.buffer_size)
    }

    pub const fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    pub fn sort<T: Ord + Clone>(&self, v: &mut [T]) {
        self.sort_by(v, T::cmp);
    }

    pub fn sort_by<T, F>(&self, v: &mut [T], compare: F)
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering,
    {
        // The buffer never needs to be longer than the input
        let mut buf = v[..self.buffer_len.min(v.len())].to_vec();
        sort_with_buffer_by(v, &mut buf, compare);
    }

    pub fn sort_by_key<T, K, F>(&self, v: &mut [T], mut f: F)
    where
        T: Clone,
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.sort_by(v, |a, b| f(a).cmp(&f(b)));
    }
}

//==========================================================================
// Driver
//==========================================================================

fn minimal_buffer<T: Clone>(v: &[T]) -> Vec<T> {
    v[..v.len().min(MINIMUM_BUFFER_SIZE)].to_vec()
}

fn sort_in_place<T, F>(v: &mut [T], buf: &mut [T], cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    // 1. Find all runs from left to right
    let min_len = minimum_run_length(v.len());
    let runs = create_runs(v, min_len, cmp);

    // 2. Put every run in order and join the ones already in sequence
    let runs = format_runs(v, buf, &runs, cmp);

    debug!(
        len = v.len(),
        buffer = buf.len(),
        min_run_len = min_len,
        runs = runs.len(),
        "merging formatted runs"
    );

    // 3. Merge the runs
    if runs.len() > 1 {
        merge_runs(v, buf, &runs, 0, runs.len() - 1, cmp);
    }
}

/// Sort `run` according to its kind.
fn sort_run<T, F>(v: &mut [T], buf: &mut [T], run: TypedRun, cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    match run.kind {
        RunKind::NonDescending => {}
        RunKind::Descending => v[run.span.range()].reverse(),
        RunKind::Unsorted => quick_sort_by(v, buf, run.span, cmp),
    }
}

/// Sort every run, merging neighbours whose boundary is already ordered.
fn format_runs<T, F>(v: &mut [T], buf: &mut [T], runs: &[TypedRun], cmp: &mut F) -> Vec<Span>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut formatted: Vec<Span> = Vec::with_capacity(runs.len());

    for &run in runs {
        sort_run(v, buf, run, cmp);

        let at = run.span.left;
        match formatted.last_mut() {
            Some(prev) if cmp(&v[at - 1], &v[at]) != Ordering::Greater => prev.right = run.span.right,
            _ => formatted.push(run.span),
        }
    }

    formatted
}

/// The sorted stretch starting at `start`: strictly descending or
/// non-descending, whichever its first pair is.
///
/// Requires `start + 1 < end`.
fn next_sorted_stretch<T, F>(v: &[T], start: usize, end: usize, cmp: &mut F) -> TypedRun
where
    F: FnMut(&T, &T) -> Ordering,
{
    let desc = cmp(&v[start + 1], &v[start]) == Ordering::Less;

    let mut i = start + 1;
    while i < end - 1 && (cmp(&v[i + 1], &v[i]) == Ordering::Less) == desc {
        i += 1;
    }

    let kind = if desc {
        RunKind::Descending
    } else {
        RunKind::NonDescending
    };
    TypedRun::new(start, end.min(i + 1), kind)
}

/// The first sorted stretch at or after `start` of at least `min_len`
/// elements, or an empty run at `end` if there is none.
fn next_run<T, F>(v: &[T], mut start: usize, end: usize, min_len: usize, cmp: &mut F) -> TypedRun
where
    F: FnMut(&T, &T) -> Ordering,
{
    while start + min_len <= end {
        let next = next_sorted_stretch(v, start, end, cmp);

        if next.len() >= min_len {
            return next;
        }
        start = next.span.right;
    }

    TypedRun::new(end, end, RunKind::NonDescending)
}

/// Split `v` into sorted runs of at least `min_len` and the unsorted gaps
/// between them, left to right.
pub fn create_runs<T, F>(v: &[T], min_len: usize, cmp: &mut F) -> Vec<TypedRun>
where
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(min_len >= 2);

    let end = v.len();
    let mut runs = Vec::new();
    let mut i = 0;

    while i < end {
        let next = next_run(v, i, end, min_len, cmp);

        if next.span.left != i {
            runs.push(TypedRun::new(i, next.span.left, RunKind::Unsorted));
        }

        i = next.span.right;
        runs.push(next);
    }

    // Drop the empty run marking the end
    if runs.last().is_some_and(|run| run.span.left == end) {
        runs.pop();
    }

    runs
}
