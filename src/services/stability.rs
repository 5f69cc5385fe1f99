// Stability checks over shrinking buffer sizes

use chrono::Utc;
use tracing::info;

use crate::models::report::{StabilityCheck, StabilityReport};
use crate::services::data_generator::{stability_input, stability_key};
use crate::services::fade_sort::{sort_with_buffer_by, MINIMUM_BUFFER_SIZE};

/// Sort the stability input of `length` elements with buffers of
/// `length / q` for `q = 1, 2, 4, ...` while that is at least
/// [`MINIMUM_BUFFER_SIZE`], comparing each result against a known stable
/// ordering.
pub fn run_stability_checks(length: usize) -> StabilityReport {
    let input = stability_input(length);

    let mut expected = input.clone();
    expected.sort_by_key(stability_key);

    let mut checks = Vec::new();
    let mut divisor = 1;

    while length / divisor >= MINIMUM_BUFFER_SIZE {
        let buffer_size = length / divisor;
        let mut buf = vec![0; buffer_size];
        let mut to_sort = input.clone();

        sort_with_buffer_by(&mut to_sort, &mut buf, |a, b| stability_key(a).cmp(&stability_key(b)));

        let stable = to_sort == expected;
        info!(divisor, buffer_size, stable, "stability check");
        checks.push(StabilityCheck {
            divisor,
            buffer_size,
            stable,
        });

        divisor <<= 1;
    }

    StabilityReport {
        generated_at: Utc::now(),
        length,
        checks,
    }
}
