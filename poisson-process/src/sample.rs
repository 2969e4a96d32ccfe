// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use rand::Rng;
use rand_distr::{Distribution, Exp};
use std::time::Duration;

/// Draws a single exponentially distributed delay with the given mean,
/// using the thread-local generator.
///
/// Inter-arrival times of events in a homogeneous Poisson process are
/// exponentially distributed with mean `1 / rate`.
pub fn sample(average_interval: Duration) -> Duration {
    sample_with_rng(&mut rand::thread_rng(), average_interval)
}

/// Same as [`sample`], but drawing from the provided source of randomness.
pub fn sample_with_rng<R: Rng + ?Sized>(rng: &mut R, average_interval: Duration) -> Duration {
    if average_interval.is_zero() {
        // degenerate process: every event fires immediately
        return Duration::ZERO;
    }

    // the unwrap is fine: `Exp::new` only fails for a non-positive rate
    // and the zero interval was already handled above
    #[allow(clippy::unwrap_used)]
    let exp = Exp::new(1.0 / average_interval.as_nanos() as f64).unwrap();
    Duration::from_nanos(exp.sample(rng).round() as u64)
}
