// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Recurring triggers at a random yet steady pace.
//!
//! Delays between invocations are drawn from the exponential distribution,
//! which makes the sequence of invocations a temporal Poisson process:
//! memoryless, with a configurable mean interval. Such sequences fit wherever
//! something should happen "roughly every N seconds" but without a detectable
//! rhythm, e.g. cover traffic or simulated arrivals.
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() {
//!     // a minute between messages, on average
//!     let process = nym_poisson_process::create(60_000.0, || {
//!         println!("A minute passed, give or take.");
//!     })
//!     .unwrap();
//!
//!     process.start();
//!     tokio::time::sleep(std::time::Duration::from_secs(600)).await;
//!     process.stop();
//! }
//! ```

use std::time::Duration;

mod error;
pub mod process;
pub mod sample;
pub mod stream;

pub use error::PoissonProcessError;
pub use process::Process;
pub use sample::{sample, sample_with_rng};
pub use stream::EventStream;

/// Semantic version of the crate, useful for inspection when the version is
/// not otherwise known.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a new [`Process`] in the stopped state, validating the mean
/// interval given in milliseconds.
///
/// Zero and any positive finite value are accepted; NaN, infinities and
/// negative values are rejected with
/// [`InvalidInterval`](PoissonProcessError::InvalidInterval). Callback
/// validity needs no runtime check as the trait bound already guarantees an
/// invocable trigger.
pub fn create<F>(average_interval_ms: f64, trigger: F) -> Result<Process, PoissonProcessError>
where
    F: FnMut() + Send + 'static,
{
    if !average_interval_ms.is_finite() || average_interval_ms < 0.0 {
        return Err(PoissonProcessError::InvalidInterval {
            interval: average_interval_ms,
        });
    }

    // a finite mean beyond the timer horizon behaves the same as one at it
    let average_interval = Duration::try_from_secs_f64(average_interval_ms / 1000.0)
        .unwrap_or(Duration::MAX);

    Ok(Process::new(average_interval, trigger))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_invalid_intervals() {
        for invalid in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0, -100.5] {
            assert!(matches!(
                create(invalid, || {}),
                Err(PoissonProcessError::InvalidInterval { .. })
            ));
        }
    }

    #[test]
    fn create_accepts_zero_and_positive_intervals() {
        let zero = create(0.0, || {}).unwrap();
        assert_eq!(zero.average_interval(), Duration::ZERO);

        let process = create(100.0, || {}).unwrap();
        assert_eq!(process.average_interval(), Duration::from_millis(100));
    }

    #[test]
    fn create_clamps_oversized_intervals() {
        let process = create(f64::MAX, || {}).unwrap();
        assert_eq!(process.average_interval(), Duration::MAX);
    }

    #[test]
    fn version_has_major_minor_patch_format() {
        let parts: Vec<_> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3);
        for part in parts {
            part.parse::<u64>().unwrap();
        }
    }
}
