// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoissonProcessError {
    #[error("the average interval should be a finite, non-negative number of milliseconds, got {interval}")]
    InvalidInterval { interval: f64 },
}
