// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Prints a message at random times, once a minute on average.
//! Run with `RUST_LOG=trace` to watch the process schedule itself.

const AVERAGE_INTERVAL_MS: f64 = 60_000.0;

#[tokio::main]
async fn main() {
    env_logger::init();

    let process = nym_poisson_process::create(AVERAGE_INTERVAL_MS, || {
        println!("A minute passed, give or take.");
    })
    .expect("the interval is valid");

    process.start();
    println!(
        "started (v{}); expect a message roughly every minute, ctrl-c to quit",
        nym_poisson_process::VERSION
    );

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl-c");
    process.stop();
}
