// Copyright 2024 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::sample::sample_with_rng;
use futures::task::{Context, Poll};
use futures::{Future, Stream};
use rand::rngs::OsRng;
use rand::Rng;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, Instant, Sleep};

/// A stream yielding `()` at Poisson-random instants, i.e. with exponentially
/// distributed gaps between items.
///
/// The item carries no data on purpose; the stream serves as a glorified timer
/// and whatever should happen per event is the consumer's business. The next
/// firing is armed *before* an item is yielded and is anchored at the deadline
/// that just elapsed, so a slow consumer delays its own processing only, never
/// the event schedule.
///
/// The stream never terminates on its own; wrap it in a cancellation mechanism
/// (or just drop it) to shut it down.
pub struct EventStream<R: Rng = OsRng> {
    /// Mean of the exponential distribution the delays are drawn from.
    average_interval: Duration,

    /// The single outstanding timer; reset in place on every yield.
    next_delay: Pin<Box<Sleep>>,

    rng: R,
}

impl EventStream<OsRng> {
    /// Creates a stream with the first delay already armed, drawing
    /// from the operating system generator.
    pub fn new(average_interval: Duration) -> Self {
        Self::with_rng(average_interval, OsRng)
    }
}

impl<R: Rng> EventStream<R> {
    /// Creates a stream drawing its delays from the provided generator,
    /// which makes the whole event sequence reproducible.
    pub fn with_rng(average_interval: Duration, mut rng: R) -> Self {
        let first_delay = sample_with_rng(&mut rng, average_interval);
        EventStream {
            average_interval,
            next_delay: Box::pin(sleep(first_delay)),
            rng,
        }
    }

    pub fn average_interval(&self) -> Duration {
        self.average_interval
    }

    /// Instant at which the next item is due.
    pub fn next_deadline(&self) -> Instant {
        self.next_delay.deadline()
    }
}

impl<R: Rng + Unpin> Stream for EventStream<R> {
    type Item = ();

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        // it is not yet time to yield the next event
        if this.next_delay.as_mut().poll(cx).is_pending() {
            return Poll::Pending;
        }

        // the current event is due, so before handing it over, arm the next
        // one relative to the deadline that just elapsed
        let now = this.next_delay.deadline();
        let next = now + sample_with_rng(&mut this.rng, this.average_interval);
        this.next_delay.as_mut().reset(next);

        Poll::Ready(Some(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[tokio::test(start_paused = true)]
    async fn gaps_follow_the_sampler() {
        let average = Duration::from_millis(250);
        let mut reference = ChaCha8Rng::seed_from_u64(99);
        let mut events = EventStream::with_rng(average, ChaCha8Rng::seed_from_u64(99));

        let mut expected = Instant::now() + sample_with_rng(&mut reference, average);
        assert_eq!(events.next_deadline(), expected);

        for _ in 0..8 {
            events.next().await;
            expected += sample_with_rng(&mut reference, average);
            assert_eq!(events.next_deadline(), expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rearms_before_yielding() {
        let rng = ChaCha8Rng::seed_from_u64(7);
        let mut events = EventStream::with_rng(Duration::from_secs(1), rng);

        events.next().await;
        let armed = events.next_deadline();
        assert!(armed > Instant::now());

        // a dawdling consumer must not postpone the already-armed deadline
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(events.next_deadline(), armed);

        // the overdue event is handed over without any further waiting
        let before = Instant::now();
        events.next().await;
        assert_eq!(Instant::now(), before);
        assert!(events.next_deadline() > armed);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_yields_immediately() {
        let mut events = EventStream::new(Duration::ZERO);
        let before = Instant::now();
        for _ in 0..16 {
            events.next().await;
        }
        assert_eq!(Instant::now(), before);
    }
}
