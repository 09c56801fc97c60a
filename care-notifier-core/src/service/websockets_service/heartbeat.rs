use anyhow::anyhow;
use std::time::Duration;
use tokio::time::Instant;

const MAX_UNANSWERED_PINGS: u8 = 2;

///
/// Ping/pong bookkeeping of a single websocket.
///
/// Every ping of a series carries the same payload, a matching pong ends the series.
///
pub struct Heartbeat {
    interval: Duration,
    deadline: Instant,
    payload: u32,
    unanswered: u8,
}

impl Heartbeat {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: Instant::now() + interval,
            payload: 0,
            unanswered: 0,
        }
    }

    /// Time of the next ping
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn restart(&mut self) {
        self.deadline = Instant::now() + self.interval;
    }

    ///
    /// ### Returns
    /// - payload of the ping to send
    /// - `None` when the peer left too many pings unanswered
    ///
    pub fn next_ping(&mut self) -> Option<Vec<u8>> {
        if self.unanswered >= MAX_UNANSWERED_PINGS {
            return None;
        }

        if self.unanswered == 0 {
            self.payload = self.payload.wrapping_add(1);
        }
        self.unanswered += 1;
        self.restart();

        Some(self.payload.to_be_bytes().to_vec())
    }

    ///
    /// Late pongs of the previous series are ignored.
    ///
    /// ### Errors
    /// - payload was not sent by [Heartbeat::next_ping]
    ///
    pub fn pong(&mut self, payload: &[u8]) -> anyhow::Result<()> {
        let bytes: [u8; 4] = payload
            .try_into()
            .map_err(|_| anyhow!("invalid pong payload length {}", payload.len()))?;
        let payload = u32::from_be_bytes(bytes);

        if self.unanswered == 0 || payload != self.payload {
            tracing::trace!(payload, "ignored late pong");
            return Ok(());
        }

        self.unanswered = 0;
        self.restart();

        Ok(())
    }
}
