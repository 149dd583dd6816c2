//! Rendezvous channel for CSP-style handoff between strands
//!
//! A rendezvous channel has no buffer: `send` does not return until the
//! receiving strand has taken the value. At most one value is ever in flight.
//!
//! ## Construction
//!
//! May ships unbounded MPMC channels, so the handshake is built from two of
//! them:
//!
//! - the data lane carries the value from sender to receiver
//! - the ack lane carries `()` back once the receiver has the value
//!
//! The sender waits on the ack lane after every send, which keeps the data
//! lane at zero or one queued values. This is the same two-lane pattern the
//! weave/resume handshake uses.
//!
//! ## Non-Blocking Guarantee
//!
//! Both lanes cooperatively block using May's scheduler. A strand waiting on
//! either lane yields its worker thread; the OS thread is never parked while
//! other strands are runnable.
//!
//! ## Ownership
//!
//! Neither handle is `Clone`. One producer owns the sender, one consumer owns
//! the receiver, and dropping either side disconnects the channel.

use may::sync::mpmc;
use std::fmt;

/// Error returned when the other end of the channel has been dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    Disconnected,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Disconnected => write!(f, "rendezvous peer disconnected"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// Sending half of a rendezvous channel
pub struct RendezvousSender<T> {
    data: mpmc::Sender<T>,
    ack: mpmc::Receiver<()>,
}

/// Receiving half of a rendezvous channel
pub struct RendezvousReceiver<T> {
    data: mpmc::Receiver<T>,
    ack: mpmc::Sender<()>,
}

/// Create a new rendezvous channel
///
/// The returned halves are `Send`, so each can be moved into its own strand.
pub fn rendezvous<T>() -> (RendezvousSender<T>, RendezvousReceiver<T>) {
    let (data_tx, data_rx) = mpmc::channel();
    let (ack_tx, ack_rx) = mpmc::channel();

    (
        RendezvousSender {
            data: data_tx,
            ack: ack_rx,
        },
        RendezvousReceiver {
            data: data_rx,
            ack: ack_tx,
        },
    )
}

impl<T> RendezvousSender<T> {
    /// Hand a value to the receiver
    ///
    /// Cooperatively blocks until the receiver has taken the value.
    pub fn send(&self, value: T) -> Result<(), ChannelError> {
        self.data
            .send(value)
            .map_err(|_| ChannelError::Disconnected)?;
        self.ack.recv().map_err(|_| ChannelError::Disconnected)
    }
}

impl<T> RendezvousReceiver<T> {
    /// Take the next value from the sender
    ///
    /// Cooperatively blocks until a value is available, then releases the
    /// sender blocked on it.
    pub fn recv(&self) -> Result<T, ChannelError> {
        let value = self.data.recv().map_err(|_| ChannelError::Disconnected)?;
        self.ack.send(()).map_err(|_| ChannelError::Disconnected)?;
        Ok(value)
    }
}

impl<T> fmt::Debug for RendezvousSender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendezvousSender").finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for RendezvousReceiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendezvousReceiver").finish_non_exhaustive()
    }
}
