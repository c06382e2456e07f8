//! Outbound OSC transport seam.

use std::io;

use rosc::OscType;

pub mod udposc;
pub use self::udposc::UdpOsc;

/// Transports carry outbound OSC messages to the console.
///
/// The session only ever talks to this trait, so tests can swap in a
/// recording double and the daemon a real UDP socket.
pub trait Transport {
    /// Emit one fire-and-forget message.
    fn send(&mut self, address: &str, args: Vec<OscType>) -> io::Result<()>;
}
