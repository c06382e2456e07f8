//! UDP OSC transport.

use std::io;
use std::net::UdpSocket;

use log::debug;
use rosc::{encoder, OscMessage, OscPacket, OscType};

use super::Transport;
use crate::config;

/// Sends OSC messages to a console over UDP.
///
/// Replies arrive on the same socket; the inbound listener gets its own
/// handle via `try_clone_socket`.
pub struct UdpOsc {
    socket: UdpSocket,
}

impl UdpOsc {
    /// Bind the local reply port and connect to the console.
    pub fn new(osc: &config::Osc) -> io::Result<UdpOsc> {
        let host = if osc.local { "127.0.0.1" } else { osc.remote_host.as_str() };
        let socket = UdpSocket::bind(("0.0.0.0", osc.local_port))?;
        socket.connect((host, osc.remote_port))?;
        debug!("connected to console at {}:{}", host, osc.remote_port);
        Ok(UdpOsc { socket })
    }

    /// Socket handle for the inbound listener thread.
    pub fn try_clone_socket(&self) -> io::Result<UdpSocket> {
        self.socket.try_clone()
    }
}

impl Transport for UdpOsc {
    fn send(&mut self, address: &str, args: Vec<OscType>) -> io::Result<()> {
        let packet = OscPacket::Message(OscMessage {
            addr: address.to_string(),
            args,
        });
        let bytes = encoder::encode(&packet)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, format!("{:?}", err)))?;
        self.socket.send(&bytes)?;
        Ok(())
    }
}
