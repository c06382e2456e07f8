//! Accepts console OSC traffic from the network and feeds the session.

use std::io;
use std::net::UdpSocket;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Sender};
use log::{info, warn};
use rosc::OscPacket;

use crate::host::Transport;
use crate::session::Session;

const MAX_PACKET_SIZE: usize = 4096;

/// Message formats that can be received from the console.
#[derive(Debug)]
pub enum ServerMessage {
    Datagram { data: Vec<u8> },
}

/// Listen for console replies and pass them to the session.
///
/// The socket is the outbound transport's receive side; the console
/// replies to the port it was contacted from.
pub fn serve<T: Transport>(socket: UdpSocket, mut session: Session<T>) -> io::Result<()> {
    // Message channel used as the server's event bus.
    let (sender, receiver) = channel::unbounded::<ServerMessage>();

    let udp_handle = start_udp_thread(socket, sender);

    'message_loop: loop {
        match receiver.recv() {
            Ok(ServerMessage::Datagram { data }) => {
                match rosc::decoder::decode_udp(&data) {
                    Ok((_, packet)) => dispatch_packet(&mut session, packet),
                    Err(err) => {
                        warn!("undecodable packet: {:?}", err);
                    }
                }
            }
            Err(err) => {
                warn!("{:?}", err);
                break 'message_loop;
            }
        }
    }

    udp_handle.join().expect("Did the UDP thread crash?");

    Ok(())
}

/// Hand every message in a packet to the session, flattening bundles.
fn dispatch_packet<T: Transport>(session: &mut Session<T>, packet: OscPacket) {
    match packet {
        OscPacket::Message(msg) => session.take_msg(&msg),
        OscPacket::Bundle(bundle) => {
            for inner in bundle.content {
                dispatch_packet(session, inner);
            }
        }
    }
}

/// Start a thread that accepts UDP datagrams and messages them to the
/// server's event loop.
fn start_udp_thread(socket: UdpSocket, sender: Sender<ServerMessage>) -> JoinHandle<()> {
    info!("[udp] listening for console replies");

    thread::spawn(move || loop {
        let mut buf = [0; MAX_PACKET_SIZE];
        let (len, _source) = match socket.recv_from(&mut buf) {
            Ok(received) => received,
            Err(err) => {
                warn!("[udp] recv failed: {:?}", err);
                continue;
            }
        };

        let message = ServerMessage::Datagram {
            data: buf[0..len].to_owned(),
        };

        sender
            .send(message)
            .expect("[udp] Packet receiver gone. Exiting thread.");
    })
}
