// CoAP Runtime - verbindet light-core Router mit einem embassy-net UDP Socket

use defmt::{Debug2Format, warn};
use embassy_net::Stack;
use embassy_net::udp::{PacketMetadata, UdpMetadata, UdpSocket};
use light_core::{DatagramOutcome, Exchange, RegistrationError, RequestHandler, Router};

use crate::config::{COAP_MAX_RESOURCES, COAP_SOCKET_BUFFER_SIZE, COAP_SOCKET_META_SLOTS};

/// Statische Socket-Buffers für den CoAP-Transport
///
/// Wird einmalig in main.rs per StaticCell angelegt.
pub struct CoapBuffers {
    rx_meta: [PacketMetadata; COAP_SOCKET_META_SLOTS],
    rx: [u8; COAP_SOCKET_BUFFER_SIZE],
    tx_meta: [PacketMetadata; COAP_SOCKET_META_SLOTS],
    tx: [u8; COAP_SOCKET_BUFFER_SIZE],
}

impl CoapBuffers {
    pub const fn new() -> Self {
        Self {
            rx_meta: [PacketMetadata::EMPTY; COAP_SOCKET_META_SLOTS],
            rx: [0; COAP_SOCKET_BUFFER_SIZE],
            tx_meta: [PacketMetadata::EMPTY; COAP_SOCKET_META_SLOTS],
            tx: [0; COAP_SOCKET_BUFFER_SIZE],
        }
    }
}

/// CoAP Runtime Instanz
///
/// Besitzt den UDP-Socket und die Resource-Tabelle. Handler werden
/// synchron aus `dispatch()` aufgerufen, es gibt also nie zwei
/// gleichzeitige Requests.
pub struct CoapRuntime<H: RequestHandler> {
    socket: UdpSocket<'static>,
    router: Router<H, COAP_MAX_RESOURCES>,
}

impl<H: RequestHandler> CoapRuntime<H> {
    pub fn new(stack: Stack<'static>, buffers: &'static mut CoapBuffers) -> Self {
        let socket = UdpSocket::new(
            stack,
            &mut buffers.rx_meta,
            &mut buffers.rx,
            &mut buffers.tx_meta,
            &mut buffers.tx,
        );
        Self {
            socket,
            router: Router::new(),
        }
    }

    /// Startet den Transport (bindet den UDP-Port)
    pub fn start(&mut self, port: u16) -> Result<(), CoapError> {
        self.socket.bind(port).map_err(|_| CoapError::BindFailed)
    }

    /// Registriert eine Resource in der Tabelle
    pub fn add_resource(&mut self, path: &'static str, handler: H) -> Result<(), CoapError> {
        self.router
            .add_resource(path, handler)
            .map_err(CoapError::Registration)
    }

    pub fn resource_mut(&mut self, path: &str) -> Option<&mut H> {
        self.router.resource_mut(path)
    }

    /// Wartet auf das nächste Datagram
    ///
    /// Cancel-safe, kann in `select` mit anderen Events kombiniert werden.
    pub async fn receive(&self, buf: &mut [u8]) -> Result<(usize, UdpMetadata), CoapError> {
        self.socket
            .recv_from(buf)
            .await
            .map_err(|_| CoapError::ReceiveFailed)
    }

    /// Verarbeitet ein Datagram und sendet die Response (falls vorhanden)
    ///
    /// Sende-Fehler werden nur geloggt, die Response ist dann verworfen.
    pub async fn dispatch(
        &mut self,
        datagram: &[u8],
        remote: UdpMetadata,
    ) -> DatagramOutcome<H::Outcome> {
        let Exchange { outcome, reply } = self.router.handle_datagram(datagram);

        if let Some(reply) = reply {
            if let Err(e) = self.socket.send_to(&reply, remote).await {
                warn!(
                    "CoAP: Dropped response to {}: {}",
                    Debug2Format(&remote.endpoint),
                    Debug2Format(&e)
                );
            }
        }

        outcome
    }
}

/// CoAP Runtime Fehler-Typen
#[derive(Debug)]
pub enum CoapError {
    /// UDP-Port konnte nicht gebunden werden
    BindFailed,
    /// Resource konnte nicht registriert werden
    Registration(RegistrationError),
    /// Empfang fehlgeschlagen (Datagram größer als der Buffer)
    ReceiveFailed,
}

impl defmt::Format for CoapError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CoapError::BindFailed => defmt::write!(fmt, "Bind failed"),
            CoapError::Registration(e) => defmt::write!(fmt, "Registration failed: {}", e),
            CoapError::ReceiveFailed => defmt::write!(fmt, "Receive failed"),
        }
    }
}
