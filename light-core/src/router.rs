//! Resource-Tabelle und Datagram-Dispatch des CoAP-Runtimes
//!
//! Der Router ordnet eingehende CoAP-Nachrichten anhand ihrer Uri-Path
//! Optionen einer registrierten Resource zu und sammelt die (höchstens
//! eine) Response für den Transport ein.

use alloc::collections::LinkedList;
use alloc::vec::Vec;

use coap_lite::{CoapOption, MessageClass, MessageType, Packet, ResponseType};

use crate::logic::build_response;
use crate::traits::{RequestHandler, Responder, ResponseError};

/// Fehler bei der Registrierung einer Resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistrationError {
    /// Pfad ist leer
    EmptyPath,
    /// Pfad ist bereits registriert
    Duplicate,
    /// Keine freien Einträge in der Tabelle
    TableFull,
}

/// Was mit einem Datagram passiert ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatagramOutcome<O> {
    /// Kein gültiges CoAP, verworfen
    Malformed,
    /// Leere Confirmable-Nachricht (CoAP Ping), mit Reset beantwortet
    Ping,
    /// Kein Handler für den Pfad
    NotFound,
    /// An den Handler übergeben
    Dispatched(O),
}

#[cfg(feature = "defmt")]
impl<O: defmt::Format> defmt::Format for DatagramOutcome<O> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DatagramOutcome::Malformed => defmt::write!(fmt, "Malformed"),
            DatagramOutcome::Ping => defmt::write!(fmt, "Ping"),
            DatagramOutcome::NotFound => defmt::write!(fmt, "NotFound"),
            DatagramOutcome::Dispatched(outcome) => defmt::write!(fmt, "{}", outcome),
        }
    }
}

/// Ergebnis von [`Router::handle_datagram`]
#[derive(Debug)]
pub struct Exchange<O> {
    pub outcome: DatagramOutcome<O>,
    /// Serialisierte Response für den Absender, falls vorhanden
    pub reply: Option<Vec<u8>>,
}

struct Resource<H> {
    path: &'static str,
    handler: H,
}

/// Resource-Tabelle mit fester Kapazität `N`
pub struct Router<H, const N: usize> {
    resources: heapless::Vec<Resource<H>, N>,
}

impl<H: RequestHandler, const N: usize> Router<H, N> {
    pub const fn new() -> Self {
        Self {
            resources: heapless::Vec::new(),
        }
    }

    /// Registriert einen Handler unter `path` (z.B. `"light"`)
    pub fn add_resource(&mut self, path: &'static str, handler: H) -> Result<(), RegistrationError> {
        if path.split('/').all(str::is_empty) {
            return Err(RegistrationError::EmptyPath);
        }
        if self.resources.iter().any(|r| same_path(r.path, path)) {
            return Err(RegistrationError::Duplicate);
        }
        self.resources
            .push(Resource { path, handler })
            .map_err(|_| RegistrationError::TableFull)
    }

    pub fn resource_mut(&mut self, path: &str) -> Option<&mut H> {
        self.resources
            .iter_mut()
            .find(|r| same_path(r.path, path))
            .map(|r| &mut r.handler)
    }

    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.iter().map(|r| r.path)
    }

    /// Verarbeitet ein empfangenes Datagram vollständig
    ///
    /// Unbekannte Pfade werden bei Confirmable-Requests mit `4.04 Not Found`
    /// beantwortet, alles andere ohne passenden Handler wird verworfen.
    pub fn handle_datagram(&mut self, datagram: &[u8]) -> Exchange<H::Outcome> {
        let Ok(request) = Packet::from_bytes(datagram) else {
            return Exchange {
                outcome: DatagramOutcome::Malformed,
                reply: None,
            };
        };

        let confirmable = request.header.get_type() == MessageType::Confirmable;

        if request.header.code == MessageClass::Empty {
            let reply = confirmable.then(|| reset_for(&request)).flatten();
            return Exchange {
                outcome: DatagramOutcome::Ping,
                reply,
            };
        }

        let segments = request.get_option(CoapOption::UriPath);
        let Some(resource) = self
            .resources
            .iter_mut()
            .find(|r| path_matches(segments, r.path))
        else {
            let is_request = matches!(request.header.code, MessageClass::Request(_));
            let reply = if confirmable && is_request {
                build_response(&request, ResponseType::NotFound)
                    .ok()
                    .and_then(|r| r.to_bytes().ok())
            } else {
                None
            };
            return Exchange {
                outcome: DatagramOutcome::NotFound,
                reply,
            };
        };

        let mut outbox = Outbox::default();
        let outcome = resource.handler.handle(&request, &mut outbox);
        Exchange {
            outcome: DatagramOutcome::Dispatched(outcome),
            reply: outbox.reply,
        }
    }
}

impl<H: RequestHandler, const N: usize> Default for Router<H, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Responder, der genau eine serialisierte Response aufnimmt
#[derive(Default)]
struct Outbox {
    reply: Option<Vec<u8>>,
}

impl Responder for Outbox {
    fn send(&mut self, response: Packet) -> Result<(), ResponseError> {
        if self.reply.is_some() {
            return Err(ResponseError::AlreadyResponded);
        }
        let bytes = response.to_bytes().map_err(|_| ResponseError::EncodeFailed)?;
        self.reply = Some(bytes);
        Ok(())
    }
}

fn reset_for(request: &Packet) -> Option<Vec<u8>> {
    let mut reset = Packet::new();
    reset.header.set_type(MessageType::Reset);
    reset.header.message_id = request.header.message_id;
    reset.to_bytes().ok()
}

fn segments_of(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn same_path(a: &str, b: &str) -> bool {
    segments_of(a).eq(segments_of(b))
}

fn path_matches(segments: Option<&LinkedList<Vec<u8>>>, path: &str) -> bool {
    let actual = segments.into_iter().flatten().map(Vec::as_slice);
    segments_of(path).map(str::as_bytes).eq(actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use coap_lite::RequestType;

    /// Handler, der nur mitzählt und jeden Request bestätigt
    #[derive(Default)]
    struct Counter {
        calls: usize,
    }

    impl RequestHandler for Counter {
        type Outcome = usize;

        fn handle<R: Responder>(&mut self, request: &Packet, responder: &mut R) -> usize {
            self.calls += 1;
            if let Ok(ack) = crate::logic::build_ack(request) {
                let _ = responder.send(ack);
            }
            self.calls
        }
    }

    /// Handler, der zweimal antwortet
    struct Chatty {
        second: Option<Result<(), ResponseError>>,
    }

    impl RequestHandler for Chatty {
        type Outcome = ();

        fn handle<R: Responder>(&mut self, request: &Packet, responder: &mut R) {
            let _ = responder.send(crate::logic::build_ack(request).unwrap());
            let not_found = build_response(request, ResponseType::NotFound).unwrap();
            self.second = Some(responder.send(not_found));
        }
    }

    fn datagram(kind: MessageType, code: MessageClass, path: &[&str]) -> Vec<u8> {
        let mut packet = Packet::new();
        packet.header.set_type(kind);
        packet.header.code = code;
        packet.header.message_id = 0x0101;
        // Empty-Nachrichten tragen keinen Token
        if code != MessageClass::Empty {
            packet.set_token(vec![1, 2, 3, 4]);
        }
        for segment in path {
            packet.add_option(CoapOption::UriPath, segment.as_bytes().to_vec());
        }
        packet.to_bytes().unwrap()
    }

    #[test]
    fn test_registration_errors() {
        let mut router: Router<Counter, 2> = Router::new();

        assert_eq!(
            router.add_resource("", Counter::default()),
            Err(RegistrationError::EmptyPath)
        );
        assert_eq!(router.add_resource("light", Counter::default()), Ok(()));
        assert_eq!(
            router.add_resource("/light", Counter::default()),
            Err(RegistrationError::Duplicate)
        );
        assert_eq!(router.add_resource("switch", Counter::default()), Ok(()));
        assert_eq!(
            router.add_resource("dimmer", Counter::default()),
            Err(RegistrationError::TableFull)
        );
        assert_eq!(router.paths().count(), 2);
    }

    #[test]
    fn test_nested_path_dispatch() {
        let mut router: Router<Counter, 2> = Router::new();
        router.add_resource("room/light", Counter::default()).unwrap();

        let bytes = datagram(
            MessageType::NonConfirmable,
            MessageClass::Request(RequestType::Put),
            &["room", "light"],
        );
        let exchange = router.handle_datagram(&bytes);

        assert_eq!(exchange.outcome, DatagramOutcome::Dispatched(1));
        assert_eq!(router.resource_mut("room/light").unwrap().calls, 1);
    }

    #[test]
    fn test_prefix_does_not_match() {
        let mut router: Router<Counter, 1> = Router::new();
        router.add_resource("light", Counter::default()).unwrap();

        let bytes = datagram(
            MessageType::NonConfirmable,
            MessageClass::Request(RequestType::Put),
            &["light", "extra"],
        );

        assert_eq!(
            router.handle_datagram(&bytes).outcome,
            DatagramOutcome::NotFound
        );
    }

    #[test]
    fn test_ping_answered_with_reset() {
        let mut router: Router<Counter, 1> = Router::new();
        let bytes = datagram(MessageType::Confirmable, MessageClass::Empty, &[]);

        let exchange = router.handle_datagram(&bytes);
        assert_eq!(exchange.outcome, DatagramOutcome::Ping);

        let reset = Packet::from_bytes(&exchange.reply.unwrap()).unwrap();
        assert_eq!(reset.header.get_type(), MessageType::Reset);
        assert_eq!(reset.header.message_id, 0x0101);
        assert!(reset.get_token().is_empty());
    }

    #[test]
    fn test_second_response_is_rejected() {
        let mut router: Router<Chatty, 1> = Router::new();
        router
            .add_resource("light", Chatty { second: None })
            .unwrap();

        let bytes = datagram(
            MessageType::Confirmable,
            MessageClass::Request(RequestType::Put),
            &["light"],
        );
        let exchange = router.handle_datagram(&bytes);

        let handler = router.resource_mut("light").unwrap();
        assert_eq!(handler.second, Some(Err(ResponseError::AlreadyResponded)));

        let reply = Packet::from_bytes(&exchange.reply.unwrap()).unwrap();
        assert_eq!(reply.header.code, MessageClass::Response(ResponseType::Changed));
    }
}
