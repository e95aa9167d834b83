// CoAP-Modul: UDP-Transport und Resource-Tabelle
// Die Protokoll-Entscheidungen (Routing, Endpoint, ACKs) liegen in light-core,
// hier wird nur der embassy-net Socket angebunden.

pub mod runtime;

pub use runtime::{CoapBuffers, CoapError, CoapRuntime};
