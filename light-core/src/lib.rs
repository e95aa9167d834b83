//! Light Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Traits für Aktor und Response-Versand, den
//! Licht-Endpoint selbst und die Resource-Tabelle des CoAP-Runtimes.
//!
//! Das CoAP-Wire-Format übernimmt `coap-lite` (no_std + alloc).

#![no_std]

extern crate alloc;

pub mod endpoint;
pub mod logic;
pub mod router;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use coap_lite::Packet;
pub use endpoint::LightEndpoint;
pub use logic::{build_ack, build_response, decode_command};
pub use router::{DatagramOutcome, Exchange, RegistrationError, Router};
pub use traits::{LightActuator, LightError, RequestHandler, Responder, ResponseError};
pub use types::{AckStatus, CommandByte, IgnoreReason, LightCommand, LightState, RequestOutcome};

/// Name der Licht-Resource im CoAP-Runtime
pub const LIGHT_RESOURCE: &str = "light";
