//! Hardware- und Runtime-Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zum Aktor (GPIO-Pin) und
//! zum Netzwerk-Runtime ohne konkrete Implementierung.

use coap_lite::Packet;

use crate::types::LightState;

/// Fehler-Typ für Aktor-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightError {
    PinFailed,
}

/// Fehler beim Erzeugen oder Senden einer Response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// Token des Requests ist länger als 8 Bytes
    InvalidToken,
    /// Response konnte nicht serialisiert werden
    EncodeFailed,
    /// Für diesen Request wurde bereits eine Response abgegeben
    AlreadyResponded,
}

/// Trait für den binären Aktor ("das Licht")
///
/// # Implementierungen
/// - **Production:** GpioLight (ESP32 GPIO Output)
/// - **Testing:** MockLight (in-memory Mock)
pub trait LightActuator {
    /// Setzt den Ausgang auf High
    fn set_on(&mut self) -> Result<(), LightError>;

    /// Setzt den Ausgang auf Low
    fn set_off(&mut self) -> Result<(), LightError>;

    /// Invertiert den Ausgang
    fn toggle(&mut self) -> Result<(), LightError>;

    /// Aktueller logischer Pegel
    fn state(&self) -> LightState;
}

/// Rückkanal des Netzwerk-Runtimes für genau eine Response
pub trait Responder {
    /// Übergibt die Response an den Transport
    ///
    /// # Fehlerbehandlung
    /// Bei einem Fehler ist die Response verworfen, es gibt keinen Retry.
    fn send(&mut self, response: Packet) -> Result<(), ResponseError>;
}

/// Handler einer registrierten Resource
///
/// Wird vom Runtime synchron aufgerufen und muss ohne Blockieren
/// zurückkehren.
pub trait RequestHandler {
    /// Ergebnis-Typ zum Loggen durch den Aufrufer
    type Outcome;

    fn handle<R: Responder>(&mut self, request: &Packet, responder: &mut R) -> Self::Outcome;
}
