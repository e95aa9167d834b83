//! Core Types für die Licht-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::{LightError, ResponseError};

/// Licht-Kommando aus dem CoAP-Payload
///
/// Wird als einzelnes Byte im Body eines PUT-Requests übertragen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum LightCommand {
    /// Licht ausschalten (Byte `0`)
    Off = 0,
    /// Licht einschalten (Byte `1`)
    On = 1,
    /// Zustand invertieren (Byte `2`)
    Toggle = 2,
}

impl TryFrom<u8> for LightCommand {
    /// Das unbekannte Byte
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            2 => Ok(Self::Toggle),
            other => Err(other),
        }
    }
}

impl From<LightCommand> for u8 {
    fn from(command: LightCommand) -> Self {
        command as u8
    }
}

/// Logischer Pegel des Aktors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LightState {
    #[default]
    Off,
    On,
}

impl From<bool> for LightState {
    fn from(is_on: bool) -> Self {
        if is_on { LightState::On } else { LightState::Off }
    }
}

/// Ergebnis des Payload-Decodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandByte {
    /// Gültiges Kommando
    Known(LightCommand),
    /// Byte vorhanden, aber kein bekanntes Kommando (No-Op)
    Unknown(u8),
    /// Payload leer (No-Op)
    Missing,
}

impl CommandByte {
    pub fn command(self) -> Option<LightCommand> {
        match self {
            CommandByte::Known(command) => Some(command),
            _ => None,
        }
    }
}

/// Grund, warum ein Request still verworfen wurde
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IgnoreReason {
    /// Weder Confirmable noch Non-Confirmable
    UnexpectedKind,
    /// Request-Code ist nicht PUT
    UnexpectedCode,
}

/// Status der Acknowledgment-Response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckStatus {
    /// Non-Confirmable Request, keine Response
    NotRequired,
    /// ACK wurde an den Responder übergeben
    Sent,
    /// ACK konnte nicht erzeugt oder gesendet werden und wurde verworfen
    Dropped(ResponseError),
}

/// Ergebnis eines Request-Handlings
///
/// Der Endpoint loggt selbst nichts, die Firmware loggt dieses Ergebnis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Ignored(IgnoreReason),
    Handled {
        command: CommandByte,
        state: LightState,
        ack: AckStatus,
    },
    ActuatorFailed(LightError),
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for LightCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LightCommand::Off => defmt::write!(fmt, "Off"),
            LightCommand::On => defmt::write!(fmt, "On"),
            LightCommand::Toggle => defmt::write!(fmt, "Toggle"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LightState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            LightState::Off => defmt::write!(fmt, "off"),
            LightState::On => defmt::write!(fmt, "on"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandByte {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CommandByte::Known(command) => defmt::write!(fmt, "{}", command),
            CommandByte::Unknown(byte) => defmt::write!(fmt, "Unknown({=u8:#x})", byte),
            CommandByte::Missing => defmt::write!(fmt, "Missing"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AckStatus {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            AckStatus::NotRequired => defmt::write!(fmt, "no ACK"),
            AckStatus::Sent => defmt::write!(fmt, "ACK sent"),
            AckStatus::Dropped(e) => defmt::write!(fmt, "ACK dropped ({})", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RequestOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RequestOutcome::Ignored(reason) => defmt::write!(fmt, "Ignored({})", reason),
            RequestOutcome::Handled {
                command,
                state,
                ack,
            } => defmt::write!(
                fmt,
                "Handled {{ command: {}, state: {}, {} }}",
                command,
                state,
                ack
            ),
            RequestOutcome::ActuatorFailed(e) => defmt::write!(fmt, "ActuatorFailed({})", e),
        }
    }
}
