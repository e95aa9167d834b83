// Library-Root: Firmware-Module für den CoAP-Licht-Endpoint
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod coap;
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von light-core
pub use light_core::{LightCommand, LightEndpoint, LightState, RequestOutcome};

use crate::coap::CoapRuntime;
use crate::hal::GpioLight;

// ============================================================================
// Type-Aliase
// ============================================================================
//
// Embassy Tasks dürfen nicht generisch sein, daher die konkreten Typen hier.

/// Licht-Endpoint mit echtem GPIO-Ausgang
pub type Light = LightEndpoint<GpioLight<'static>>;

/// CoAP Runtime mit dem Licht-Endpoint als einzigem Handler-Typ
pub type LightRuntime = CoapRuntime<Light>;

// ============================================================================
// Testing-Strategie
// ============================================================================
//
// Diese Crate kompiliert nur für riscv32imac-unknown-none-elf. Die gesamte
// Request-Logik (Endpoint, Router, ACK-Aufbau) liegt deshalb in light-core
// und wird in light-tests auf dem Host gegen MockLight getestet. Hier bleibt
// nur Verdrahtung: GPIO, Socket, Tasks.
