//! Gemeinsame Mocks für die Integration Tests
#![allow(dead_code)]

use coap_lite::Packet;
use light_core::{LightActuator, LightError, LightState, Responder, ResponseError};

// ============================================================================
// Mock Light + Responder
// ============================================================================

#[derive(Default)]
pub struct MockLight {
    pub level: bool,
    pub write_count: usize,
    pub fail_next_write: bool,
}

impl MockLight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lit() -> Self {
        Self {
            level: true,
            ..Self::default()
        }
    }

    fn drive(&mut self, level: bool) -> Result<(), LightError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LightError::PinFailed);
        }

        self.level = level;
        self.write_count += 1;
        Ok(())
    }
}

impl LightActuator for MockLight {
    fn set_on(&mut self) -> Result<(), LightError> {
        self.drive(true)
    }

    fn set_off(&mut self) -> Result<(), LightError> {
        self.drive(false)
    }

    fn toggle(&mut self) -> Result<(), LightError> {
        self.drive(!self.level)
    }

    fn state(&self) -> LightState {
        LightState::from(self.level)
    }
}

#[derive(Default)]
pub struct RecordingResponder {
    pub sent: Vec<Packet>,
    pub fail_next_send: bool,
}

impl Responder for RecordingResponder {
    fn send(&mut self, response: Packet) -> Result<(), ResponseError> {
        if self.fail_next_send {
            self.fail_next_send = false;
            return Err(ResponseError::EncodeFailed);
        }
        self.sent.push(response);
        Ok(())
    }
}
