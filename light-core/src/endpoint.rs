//! Light Endpoint Controller
//!
//! Handler der CoAP-Resource `light`. Besitzt den Aktor als Kontext und
//! wird vom Runtime für jeden passenden Request synchron aufgerufen.

use coap_lite::{MessageClass, MessageType, Packet, RequestType};

use crate::logic::{apply_command, build_ack, decode_command};
use crate::traits::{LightActuator, LightError, RequestHandler, Responder};
use crate::types::{AckStatus, IgnoreReason, LightCommand, LightState, RequestOutcome};

/// Licht-Endpoint mit dem zugehörigen Aktor
pub struct LightEndpoint<A: LightActuator> {
    actuator: A,
}

impl<A: LightActuator> LightEndpoint<A> {
    pub fn new(actuator: A) -> Self {
        Self { actuator }
    }

    pub fn state(&self) -> LightState {
        self.actuator.state()
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Wendet ein Kommando aus einer lokalen Quelle an (z.B. Taster)
    pub fn apply(&mut self, command: LightCommand) -> Result<LightState, LightError> {
        apply_command(&mut self.actuator, command)
    }
}

impl<A: LightActuator> RequestHandler for LightEndpoint<A> {
    type Outcome = RequestOutcome;

    /// Verarbeitet einen Request auf die Licht-Resource
    ///
    /// 1. Nur Confirmable / Non-Confirmable, sonst still ignorieren
    /// 2. Nur PUT, sonst still ignorieren
    /// 3. Erstes Payload-Byte als Kommando lesen (fehlend = No-Op)
    /// 4. Kommando auf den Aktor anwenden
    /// 5. Bei Confirmable genau ein ACK `2.04 Changed` senden
    fn handle<R: Responder>(&mut self, request: &Packet, responder: &mut R) -> RequestOutcome {
        let confirmable = match request.header.get_type() {
            MessageType::Confirmable => true,
            MessageType::NonConfirmable => false,
            _ => return RequestOutcome::Ignored(IgnoreReason::UnexpectedKind),
        };

        if request.header.code != MessageClass::Request(RequestType::Put) {
            return RequestOutcome::Ignored(IgnoreReason::UnexpectedCode);
        }

        let command = decode_command(&request.payload);
        if let Some(command) = command.command() {
            if let Err(e) = self.apply(command) {
                return RequestOutcome::ActuatorFailed(e);
            }
        }

        let ack = if confirmable {
            // Bei Fehler wird die halb gebaute Response einfach gedroppt
            match build_ack(request).and_then(|ack| responder.send(ack)) {
                Ok(()) => AckStatus::Sent,
                Err(e) => AckStatus::Dropped(e),
            }
        } else {
            AckStatus::NotRequired
        };

        RequestOutcome::Handled {
            command,
            state: self.state(),
            ack,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ResponseError;
    use crate::types::CommandByte;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct PinStub {
        high: bool,
    }

    impl LightActuator for PinStub {
        fn set_on(&mut self) -> Result<(), LightError> {
            self.high = true;
            Ok(())
        }

        fn set_off(&mut self) -> Result<(), LightError> {
            self.high = false;
            Ok(())
        }

        fn toggle(&mut self) -> Result<(), LightError> {
            self.high = !self.high;
            Ok(())
        }

        fn state(&self) -> LightState {
            LightState::from(self.high)
        }
    }

    #[derive(Default)]
    struct Outbox(Vec<Packet>);

    impl Responder for Outbox {
        fn send(&mut self, response: Packet) -> Result<(), ResponseError> {
            self.0.push(response);
            Ok(())
        }
    }

    fn request(kind: MessageType, code: RequestType, payload: &[u8]) -> Packet {
        let mut packet = Packet::new();
        packet.header.set_type(kind);
        packet.header.code = MessageClass::Request(code);
        packet.header.message_id = 42;
        packet.set_token(vec![0xab]);
        packet.payload = payload.to_vec();
        packet
    }

    #[test]
    fn test_toggle_inverts_state() {
        let mut endpoint = LightEndpoint::new(PinStub::default());
        let mut outbox = Outbox::default();

        endpoint.handle(
            &request(MessageType::NonConfirmable, RequestType::Put, &[2]),
            &mut outbox,
        );
        assert_eq!(endpoint.state(), LightState::On);

        endpoint.handle(
            &request(MessageType::NonConfirmable, RequestType::Put, &[2]),
            &mut outbox,
        );
        assert_eq!(endpoint.state(), LightState::Off);
        assert!(outbox.0.is_empty());
    }

    #[test]
    fn test_reset_kind_is_ignored() {
        let mut endpoint = LightEndpoint::new(PinStub::default());
        let mut outbox = Outbox::default();

        let outcome = endpoint.handle(
            &request(MessageType::Reset, RequestType::Put, &[1]),
            &mut outbox,
        );

        assert_eq!(outcome, RequestOutcome::Ignored(IgnoreReason::UnexpectedKind));
        assert_eq!(endpoint.state(), LightState::Off);
        assert!(outbox.0.is_empty());
    }

    #[test]
    fn test_missing_payload_still_acknowledged() {
        let mut endpoint = LightEndpoint::new(PinStub::default());
        let mut outbox = Outbox::default();

        let outcome = endpoint.handle(
            &request(MessageType::Confirmable, RequestType::Put, &[]),
            &mut outbox,
        );

        assert_eq!(
            outcome,
            RequestOutcome::Handled {
                command: CommandByte::Missing,
                state: LightState::Off,
                ack: AckStatus::Sent,
            }
        );
        assert_eq!(outbox.0.len(), 1);
    }

    #[test]
    fn test_apply_from_local_source() {
        let mut endpoint = LightEndpoint::new(PinStub::default());
        assert_eq!(endpoint.apply(LightCommand::Toggle), Ok(LightState::On));
        assert!(endpoint.actuator().high);
    }
}
