//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use coap_lite::{MessageClass, MessageType, Packet, ResponseType};

use crate::traits::{LightActuator, LightError, ResponseError};
use crate::types::{CommandByte, LightCommand, LightState};

/// Maximale Token-Länge laut CoAP
const MAX_TOKEN_LEN: usize = 8;

/// Liest genau ein Kommando-Byte vom Anfang des Payloads
///
/// # Beispiele
///
/// ```
/// # use light_core::{decode_command, CommandByte, LightCommand};
/// assert_eq!(decode_command(&[1]), CommandByte::Known(LightCommand::On));
/// assert_eq!(decode_command(&[7]), CommandByte::Unknown(7));
/// assert_eq!(decode_command(&[]), CommandByte::Missing);
/// ```
pub fn decode_command(payload: &[u8]) -> CommandByte {
    match payload.first() {
        Some(&byte) => match LightCommand::try_from(byte) {
            Ok(command) => CommandByte::Known(command),
            Err(byte) => CommandByte::Unknown(byte),
        },
        None => CommandByte::Missing,
    }
}

/// Wendet ein Kommando auf den Aktor an und liefert den neuen Zustand
pub fn apply_command<A: LightActuator>(
    actuator: &mut A,
    command: LightCommand,
) -> Result<LightState, LightError> {
    match command {
        LightCommand::On => actuator.set_on()?,
        LightCommand::Off => actuator.set_off()?,
        LightCommand::Toggle => actuator.toggle()?,
    }
    Ok(actuator.state())
}

/// Baut eine Piggybacked-Response (ACK) auf einen Request
///
/// Token und Message-ID werden übernommen, der Body bleibt leer.
pub fn build_response(request: &Packet, status: ResponseType) -> Result<Packet, ResponseError> {
    let token = request.get_token();
    if token.len() > MAX_TOKEN_LEN {
        return Err(ResponseError::InvalidToken);
    }

    let mut response = Packet::new();
    response.header.set_type(MessageType::Acknowledgement);
    response.header.code = MessageClass::Response(status);
    response.header.message_id = request.header.message_id;
    response.set_token(token.to_vec());
    Ok(response)
}

/// ACK mit Status `2.04 Changed`
pub fn build_ack(request: &Packet) -> Result<Packet, ResponseError> {
    build_response(request, ResponseType::Changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use coap_lite::RequestType;

    fn put_request(message_id: u16, token: &[u8]) -> Packet {
        let mut packet = Packet::new();
        packet.header.set_type(MessageType::Confirmable);
        packet.header.code = MessageClass::Request(RequestType::Put);
        packet.header.message_id = message_id;
        packet.set_token(token.to_vec());
        packet.payload = vec![1];
        packet
    }

    #[test]
    fn test_decode_command_reads_first_byte_only() {
        assert_eq!(
            decode_command(&[2, 0, 0]),
            CommandByte::Known(LightCommand::Toggle)
        );
    }

    #[test]
    fn test_decode_command_off() {
        assert_eq!(decode_command(&[0]), CommandByte::Known(LightCommand::Off));
    }

    #[test]
    fn test_build_ack_echoes_token_and_id() {
        let request = put_request(0x1234, &[0xde, 0xad]);
        let ack = build_ack(&request).unwrap();

        assert_eq!(ack.header.get_type(), MessageType::Acknowledgement);
        assert_eq!(ack.header.code, MessageClass::Response(ResponseType::Changed));
        assert_eq!(ack.header.message_id, 0x1234);
        assert_eq!(ack.get_token(), &[0xde, 0xad]);
        assert!(ack.payload.is_empty());
    }

    #[test]
    fn test_build_response_empty_token() {
        let request = put_request(7, &[]);
        let response = build_response(&request, ResponseType::NotFound).unwrap();

        assert_eq!(response.header.code, MessageClass::Response(ResponseType::NotFound));
        assert!(response.get_token().is_empty());
    }
}
