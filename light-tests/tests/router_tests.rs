//! Integration Tests für Resource-Tabelle und Datagram-Dispatch
//!
//! Schickt echte CoAP-Datagramme (Bytes) durch den Router, so wie sie
//! der UDP-Transport der Firmware empfängt.

use coap_lite::{CoapOption, MessageClass, MessageType, Packet, RequestType, ResponseType};
use light_core::{
    AckStatus, CommandByte, DatagramOutcome, LIGHT_RESOURCE, LightCommand, LightEndpoint,
    LightState, RegistrationError, RequestOutcome, Router,
};

mod common;

use common::MockLight;

type LightRouter = Router<LightEndpoint<MockLight>, 2>;

fn light_router() -> LightRouter {
    let mut router = LightRouter::new();
    router
        .add_resource(LIGHT_RESOURCE, LightEndpoint::new(MockLight::new()))
        .unwrap();
    router
}

fn datagram(kind: MessageType, code: RequestType, path: &str, payload: &[u8]) -> Vec<u8> {
    let mut packet = Packet::new();
    packet.header.set_type(kind);
    packet.header.code = MessageClass::Request(code);
    packet.header.message_id = 0x4711;
    packet.set_token(vec![0xca, 0xfe]);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        packet.add_option(CoapOption::UriPath, segment.as_bytes().to_vec());
    }
    packet.payload = payload.to_vec();
    packet.to_bytes().unwrap()
}

fn light_state(router: &mut LightRouter) -> LightState {
    router.resource_mut(LIGHT_RESOURCE).unwrap().state()
}

#[test]
fn test_registering_light_twice_fails() {
    let mut router = light_router();
    let result = router.add_resource("light", LightEndpoint::new(MockLight::new()));
    assert_eq!(result, Err(RegistrationError::Duplicate));
}

#[test]
fn test_confirmable_put_returns_changed_ack() {
    let mut router = light_router();

    let exchange = router.handle_datagram(&datagram(
        MessageType::Confirmable,
        RequestType::Put,
        "light",
        &[1],
    ));

    assert_eq!(
        exchange.outcome,
        DatagramOutcome::Dispatched(RequestOutcome::Handled {
            command: CommandByte::Known(LightCommand::On),
            state: LightState::On,
            ack: AckStatus::Sent,
        })
    );

    let ack = Packet::from_bytes(&exchange.reply.unwrap()).unwrap();
    assert_eq!(ack.header.get_type(), MessageType::Acknowledgement);
    assert_eq!(ack.header.code, MessageClass::Response(ResponseType::Changed));
    assert_eq!(ack.header.message_id, 0x4711);
    assert_eq!(ack.get_token(), &[0xca, 0xfe]);
    assert_eq!(light_state(&mut router), LightState::On);
}

#[test]
fn test_non_confirmable_put_has_no_reply() {
    let mut router = light_router();

    let exchange = router.handle_datagram(&datagram(
        MessageType::NonConfirmable,
        RequestType::Put,
        "light",
        &[2],
    ));

    assert!(exchange.reply.is_none());
    assert_eq!(light_state(&mut router), LightState::On);
}

#[test]
fn test_get_on_light_is_silently_ignored() {
    let mut router = light_router();

    let exchange = router.handle_datagram(&datagram(
        MessageType::Confirmable,
        RequestType::Get,
        "light",
        &[1],
    ));

    assert!(matches!(
        exchange.outcome,
        DatagramOutcome::Dispatched(RequestOutcome::Ignored(_))
    ));
    assert!(exchange.reply.is_none());
    assert_eq!(light_state(&mut router), LightState::Off);
}

#[test]
fn test_unknown_path_confirmable_gets_not_found() {
    let mut router = light_router();

    let exchange = router.handle_datagram(&datagram(
        MessageType::Confirmable,
        RequestType::Put,
        "lamp",
        &[1],
    ));

    assert_eq!(exchange.outcome, DatagramOutcome::NotFound);
    let reply = Packet::from_bytes(&exchange.reply.unwrap()).unwrap();
    assert_eq!(reply.header.code, MessageClass::Response(ResponseType::NotFound));
    assert_eq!(reply.header.message_id, 0x4711);
    assert_eq!(light_state(&mut router), LightState::Off);
}

#[test]
fn test_unknown_path_non_confirmable_is_dropped() {
    let mut router = light_router();

    let exchange = router.handle_datagram(&datagram(
        MessageType::NonConfirmable,
        RequestType::Put,
        "lamp",
        &[1],
    ));

    assert_eq!(exchange.outcome, DatagramOutcome::NotFound);
    assert!(exchange.reply.is_none());
}

#[test]
fn test_garbage_is_dropped() {
    let mut router = light_router();

    // Kürzer als der feste 4-Byte-Header
    let exchange = router.handle_datagram(&[0x00]);

    assert_eq!(exchange.outcome, DatagramOutcome::Malformed);
    assert!(exchange.reply.is_none());
    assert_eq!(light_state(&mut router), LightState::Off);
}
