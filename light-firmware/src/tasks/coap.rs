// CoAP Server Task - bedient die Licht-Resource und den lokalen Taster
use defmt::{Debug2Format, error, info, warn};
use embassy_futures::select::{Either, select};
use light_core::{DatagramOutcome, LightCommand, RequestOutcome};

use crate::config::{COAP_DATAGRAM_SIZE, COAP_PORT, LIGHT_RESOURCE};
use crate::hal::Button;
use crate::LightRuntime;

/// CoAP Server Task - die einzige Task, die das Licht anfasst
///
/// Service-Loop im Wechsel zwischen zwei Event-Quellen:
/// - Eingehende CoAP-Datagramme → Router → Licht-Endpoint → ggf. ACK
/// - Tastendruck am lokalen Taster → Toggle
///
/// Der Endpoint-Handler läuft synchron bis zum Ende, bevor das nächste
/// Event angenommen wird.
///
/// # Parameter
/// - `runtime`: gestartete CoAP Runtime mit registrierter Licht-Resource
/// - `button`: lokaler Taster
#[embassy_executor::task]
pub async fn coap_server_task(mut runtime: LightRuntime, mut button: Button<'static>) -> ! {
    info!(
        "CoAP: Listening on port {}, resource '/{}'",
        COAP_PORT, LIGHT_RESOURCE
    );

    let mut datagram = [0u8; COAP_DATAGRAM_SIZE];

    loop {
        match select(runtime.receive(&mut datagram), button.pressed()).await {
            Either::First(Ok((len, remote))) => {
                let outcome = runtime.dispatch(&datagram[..len], remote).await;
                log_outcome(&outcome, &remote.endpoint);
            }
            Either::First(Err(e)) => warn!("CoAP: {}", e),
            Either::Second(()) => toggle_locally(&mut runtime),
        }
    }
}

/// Toggle über den Taster, gleicher Weg wie ein PUT mit Byte `2`
fn toggle_locally(runtime: &mut LightRuntime) {
    let Some(light) = runtime.resource_mut(LIGHT_RESOURCE) else {
        return;
    };
    match light.apply(LightCommand::Toggle) {
        Ok(state) => info!("Button: Light toggled, now {}", state),
        Err(e) => error!("Button: Toggle failed: {}", e),
    }
}

fn log_outcome(outcome: &DatagramOutcome<RequestOutcome>, remote: &impl core::fmt::Debug) {
    match outcome {
        DatagramOutcome::Dispatched(RequestOutcome::Handled { .. }) => {
            info!("CoAP: {} from {}", outcome, Debug2Format(remote))
        }
        DatagramOutcome::Dispatched(RequestOutcome::ActuatorFailed(_)) => {
            error!("CoAP: {} from {}", outcome, Debug2Format(remote))
        }
        _ => warn!("CoAP: {} from {}", outcome, Debug2Format(remote)),
    }
}
