// WiFi Tasks - Verbindung, Netzwerk-Stack und DHCP
//
// Zusammen bilden diese Tasks das Netzwerk-Runtime, auf dem der
// CoAP-Transport aufsetzt.
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};

use crate::config::{COAP_PORT, LIGHT_RESOURCE, WIFI_PASSWORD, WIFI_RETRY_DELAY_SECS, WIFI_SSID};

/// WiFi Connection Task
///
/// Konfiguriert den Station-Modus, verbindet mit dem Access Point und
/// verbindet nach jedem Disconnect erneut.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    info!("WiFi: Starting connection task");
    let retry_delay = Duration::from_secs(WIFI_RETRY_DELAY_SECS);

    loop {
        if matches!(controller.is_started(), Ok(false)) {
            let client_config = ModeConfig::Client(
                ClientConfig::default()
                    .with_ssid(WIFI_SSID.into())
                    .with_password(WIFI_PASSWORD.into()),
            );

            if let Err(e) = controller.set_config(&client_config) {
                error!("WiFi: Failed to set configuration: {}", Debug2Format(&e));
                Timer::after(retry_delay).await;
                continue;
            }

            if let Err(e) = controller.start_async().await {
                error!("WiFi: Failed to start: {}", Debug2Format(&e));
                Timer::after(retry_delay).await;
                continue;
            }

            info!("WiFi: Started");
        }

        info!("WiFi: Connecting to '{}'...", WIFI_SSID);
        if let Err(e) = controller.connect_async().await {
            error!("WiFi: Connection failed: {}", Debug2Format(&e));
            Timer::after(retry_delay).await;
            continue;
        }
        info!("WiFi: Connected");

        controller.wait_for_event(WifiEvent::StaDisconnected).await;
        warn!("WiFi: Disconnected from AP, will retry...");
        Timer::after(Duration::from_secs(2)).await;
    }
}

/// Network Task
///
/// Treibt den embassy-net Runner (Pakete, Timer, DHCP). Ohne diesen Task
/// erreicht kein Datagram den CoAP-Socket.
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Wartet auf die IPv4-Adresse und loggt, unter welcher URI das Licht
/// erreichbar ist.
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    stack.wait_config_up().await;

    if let Some(config) = stack.config_v4() {
        let address = config.address.address();
        info!("WiFi: Got IP address {}", Debug2Format(&address));
        info!("  Gateway: {}", Debug2Format(&config.gateway));
        info!(
            "  Light:   coap://{}:{}/{}",
            Debug2Format(&address),
            COAP_PORT,
            LIGHT_RESOURCE
        );
    }
}
