// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi + coap-lite benötigen dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_coap_light::coap::{CoapBuffers, CoapRuntime};
use esp_coap_light::config::{
    BUTTON_GPIO_PIN, COAP_PORT, EXTRA_HEAP_SIZE, LIGHT_GPIO_PIN, LIGHT_RESOURCE,
    NET_SOCKET_COUNT, WIFI_HEAP_SIZE,
};
use esp_coap_light::hal::{Button, GpioLight};
use esp_coap_light::tasks::{
    coap_server_task, connection_task, dhcp_task, mdns_responder_task, net_task,
};
use esp_coap_light::{LightEndpoint, LightRuntime};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Startup-Reihenfolge:
/// 1. Plattform (Clock, Heap, Embassy Runtime)
/// 2. Netzwerk-Runtime (WiFi + embassy-net Stack)
/// 3. CoAP-Transport starten (UDP-Port binden)
/// 4. Licht-Resource registrieren
///
/// Jeder Fehler in diesen Schritten ist fatal (Panic → esp-backtrace).
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Zwei Heap-Bereiche: reclaimed RAM (64 KB) + extra (36 KB)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für den TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    static RESOURCES: static_cell::StaticCell<StackResources<NET_SOCKET_COUNT>> =
        static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // CoAP-Transport starten
    static COAP_BUFFERS: static_cell::StaticCell<CoapBuffers> = static_cell::StaticCell::new();
    let mut runtime: LightRuntime = CoapRuntime::new(*stack, COAP_BUFFERS.init(CoapBuffers::new()));
    runtime
        .start(COAP_PORT)
        .expect("Failed to start CoAP transport");

    // Licht-Resource registrieren (Kontext = Endpoint mit GPIO-Ausgang)
    // Pin-Wechsel auch in LIGHT_GPIO_PIN nachziehen
    let light = LightEndpoint::new(GpioLight::new(peripherals.GPIO15));
    runtime
        .add_resource(LIGHT_RESOURCE, light)
        .expect("Failed to register light resource");
    info!(
        "Light: resource '/{}' on GPIO{}, button on GPIO{}",
        LIGHT_RESOURCE, LIGHT_GPIO_PIN, BUTTON_GPIO_PIN
    );

    // Pin-Wechsel auch in BUTTON_GPIO_PIN nachziehen
    let button = Button::new(peripherals.GPIO9);

    // Spawn Netzwerk-Runtime Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();
    spawner.spawn(mdns_responder_task(stack)).unwrap();

    // Spawn CoAP Service-Loop (besitzt Runtime, Licht und Taster)
    spawner.spawn(coap_server_task(runtime, button)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
