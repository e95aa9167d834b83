// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// Licht / GPIO Konfiguration
// ============================================================================

/// GPIO-Pin für das Licht (digitaler Ausgang, High = an)
///
/// Nur für Logs: muss zu `peripherals.GPIO15` in main.rs passen.
pub const LIGHT_GPIO_PIN: u8 = 15;

/// GPIO-Pin für den lokalen Taster (BOOT-Taster, Low-aktiv)
///
/// Nur für Logs: muss zu `peripherals.GPIO9` in main.rs passen.
pub const BUTTON_GPIO_PIN: u8 = 9;

/// Entprell-Fenster für den Taster in Millisekunden
/// Flanken innerhalb dieses Fensters nach einem Tastendruck werden ignoriert
pub const BUTTON_DEBOUNCE_MS: u64 = 200;

// ============================================================================
// CoAP Konfiguration
// ============================================================================

/// CoAP UDP-Port (Standard: 5683 laut RFC 7252)
pub const COAP_PORT: u16 = 5683;

/// Name der Licht-Resource (Uri-Path)
pub const LIGHT_RESOURCE: &str = light_core::LIGHT_RESOURCE;

/// Anzahl der Einträge in der Resource-Tabelle
pub const COAP_MAX_RESOURCES: usize = 2;

/// Maximale Datagram-Größe in Bytes
/// Ein Licht-Request ist < 32 Bytes, Rest ist Reserve für Optionen
pub const COAP_DATAGRAM_SIZE: usize = 256;

/// UDP RX/TX Buffer-Größe in Bytes (embassy-net Socket)
pub const COAP_SOCKET_BUFFER_SIZE: usize = 1024;

/// Anzahl Paket-Metadaten-Slots pro Richtung
pub const COAP_SOCKET_META_SLOTS: usize = 4;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach WiFi-Fehlern in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
/// coap-lite allokiert pro Request einige Vecs für Token, Optionen und Payload
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

/// Anzahl Sockets im embassy-net Stack
/// CoAP (1) + mDNS (1) + DHCP (1) + Reserve
pub const NET_SOCKET_COUNT: usize = 4;

// ============================================================================
// mDNS-Konfiguration
// ============================================================================

/// mDNS Hostname (ohne .local suffix)
/// Der ESP32 wird erreichbar sein unter: <MDNS_HOSTNAME>.local
pub const MDNS_HOSTNAME: &str = "light";

/// mDNS TTL (Time To Live) in Sekunden
pub const MDNS_TTL_SECS: u32 = 120;

/// mDNS Reconnect Delay in Sekunden
pub const MDNS_RECONNECT_DELAY_SECS: u64 = 5;

/// mDNS Port (Standard: 5353, RFC 6762)
pub const MDNS_PORT: u16 = 5353;

/// mDNS IPv4 Multicast-Adresse (224.0.0.251)
pub const MDNS_MULTICAST_ADDR: [u8; 4] = [224, 0, 0, 251];

/// UDP Buffer-Größen für mDNS (TX, RX in Bytes)
pub const MDNS_UDP_BUFFER_SIZE: usize = 512;

/// mDNS Receive/Send Buffer-Größen in Bytes
/// 1500 Bytes = Standard MTU für Ethernet/WiFi
pub const MDNS_PACKET_BUFFER_SIZE: usize = 1500;
