// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron auf demselben Executor (single-core).
// Nur coap_server_task besitzt das Licht, die übrigen Tasks halten
// das Netzwerk am Laufen.

pub mod coap;
pub mod mdns;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use coap::coap_server_task;
pub use mdns::mdns_responder_task;
pub use wifi::{connection_task, dhcp_task, net_task};
