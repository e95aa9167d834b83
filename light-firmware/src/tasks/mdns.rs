// mDNS Responder Task - macht das Licht als light.local auffindbar
//
// - Protokoll: mDNS (RFC 6762) + DNS-SD (RFC 6763)
// - Transport: UDP Multicast auf 224.0.0.251:5353
// - Antwortet: A-Record für den Hostnamen und `_coap._udp` Service
//   mit dem CoAP-Port
// - Library: edge-mdns (no_std) über edge-nal-embassy

use core::net::{Ipv4Addr, SocketAddr};
use core::sync::atomic::{AtomicU32, Ordering};

use defmt::{Debug2Format, error, info};
use edge_mdns::buf::VecBufAccess;
use edge_mdns::domain::base::Ttl;
use edge_mdns::host::{Host, Service, ServiceAnswers};
use edge_mdns::{HostAnswersMdnsHandler, io};
use edge_nal::{MulticastV4, UdpBind, UdpSplit};
use edge_nal_embassy::{Udp, UdpBuffers};
use embassy_net::Stack;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};

use crate::config::{
    COAP_PORT, MDNS_HOSTNAME, MDNS_MULTICAST_ADDR, MDNS_PACKET_BUFFER_SIZE, MDNS_PORT,
    MDNS_RECONNECT_DELAY_SECS, MDNS_TTL_SECS, MDNS_UDP_BUFFER_SIZE,
};

type MdnsUdpBuffers = UdpBuffers<1, MDNS_UDP_BUFFER_SIZE, MDNS_UDP_BUFFER_SIZE>;
type MdnsUdp = Udp<'static, 1, MDNS_UDP_BUFFER_SIZE, MDNS_UDP_BUFFER_SIZE>;

/// Counter als Zufallsquelle für mDNS Query-IDs (Eindeutigkeit reicht)
static RNG_COUNTER: AtomicU32 = AtomicU32::new(0);

fn mdns_rng(buf: &mut [u8]) {
    let mut counter = RNG_COUNTER.fetch_add(1, Ordering::Relaxed);
    for chunk in buf.chunks_mut(4) {
        let bytes = counter.to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
        counter = counter.wrapping_add(1);
    }
}

/// mDNS Responder Task
///
/// Wartet auf eine IPv4-Adresse und beantwortet danach mDNS-Queries.
/// Bei Fehlern wird der Responder nach `MDNS_RECONNECT_DELAY_SECS`
/// neu gestartet.
///
/// ```bash
/// avahi-browse -r _coap._udp
/// coap-client -m put -e $'\x01' coap://light.local/light
/// ```
#[embassy_executor::task]
pub async fn mdns_responder_task(stack: &'static Stack<'static>) {
    info!("mDNS: Task started, waiting for network...");
    stack.wait_config_up().await;

    // Buffers einmalig anlegen, der Restart-Loop nutzt denselben UDP-Adapter
    static UDP_BUFFERS: static_cell::StaticCell<MdnsUdpBuffers> = static_cell::StaticCell::new();
    let udp_stack = Udp::new(*stack, UDP_BUFFERS.init(UdpBuffers::new()));

    loop {
        if let Err(e) = run_mdns_responder(stack, &udp_stack).await {
            error!("mDNS: Error: {}", e);
        }
        info!("mDNS: Restarting in {}s...", MDNS_RECONNECT_DELAY_SECS);
        Timer::after(Duration::from_secs(MDNS_RECONNECT_DELAY_SECS)).await;
    }
}

async fn run_mdns_responder(
    stack: &'static Stack<'static>,
    udp_stack: &MdnsUdp,
) -> Result<(), MdnsError> {
    let our_ip = stack
        .config_v4()
        .ok_or(MdnsError::NoAddress)?
        .address
        .address();
    info!("mDNS: Using IP {}", Debug2Format(&our_ip));

    let mut socket = udp_stack
        .bind(SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), MDNS_PORT))
        .await
        .map_err(|_| MdnsError::SocketBindFailed)?;

    socket
        .join_v4(Ipv4Addr::from(MDNS_MULTICAST_ADDR), Ipv4Addr::UNSPECIFIED)
        .await
        .map_err(|_| MdnsError::MulticastJoinFailed)?;

    let (recv, send) = socket.split();

    let host = Host {
        hostname: MDNS_HOSTNAME,
        ipv4: our_ip.into(),
        ipv6: [0u8; 16].into(), // kein proto-ipv6 in smoltcp
        ttl: Ttl::from_secs(MDNS_TTL_SECS),
    };

    let service = Service {
        name: MDNS_HOSTNAME,
        priority: 1,
        weight: 5,
        service: "_coap",
        protocol: "_udp",
        port: COAP_PORT,
        service_subtypes: &[],
        txt_kvs: &[("rt", "light")],
    };

    let recv_buf = VecBufAccess::<NoopRawMutex, MDNS_PACKET_BUFFER_SIZE>::new();
    let send_buf = VecBufAccess::<NoopRawMutex, MDNS_PACKET_BUFFER_SIZE>::new();

    // Broadcast-Signal wird von der API verlangt, aber nicht genutzt
    let signal = Signal::<NoopRawMutex, ()>::new();

    let mdns = io::Mdns::new(
        Some(our_ip),
        None,
        recv,
        send,
        recv_buf,
        send_buf,
        mdns_rng,
        &signal,
    );

    info!(
        "mDNS: Advertising '{}.local' and _coap._udp on port {}",
        MDNS_HOSTNAME, COAP_PORT
    );

    mdns.run(HostAnswersMdnsHandler::new(ServiceAnswers::new(
        &host, &service,
    )))
    .await
    .map_err(|_| MdnsError::ResponderFailed)
}

/// mDNS Fehler-Typen
///
/// Jeder Fehler führt zu einem Neustart des Responders.
#[derive(Debug)]
enum MdnsError {
    /// Noch keine IPv4-Adresse (Link zwischenzeitlich verloren)
    NoAddress,
    SocketBindFailed,
    MulticastJoinFailed,
    ResponderFailed,
}

impl defmt::Format for MdnsError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MdnsError::NoAddress => defmt::write!(fmt, "No IPv4 address"),
            MdnsError::SocketBindFailed => defmt::write!(fmt, "Socket bind failed"),
            MdnsError::MulticastJoinFailed => defmt::write!(fmt, "Multicast join failed"),
            MdnsError::ResponderFailed => defmt::write!(fmt, "Responder failed"),
        }
    }
}
