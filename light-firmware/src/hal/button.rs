// Lokaler Taster - schaltet das Licht ohne Netzwerk um

use embassy_time::{Duration, Instant};
use esp_hal::gpio::{Input, InputConfig, InputPin, Pull};

use crate::config::BUTTON_DEBOUNCE_MS;

/// Low-aktiver Taster mit Pull-Up und einfacher Entprellung
pub struct Button<'a> {
    input: Input<'a>,
    last_press: Option<Instant>,
}

impl<'a> Button<'a> {
    pub fn new(pin: impl InputPin + 'a) -> Self {
        let input = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
        Self {
            input,
            last_press: None,
        }
    }

    /// Wartet auf den nächsten entprellten Tastendruck
    ///
    /// Cancel-safe: wird der Future in einem `select` verworfen, geht
    /// höchstens eine Flanke verloren.
    pub async fn pressed(&mut self) {
        let debounce = Duration::from_millis(BUTTON_DEBOUNCE_MS);
        loop {
            self.input.wait_for_falling_edge().await;
            let now = Instant::now();
            let bouncing = self
                .last_press
                .is_some_and(|last| now.duration_since(last) < debounce);
            if !bouncing {
                self.last_press = Some(now);
                return;
            }
        }
    }
}
