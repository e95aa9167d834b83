// GPIO-Licht: LightActuator-Implementierung für einen digitalen Ausgang

use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin};
use light_core::{LightActuator, LightError, LightState};

/// Real Hardware Light
///
/// Treibt einen einfachen GPIO-Ausgang (LED oder Relais, High = an).
/// Die GPIO-Operationen des ESP32 können nicht fehlschlagen, daher
/// liefern alle Methoden `Ok(())`.
pub struct GpioLight<'a> {
    pin: Output<'a>,
}

impl<'a> GpioLight<'a> {
    /// Erstellt ein neues GpioLight, initial ausgeschaltet
    ///
    /// # Parameter
    /// - `pin`: GPIO Peripheral für den Ausgang (siehe `LIGHT_GPIO_PIN`)
    pub fn new(pin: impl OutputPin + 'a) -> Self {
        let pin = Output::new(pin, Level::Low, OutputConfig::default());
        Self { pin }
    }
}

impl LightActuator for GpioLight<'_> {
    fn set_on(&mut self) -> Result<(), LightError> {
        self.pin.set_high();
        Ok(())
    }

    fn set_off(&mut self) -> Result<(), LightError> {
        self.pin.set_low();
        Ok(())
    }

    fn toggle(&mut self) -> Result<(), LightError> {
        self.pin.toggle();
        Ok(())
    }

    fn state(&self) -> LightState {
        LightState::from(self.pin.is_set_high())
    }
}
