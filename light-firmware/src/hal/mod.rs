// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter den Traits aus light-core,
// damit Endpoint-Logik auf dem Host mit Mocks getestet werden kann.

pub mod button;
pub mod gpio_light;

pub use button::Button;
pub use gpio_light::GpioLight;
