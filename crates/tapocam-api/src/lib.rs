// tapocam-api: Async Rust client for the Tapo camera local control API

pub mod auth;
pub mod client;
pub mod codes;
pub mod controls;
pub mod error;
pub mod info;
pub mod protocol;
pub mod session;
pub mod transport;

pub use auth::Credentials;
pub use client::{ClientConfig, TapoClient};
pub use controls::{AlarmSettings, DayNightMode, DoControl, OsdElement, OsdSettings, SetControl};
pub use error::Error;
pub use info::{CameraInfo, ClockStatus, MotionDetection, Preset};
pub use transport::{TlsMode, TransportConfig};
