pub mod bus;
pub mod clock;
pub mod status;

pub use bus::PiBus;
pub use clock::Clock;
pub use status::StatusDisplay;
