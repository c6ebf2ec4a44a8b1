pub mod bus;
pub mod constants;
pub mod effects;
pub mod environment;
pub mod error;
pub mod material;
pub mod pointer;
pub mod presets;
pub mod studio;
pub mod style;

pub use bus::*;
pub use constants::*;
pub use effects::*;
pub use environment::*;
pub use error::*;
pub use material::*;
pub use pointer::*;
pub use presets::*;
pub use studio::*;
pub use style::*;

// Re-exported so front-ends drive the applicator with the same clock type.
pub use instant::Instant;
