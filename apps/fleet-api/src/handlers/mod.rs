//! Handlers 模块

pub mod alerts;
pub mod devices;
pub mod stats;
pub mod system;
pub mod telemetry;

pub use alerts::*;
pub use devices::*;
pub use stats::*;
pub use system::*;
pub use telemetry::*;
