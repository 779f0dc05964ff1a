//! Logging utilities and structured logging support
//!
//! Every subsystem logs under its own target so output can be filtered with
//! `RUST_LOG`, e.g. `RUST_LOG=titanium::collision=debug`.

pub use log::{debug, info, warn, error, trace};

/// Log targets, one per subsystem
pub mod targets {
    /// Engine lifecycle and configuration
    pub const PHYSICS: &str = "titanium::physics";
    /// Broad-phase, narrow-phase and resolution
    pub const COLLISION: &str = "titanium::collision";
    /// Rigid-body creation and destruction
    pub const RIGIDBODY: &str = "titanium::rigidbody";
    /// Layer registry changes
    pub const LAYERS: &str = "titanium::layers";
    /// Per-tick timing
    pub const PERFORMANCE: &str = "titanium::performance";
}

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with an explicit filter, e.g. `"titanium=debug"`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_filter(filter: &str) {
    let _ = env_logger::Builder::new()
        .parse_filters(filter)
        .format_timestamp_millis()
        .try_init();
}
