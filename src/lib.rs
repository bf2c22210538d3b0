//! prelude exports common things for the bus monitor such as the clock and signals modules.

/// prelude exports common items for the bus monitor.
pub mod prelude {
    pub use clock::*;
    pub use signals::*;
}
