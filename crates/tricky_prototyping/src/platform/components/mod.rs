//! Platform components (settings, timeline, wait timer).

pub mod settings;
pub mod timeline;

pub use settings::*;
pub use timeline::*;
