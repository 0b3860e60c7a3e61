pub mod discovery;
pub mod enricher;
pub mod providers;
pub mod sampler;
pub mod streaming;
pub mod validation;

pub use discovery::{DiscoverySettings, MovieDiscovery};
