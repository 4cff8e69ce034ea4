//! Provider registry addressing: source strings, registry hosts and the
//! resolved coordinate of a provider package.

mod coordinate;
mod host;
mod source;

pub use coordinate::{Platform, ProviderSourceCoordinate};
pub use host::{FriendlyHost, HostError, Hostname, PUBLIC_REGISTRY_HOST};
pub use source::{parse_provider_source, ProviderSourceParts, DEFAULT_PROVIDER_NAMESPACE};
