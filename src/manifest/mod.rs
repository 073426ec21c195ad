//! Fleet manifests: JSON descriptors built into live ships.

mod fleet;

pub use fleet::{CargoManifest, ContainerManifest, FleetManifest, ManifestError, ShipManifest};
