//! Fleet manifest descriptors and their construction into live ships.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{
    Container, ContainerShip, ContainerSpec, LiquidCargo, LoadError, ProductType, StowageLimit,
};
use crate::serial::{SerialGenerator, SerialNumber};

/// A whole fleet as described by a manifest file.
///
/// Products are declared once and referenced by name from refrigerated
/// containers, mirroring how product types are shared at runtime.
///
/// # Examples
///
/// ```
/// use u_stowage::manifest::FleetManifest;
/// use u_stowage::serial::SerialGenerator;
///
/// let json = r#"{
///     "ships": [{
///         "name": "Horizon",
///         "max_speed_knots": 25.0,
///         "max_container_count": 20,
///         "max_weight_tons": 30.0,
///         "containers": [{
///             "kind": "gas",
///             "pressure_atm": 2.0,
///             "tare_kg": 10.0,
///             "max_payload_kg": 30.0,
///             "height_cm": 100.0,
///             "depth_cm": 100.0,
///             "initial_load_kg": 10.0
///         }]
///     }]
/// }"#;
///
/// let manifest = FleetManifest::from_json(json).unwrap();
/// let mut serials = SerialGenerator::with_seed(7);
/// let ships = manifest.build(&mut serials).unwrap();
/// assert_eq!(ships[0].total_weight_kg(), 20.0);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FleetManifest {
    /// Product types available to refrigerated containers.
    #[serde(default)]
    pub products: Vec<ProductType>,
    /// The ships to build, each with its initial hold.
    pub ships: Vec<ShipManifest>,
}

/// One ship and the containers it starts out with.
#[derive(Debug, Clone, Deserialize)]
pub struct ShipManifest {
    /// Ship name.
    pub name: String,
    /// Maximum speed in knots.
    pub max_speed_knots: f64,
    /// Number of container slots.
    pub max_container_count: usize,
    /// Weight limit in metric tons.
    pub max_weight_tons: f64,
    /// Containers to construct and stow, in order.
    #[serde(default)]
    pub containers: Vec<ContainerManifest>,
}

/// One container: dimensional parameters, kind, and optional initial cargo.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerManifest {
    /// Tare mass, payload limit, and dimensions.
    #[serde(flatten)]
    pub spec: ContainerSpec,
    /// Which kind of container to build.
    #[serde(flatten)]
    pub cargo: CargoManifest,
    /// Cargo to load right after construction, through the normal loading
    /// policy of the container's kind.
    #[serde(default)]
    pub initial_load_kg: Option<f64>,
}

/// Kind tag plus the kind-specific parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CargoManifest {
    /// A liquid container.
    Liquid {
        /// Ordinary or hazardous.
        cargo: LiquidCargo,
    },
    /// A gas container.
    Gas {
        /// Nominal pressure in atmospheres.
        pressure_atm: f64,
    },
    /// A refrigerated container referencing a declared product by name.
    Refrigerated {
        /// Name of a product from the manifest's `products` list.
        product: String,
    },
}

/// Why a manifest could not be parsed or built.
///
/// A manifest is expected to describe a feasible fleet, so rejections that
/// are soft at runtime are hard errors here.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The JSON did not match the manifest schema.
    #[error("failed to parse fleet manifest: {0}")]
    Parse(#[from] serde_json::Error),
    /// A refrigerated container references an undeclared product.
    #[error("unknown product '{name}' referenced by a refrigerated container")]
    UnknownProduct {
        /// The missing product name.
        name: String,
    },
    /// A container's initial cargo was rejected by its loading policy.
    #[error("initial cargo for {serial} was not accepted: {source}")]
    InitialCargo {
        /// The container that refused its cargo.
        serial: SerialNumber,
        /// The underlying load failure.
        #[source]
        source: LoadError,
    },
    /// A ship could not take one of its manifest containers aboard.
    #[error("{ship} could not take {serial} aboard: {reason}")]
    Stowage {
        /// The ship that rejected the container.
        ship: String,
        /// The rejected container.
        serial: SerialNumber,
        /// The stowage limit it ran into.
        reason: StowageLimit,
    },
}

impl FleetManifest {
    /// Parses a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds the fleet, drawing serial numbers from the given generator.
    ///
    /// Containers are constructed, loaded with their initial cargo, and
    /// stowed through the same operations the rest of the crate uses, in
    /// manifest order.
    pub fn build(
        &self,
        serials: &mut SerialGenerator,
    ) -> Result<Vec<ContainerShip>, ManifestError> {
        let products: HashMap<&str, Arc<ProductType>> = self
            .products
            .iter()
            .map(|p| (p.name(), Arc::new(p.clone())))
            .collect();

        let mut ships = Vec::with_capacity(self.ships.len());
        for ship_manifest in &self.ships {
            let mut ship = ContainerShip::new(
                ship_manifest.name.clone(),
                ship_manifest.max_speed_knots,
                ship_manifest.max_container_count,
                ship_manifest.max_weight_tons,
            );
            for entry in &ship_manifest.containers {
                let mut container = match &entry.cargo {
                    CargoManifest::Liquid { cargo } => {
                        Container::liquid(entry.spec, *cargo, serials)
                    }
                    CargoManifest::Gas { pressure_atm } => {
                        Container::gas(entry.spec, *pressure_atm, serials)
                    }
                    CargoManifest::Refrigerated { product } => {
                        let product = products.get(product.as_str()).ok_or_else(|| {
                            ManifestError::UnknownProduct {
                                name: product.clone(),
                            }
                        })?;
                        Container::refrigerated(entry.spec, Arc::clone(product), serials)
                    }
                };
                if let Some(kg) = entry.initial_load_kg {
                    container.load(kg).map_err(|source| {
                        ManifestError::InitialCargo {
                            serial: container.serial().clone(),
                            source,
                        }
                    })?;
                }
                ship.load_container(container).map_err(|rejection| {
                    ManifestError::Stowage {
                        ship: ship_manifest.name.clone(),
                        serial: rejection.container.serial().clone(),
                        reason: rejection.reason,
                    }
                })?;
            }
            ships.push(ship);
        }
        Ok(ships)
    }
}
