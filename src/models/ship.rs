//! Container ships as capacity-limited ordered holds.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

use crate::serial::SerialNumber;

use super::Container;

/// Kilograms per metric ton; ship weight limits are given in tons while
/// container weights are kept in kilograms.
pub const KG_PER_TON: f64 = 1000.0;

/// Which stowage limit a rejected container ran into.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StowageLimit {
    /// Every container slot is already in use.
    #[error("ship {ship} is full: all {max_count} slots in use")]
    SlotsFull {
        /// Ship that rejected the container.
        ship: String,
        /// The ship's slot limit.
        max_count: usize,
    },
    /// Taking the container aboard would exceed the weight limit.
    #[error("ship {ship} over weight: {total_kg} kg + {adding_kg} kg exceeds the {limit_kg} kg limit")]
    WeightExceeded {
        /// Ship that rejected the container.
        ship: String,
        /// Weight currently aboard, in kilograms.
        total_kg: f64,
        /// Weight of the rejected container, in kilograms.
        adding_kg: f64,
        /// The ship's weight limit in kilograms.
        limit_kg: f64,
    },
}

/// A container the ship would not take aboard, together with the reason.
///
/// The container rides back to the caller; the ship's hold is unchanged.
#[derive(Debug, PartialEq, Error)]
#[error("{reason}")]
pub struct StowageRejection {
    /// The container that was not loaded.
    pub container: Container,
    /// The limit it ran into.
    pub reason: StowageLimit,
}

/// The named container is not aboard this ship.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("container {serial} is not aboard {ship}")]
pub struct UnknownContainer {
    /// Ship that was searched.
    pub ship: String,
    /// Serial number that was not found.
    pub serial: SerialNumber,
}

/// A replacement aimed at a slot index outside the hold.
///
/// The incoming container rides back to the caller; the hold is unchanged.
#[derive(Debug, PartialEq, Error)]
#[error("ship {ship}: slot {index} is out of range ({count} containers aboard)")]
pub struct InvalidSlot {
    /// Ship whose hold was addressed.
    pub ship: String,
    /// The container that was to be swapped in.
    pub container: Container,
    /// The out-of-range index.
    pub index: usize,
    /// Number of containers aboard.
    pub count: usize,
}

/// Why a transfer between ships did not complete.
#[derive(Debug, PartialEq, Error)]
pub enum TransferError {
    /// The source ship does not hold the container.
    #[error(transparent)]
    NotAboard(#[from] UnknownContainer),
    /// The destination refused the container. By that point the source has
    /// already released it, so the container is aboard neither ship and is
    /// only reachable through the rejection carried here.
    #[error("transfer rejected: {0}")]
    Rejected(StowageRejection),
}

/// A ship with an ordered hold of containers and fixed stowage limits.
///
/// The hold preserves insertion order (load order). A load succeeds only
/// while both the slot count and the total-weight limit hold; every other
/// operation leaves the limits unchecked, as noted per method.
///
/// # Examples
///
/// ```
/// use u_stowage::models::{Container, ContainerShip, ContainerSpec};
/// use u_stowage::serial::SerialGenerator;
///
/// let mut serials = SerialGenerator::with_seed(7);
/// let mut ship = ContainerShip::new("Horizon", 25.0, 20, 30.0);
///
/// let gas = Container::gas(ContainerSpec::new(10.0, 30.0, 100.0, 100.0), 2.0, &mut serials);
/// ship.load_container(gas).expect("within limits");
///
/// assert_eq!(ship.container_count(), 1);
/// assert_eq!(ship.total_weight_kg(), 10.0);
/// assert_eq!(ship.max_weight_kg(), 30_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerShip {
    name: String,
    max_speed_knots: f64,
    max_container_count: usize,
    max_weight_tons: f64,
    containers: Vec<Container>,
}

impl ContainerShip {
    /// Creates an empty ship with the given speed and stowage limits.
    pub fn new(
        name: impl Into<String>,
        max_speed_knots: f64,
        max_container_count: usize,
        max_weight_tons: f64,
    ) -> Self {
        Self {
            name: name.into(),
            max_speed_knots,
            max_container_count,
            max_weight_tons,
            containers: Vec::new(),
        }
    }

    /// Takes a container aboard.
    ///
    /// Succeeds only while a slot is free and the total weight including
    /// the new container stays within the weight limit. On rejection the
    /// hold is unchanged and the container is handed back inside the error.
    pub fn load_container(&mut self, container: Container) -> Result<(), StowageRejection> {
        if self.containers.len() >= self.max_container_count {
            let reason = StowageLimit::SlotsFull {
                ship: self.name.clone(),
                max_count: self.max_container_count,
            };
            warn!("{reason}: turned away {}", container.serial());
            return Err(StowageRejection { container, reason });
        }

        let total_kg = self.total_weight_kg();
        let adding_kg = container.weight_kg();
        let limit_kg = self.max_weight_kg();
        if total_kg + adding_kg > limit_kg {
            let reason = StowageLimit::WeightExceeded {
                ship: self.name.clone(),
                total_kg,
                adding_kg,
                limit_kg,
            };
            warn!("{reason}: turned away {}", container.serial());
            return Err(StowageRejection { container, reason });
        }

        info!("loaded {} onto {}", container.serial(), self.name);
        self.containers.push(container);
        Ok(())
    }

    /// Takes each container aboard independently, in order.
    ///
    /// A rejection does not stop the rest of the batch; the rejected
    /// containers come back with their reasons.
    pub fn load_containers(&mut self, containers: Vec<Container>) -> Vec<StowageRejection> {
        let mut rejections = Vec::new();
        for container in containers {
            if let Err(rejection) = self.load_container(container) {
                rejections.push(rejection);
            }
        }
        rejections
    }

    /// Removes the first container with the given serial number from the
    /// hold and returns it.
    pub fn remove_container(
        &mut self,
        serial: &SerialNumber,
    ) -> Result<Container, UnknownContainer> {
        match self.position_of(serial) {
            Some(index) => {
                let container = self.containers.remove(index);
                info!("removed {} from {}", container.serial(), self.name);
                Ok(container)
            }
            None => {
                let err = UnknownContainer {
                    ship: self.name.clone(),
                    serial: serial.clone(),
                };
                warn!("{err}");
                Err(err)
            }
        }
    }

    /// Swaps the container in the given slot for a new one, returning the
    /// displaced container.
    ///
    /// The incoming container is NOT re-checked against the slot and weight
    /// limits; only [`load_container`](ContainerShip::load_container)
    /// enforces them. An out-of-range index leaves the hold unchanged and
    /// hands the incoming container back.
    pub fn replace_container(
        &mut self,
        index: usize,
        container: Container,
    ) -> Result<Container, InvalidSlot> {
        if index >= self.containers.len() {
            let err = InvalidSlot {
                ship: self.name.clone(),
                container,
                index,
                count: self.containers.len(),
            };
            warn!("{err}");
            return Err(err);
        }
        let old = std::mem::replace(&mut self.containers[index], container);
        info!(
            "replaced {} with {} in slot {} of {}",
            old.serial(),
            self.containers[index].serial(),
            index,
            self.name,
        );
        Ok(old)
    }

    /// Moves a container from this ship to another.
    ///
    /// The container leaves this ship before the destination's acceptance
    /// check and is not restored if the destination turns it away: after a
    /// rejected transfer the container is aboard neither ship and rides
    /// only inside [`TransferError::Rejected`].
    pub fn transfer_container(
        &mut self,
        serial: &SerialNumber,
        destination: &mut ContainerShip,
    ) -> Result<(), TransferError> {
        let container = self.remove_container(serial)?;
        match destination.load_container(container) {
            Ok(()) => {
                info!(
                    "transferred {} from {} to {}",
                    serial, self.name, destination.name
                );
                Ok(())
            }
            Err(rejection) => {
                warn!(
                    "{} refused {}; the container is no longer aboard {}",
                    destination.name, serial, self.name
                );
                Err(TransferError::Rejected(rejection))
            }
        }
    }

    /// Total weight of the hold in kilograms.
    pub fn total_weight_kg(&self) -> f64 {
        self.containers.iter().map(Container::weight_kg).sum()
    }

    /// Ship name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum speed in knots.
    pub fn max_speed_knots(&self) -> f64 {
        self.max_speed_knots
    }

    /// Number of container slots.
    pub fn max_container_count(&self) -> usize {
        self.max_container_count
    }

    /// Weight limit in metric tons.
    pub fn max_weight_tons(&self) -> f64 {
        self.max_weight_tons
    }

    /// Weight limit in kilograms.
    pub fn max_weight_kg(&self) -> f64 {
        self.max_weight_tons * KG_PER_TON
    }

    /// The hold, in load order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Number of containers aboard.
    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Returns `true` if the hold is empty.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Returns `true` if a container with the given serial is aboard.
    pub fn contains(&self, serial: &SerialNumber) -> bool {
        self.position_of(serial).is_some()
    }

    fn position_of(&self, serial: &SerialNumber) -> Option<usize> {
        self.containers.iter().position(|c| c.serial() == serial)
    }
}

impl fmt::Display for ContainerShip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: max speed {} knots, {} container slots, weight limit {} t ({} aboard, {} kg)",
            self.name,
            self.max_speed_knots,
            self.max_container_count,
            self.max_weight_tons,
            self.containers.len(),
            self.total_weight_kg(),
        )?;
        for container in &self.containers {
            writeln!(f, "  {container}")?;
        }
        Ok(())
    }
}
