//! Cargo containers and their per-kind loading policies.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::serial::{SerialGenerator, SerialNumber};

use super::ProductType;

/// Fraction of its current mass a gas container retains after emptying.
pub const GAS_RESIDUE_FRACTION: f64 = 0.05;

/// Dimensional and capacity parameters shared by every container kind.
///
/// Height and depth are informational; they take no part in any loading
/// check. The payload limit is assumed to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Empty (tare) mass in kilograms.
    pub tare_kg: f64,
    /// Maximum cargo payload in kilograms.
    pub max_payload_kg: f64,
    /// Height in centimeters.
    pub height_cm: f64,
    /// Depth in centimeters.
    pub depth_cm: f64,
}

impl ContainerSpec {
    /// Creates a spec from tare mass, payload limit, and dimensions.
    pub fn new(tare_kg: f64, max_payload_kg: f64, height_cm: f64, depth_cm: f64) -> Self {
        Self {
            tare_kg,
            max_payload_kg,
            height_cm,
            depth_cm,
        }
    }
}

/// Classification of liquid cargo.
///
/// Hazardous liquids may only fill half the payload limit; ordinary liquids
/// may fill 90% of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidCargo {
    /// Non-hazardous liquid, fill factor 0.9.
    Ordinary,
    /// Hazardous liquid, fill factor 0.5.
    Hazardous,
}

impl LiquidCargo {
    /// Fraction of the payload limit this cargo may occupy.
    pub fn fill_factor(self) -> f64 {
        match self {
            LiquidCargo::Ordinary => 0.9,
            LiquidCargo::Hazardous => 0.5,
        }
    }
}

impl fmt::Display for LiquidCargo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiquidCargo::Ordinary => write!(f, "ordinary"),
            LiquidCargo::Hazardous => write!(f, "hazardous"),
        }
    }
}

/// The closed set of container classes, as used in serial numbers and
/// summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerClass {
    /// Liquid cargo container.
    Liquid,
    /// Pressurized gas container.
    Gas,
    /// Temperature-controlled container.
    Refrigerated,
}

impl ContainerClass {
    /// Class name as it appears in serial numbers.
    pub fn name(self) -> &'static str {
        match self {
            ContainerClass::Liquid => "Liquid",
            ContainerClass::Gas => "Gas",
            ContainerClass::Refrigerated => "Refrigerated",
        }
    }
}

impl fmt::Display for ContainerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind-specific state of a container.
#[derive(Debug, Clone, PartialEq)]
pub enum CargoKind {
    /// Liquid cargo with a fill-factor ceiling below the payload limit.
    Liquid {
        /// Ordinary or hazardous.
        cargo: LiquidCargo,
    },
    /// Pressurized gas. Pressure is informational only.
    Gas {
        /// Nominal pressure in atmospheres.
        pressure_atm: f64,
    },
    /// Refrigerated cargo tied to a product type.
    Refrigerated {
        /// The product being transported.
        product: Arc<ProductType>,
        /// Current temperature (°C); never above the product's requirement.
        current_temp_c: f64,
    },
}

impl CargoKind {
    /// The class tag for this kind.
    pub fn class(&self) -> ContainerClass {
        match self {
            CargoKind::Liquid { .. } => ContainerClass::Liquid,
            CargoKind::Gas { .. } => ContainerClass::Gas,
            CargoKind::Refrigerated { .. } => ContainerClass::Refrigerated,
        }
    }
}

/// An out-of-band hazard notification identifying a container whose load
/// was rejected by its kind-specific ceiling.
///
/// Only liquid and gas containers can produce one; refrigerated containers
/// fail hard through [`LoadError::Overfill`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardNotice {
    /// Serial number of the rejecting container.
    pub serial: SerialNumber,
    /// Class of the rejecting container.
    pub class: ContainerClass,
    /// Load that was attempted, in kilograms.
    pub attempted_kg: f64,
    /// Ceiling the attempt exceeded, in kilograms.
    pub ceiling_kg: f64,
}

impl fmt::Display for HazardNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hazard notification for {}: load of {} kg rejected (ceiling {} kg)",
            self.serial, self.attempted_kg, self.ceiling_kg
        )
    }
}

/// Why a load was not applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The strict payload check failed. Mass is unchanged.
    #[error("container {serial} overfilled: {mass_kg} kg + {attempted_kg} kg reaches the {max_payload_kg} kg payload limit")]
    Overfill {
        /// Serial number of the container.
        serial: SerialNumber,
        /// Cargo mass before the attempt, in kilograms.
        mass_kg: f64,
        /// Load that was attempted, in kilograms.
        attempted_kg: f64,
        /// Payload limit in kilograms.
        max_payload_kg: f64,
    },
    /// A liquid or gas container rejected the load at its own ceiling.
    /// Mass is unchanged and a hazard notification has been emitted.
    #[error("{0}")]
    HazardRejected(HazardNotice),
}

/// Why a temperature change was not applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemperatureError {
    /// The requested temperature is above what the product tolerates.
    #[error("container {serial}: {requested_c} °C is above the {required_c} °C required for {product}")]
    AboveRequired {
        /// Serial number of the container.
        serial: SerialNumber,
        /// Product being transported.
        product: String,
        /// Temperature that was requested (°C).
        requested_c: f64,
        /// Temperature the product requires (°C).
        required_c: f64,
    },
    /// The container has no temperature control.
    #[error("container {serial} is not refrigerated")]
    NotRefrigerated {
        /// Serial number of the container.
        serial: SerialNumber,
    },
}

/// A cargo container of one of the three kinds.
///
/// Containers are constructed through the kind-specific constructors, each
/// of which draws a unique serial number from a [`SerialGenerator`]. Cargo
/// mass changes only through [`load`](Container::load) and
/// [`empty`](Container::empty); refrigerated containers additionally expose
/// [`set_temperature`](Container::set_temperature).
///
/// # Examples
///
/// ```
/// use u_stowage::models::{Container, ContainerSpec, LiquidCargo};
/// use u_stowage::serial::SerialGenerator;
///
/// let mut serials = SerialGenerator::with_seed(7);
/// let spec = ContainerSpec::new(100.0, 200.0, 250.0, 600.0);
/// let mut c = Container::liquid(spec, LiquidCargo::Hazardous, &mut serials);
///
/// assert!(c.serial().as_str().starts_with("KON-Liquid-"));
/// assert!(c.load(20.0).is_ok());
/// assert_eq!(c.mass_kg(), 20.0);
/// assert_eq!(c.weight_kg(), 120.0);
///
/// // 110 kg exceeds the hazardous ceiling of 0.5 * 200 kg.
/// assert!(c.load(110.0).is_err());
/// assert_eq!(c.mass_kg(), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    serial: SerialNumber,
    mass_kg: f64,
    spec: ContainerSpec,
    kind: CargoKind,
}

impl Container {
    fn new(spec: ContainerSpec, kind: CargoKind, serials: &mut SerialGenerator) -> Self {
        Self {
            serial: serials.issue(kind.class()),
            mass_kg: 0.0,
            spec,
            kind,
        }
    }

    /// Creates an empty liquid container.
    pub fn liquid(spec: ContainerSpec, cargo: LiquidCargo, serials: &mut SerialGenerator) -> Self {
        Self::new(spec, CargoKind::Liquid { cargo }, serials)
    }

    /// Creates an empty gas container at the given nominal pressure.
    pub fn gas(spec: ContainerSpec, pressure_atm: f64, serials: &mut SerialGenerator) -> Self {
        Self::new(spec, CargoKind::Gas { pressure_atm }, serials)
    }

    /// Creates an empty refrigerated container, pre-cooled to the product's
    /// required temperature.
    pub fn refrigerated(
        spec: ContainerSpec,
        product: Arc<ProductType>,
        serials: &mut SerialGenerator,
    ) -> Self {
        let current_temp_c = product.required_temp_c();
        Self::new(
            spec,
            CargoKind::Refrigerated {
                product,
                current_temp_c,
            },
            serials,
        )
    }

    /// Loads cargo into this container according to its kind's policy.
    ///
    /// The strict base policy admits a load only while `mass + amount`
    /// stays below the payload limit and fails hard otherwise. Liquid
    /// containers first check the amount against their fill-factor ceiling
    /// and soft-reject above it with a hazard notification; below it they
    /// fall through to the base policy, which can still fail hard. Gas
    /// containers never fail hard: at the payload limit they soft-reject
    /// with a hazard notification instead.
    ///
    /// On any error the cargo mass is unchanged.
    pub fn load(&mut self, amount_kg: f64) -> Result<(), LoadError> {
        match &self.kind {
            CargoKind::Liquid { cargo } => {
                let ceiling_kg = self.spec.max_payload_kg * cargo.fill_factor();
                if amount_kg > ceiling_kg {
                    return Err(self.hazard_rejected(amount_kg, ceiling_kg));
                }
                self.stow(amount_kg)
            }
            CargoKind::Gas { .. } => {
                if self.mass_kg + amount_kg < self.spec.max_payload_kg {
                    self.mass_kg += amount_kg;
                    Ok(())
                } else {
                    Err(self.hazard_rejected(amount_kg, self.spec.max_payload_kg))
                }
            }
            CargoKind::Refrigerated { .. } => self.stow(amount_kg),
        }
    }

    /// Strict base loading policy: `mass + amount` must stay below the
    /// payload limit.
    fn stow(&mut self, amount_kg: f64) -> Result<(), LoadError> {
        if self.mass_kg + amount_kg < self.spec.max_payload_kg {
            self.mass_kg += amount_kg;
            Ok(())
        } else {
            Err(LoadError::Overfill {
                serial: self.serial.clone(),
                mass_kg: self.mass_kg,
                attempted_kg: amount_kg,
                max_payload_kg: self.spec.max_payload_kg,
            })
        }
    }

    fn hazard_rejected(&self, attempted_kg: f64, ceiling_kg: f64) -> LoadError {
        let notice = HazardNotice {
            serial: self.serial.clone(),
            class: self.kind.class(),
            attempted_kg,
            ceiling_kg,
        };
        warn!("{notice}");
        LoadError::HazardRejected(notice)
    }

    /// Empties this container.
    ///
    /// Gas containers keep a residue of 5% of the current mass; every other
    /// kind drops to exactly zero. Repeatedly emptying a gas container
    /// approaches but never reaches zero.
    pub fn empty(&mut self) {
        match self.kind {
            CargoKind::Gas { .. } => self.mass_kg *= GAS_RESIDUE_FRACTION,
            _ => self.mass_kg = 0.0,
        }
    }

    /// Changes the temperature of a refrigerated container.
    ///
    /// Rejects temperatures above the product's requirement; there is no
    /// lower bound. On a container without temperature control this returns
    /// [`TemperatureError::NotRefrigerated`].
    pub fn set_temperature(&mut self, temp_c: f64) -> Result<(), TemperatureError> {
        match &mut self.kind {
            CargoKind::Refrigerated {
                product,
                current_temp_c,
            } => {
                if temp_c > product.required_temp_c() {
                    let err = TemperatureError::AboveRequired {
                        serial: self.serial.clone(),
                        product: product.name().to_string(),
                        requested_c: temp_c,
                        required_c: product.required_temp_c(),
                    };
                    warn!("{err}");
                    return Err(err);
                }
                *current_temp_c = temp_c;
                info!("container {} set to {} °C", self.serial, temp_c);
                Ok(())
            }
            _ => Err(TemperatureError::NotRefrigerated {
                serial: self.serial.clone(),
            }),
        }
    }

    /// Serial number, unique among all containers from one generator.
    pub fn serial(&self) -> &SerialNumber {
        &self.serial
    }

    /// Current cargo mass in kilograms.
    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    /// Tare (empty) mass in kilograms.
    pub fn tare_kg(&self) -> f64 {
        self.spec.tare_kg
    }

    /// Payload limit in kilograms.
    pub fn max_payload_kg(&self) -> f64 {
        self.spec.max_payload_kg
    }

    /// Height in centimeters.
    pub fn height_cm(&self) -> f64 {
        self.spec.height_cm
    }

    /// Depth in centimeters.
    pub fn depth_cm(&self) -> f64 {
        self.spec.depth_cm
    }

    /// Kind-specific state.
    pub fn kind(&self) -> &CargoKind {
        &self.kind
    }

    /// Class tag of this container.
    pub fn class(&self) -> ContainerClass {
        self.kind.class()
    }

    /// Total weight in kilograms: cargo mass plus tare mass.
    pub fn weight_kg(&self) -> f64 {
        self.mass_kg + self.spec.tare_kg
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: mass {} kg, tare {} kg, payload limit {} kg, {} cm high, {} cm deep",
            self.serial,
            self.mass_kg,
            self.spec.tare_kg,
            self.spec.max_payload_kg,
            self.spec.height_cm,
            self.spec.depth_cm,
        )?;
        match &self.kind {
            CargoKind::Liquid { cargo } => write!(f, ", {cargo} liquid"),
            CargoKind::Gas { pressure_atm } => write!(f, ", gas at {pressure_atm} atm"),
            CargoKind::Refrigerated {
                product,
                current_temp_c,
            } => write!(
                f,
                ", {} at {} °C (requires {} °C)",
                product.name(),
                current_temp_c,
                product.required_temp_c(),
            ),
        }
    }
}
