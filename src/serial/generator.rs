//! Serial numbers and the generator that issues them.

use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::ContainerClass;

/// Upper bound (exclusive) for the random numeric suffix of a serial.
const SUFFIX_RANGE: u64 = 100_000_000;

/// A container serial number of the form `KON-<class>-<n>`.
///
/// The numeric suffix is unique among every serial issued by the same
/// [`SerialGenerator`], so the serial identifies a container for the
/// lifetime of the generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialNumber(String);

impl SerialNumber {
    /// The serial as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues unique serial numbers for containers.
///
/// The generator owns the set of numeric suffixes it has handed out and
/// redraws on collision, so no two serials from one generator share a
/// suffix, regardless of container class. It replaces shared global
/// registry state with a value the caller owns and injects; the `&mut self`
/// API makes it single-threaded by construction — wrap it in a `Mutex` to
/// share it across threads.
///
/// # Examples
///
/// ```
/// use u_stowage::models::ContainerClass;
/// use u_stowage::serial::SerialGenerator;
///
/// let mut serials = SerialGenerator::with_seed(7);
/// let a = serials.issue(ContainerClass::Gas);
/// let b = serials.issue(ContainerClass::Gas);
/// assert!(a.as_str().starts_with("KON-Gas-"));
/// assert_ne!(a, b);
/// ```
#[derive(Debug)]
pub struct SerialGenerator {
    rng: StdRng,
    issued: HashSet<u64>,
}

impl SerialGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            issued: HashSet::new(),
        }
    }

    /// Creates a generator with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    /// Issues a serial number for a container of the given class.
    ///
    /// Draws random suffixes until an unissued one comes up; the suffix is
    /// then reserved for the lifetime of this generator.
    pub fn issue(&mut self, class: ContainerClass) -> SerialNumber {
        loop {
            let suffix = self.rng.random_range(0..SUFFIX_RANGE);
            if self.issued.insert(suffix) {
                return SerialNumber(format!("KON-{}-{}", class.name(), suffix));
            }
        }
    }

    /// Number of serials issued so far.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}

impl Default for SerialGenerator {
    fn default() -> Self {
        Self::new()
    }
}
