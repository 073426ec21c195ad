//! Property tests for the loading, emptying, and stowage arithmetic.

use std::sync::Arc;

use proptest::prelude::*;

use u_stowage::models::{
    Container, ContainerShip, ContainerSpec, LiquidCargo, LoadError, ProductType,
    GAS_RESIDUE_FRACTION,
};
use u_stowage::serial::SerialGenerator;

fn spec(tare_kg: f64, max_payload_kg: f64) -> ContainerSpec {
    ContainerSpec::new(tare_kg, max_payload_kg, 250.0, 600.0)
}

proptest! {
    #[test]
    fn base_load_adds_exactly_or_leaves_mass_alone(
        amount in 0.0f64..500.0,
        payload in 1.0f64..1000.0,
    ) {
        let mut serials = SerialGenerator::with_seed(1);
        let product = Arc::new(ProductType::new("Fish", 2.0));
        let mut c = Container::refrigerated(spec(50.0, payload), product, &mut serials);

        match c.load(amount) {
            Ok(()) => {
                prop_assert!(amount < payload);
                prop_assert_eq!(c.mass_kg(), amount);
            }
            Err(LoadError::Overfill { .. }) => {
                prop_assert!(amount >= payload);
                prop_assert_eq!(c.mass_kg(), 0.0);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
        prop_assert_eq!(c.weight_kg(), c.mass_kg() + 50.0);
    }

    #[test]
    fn liquid_gains_mass_only_at_or_below_its_ceiling(
        amount in 0.0f64..1000.0,
        payload in 1.0f64..500.0,
        hazardous in any::<bool>(),
    ) {
        let cargo = if hazardous {
            LiquidCargo::Hazardous
        } else {
            LiquidCargo::Ordinary
        };
        let ceiling = payload * cargo.fill_factor();
        let mut serials = SerialGenerator::with_seed(1);
        let mut c = Container::liquid(spec(50.0, payload), cargo, &mut serials);

        match c.load(amount) {
            Ok(()) => {
                prop_assert!(amount <= ceiling);
                prop_assert!(amount < payload);
                prop_assert_eq!(c.mass_kg(), amount);
            }
            Err(LoadError::HazardRejected(notice)) => {
                prop_assert!(amount > ceiling);
                prop_assert_eq!(notice.ceiling_kg, ceiling);
                prop_assert_eq!(c.mass_kg(), 0.0);
            }
            Err(LoadError::Overfill { .. }) => {
                prop_assert!(amount <= ceiling);
                prop_assert!(amount >= payload);
                prop_assert_eq!(c.mass_kg(), 0.0);
            }
        }
    }

    #[test]
    fn gas_gains_mass_iff_strictly_below_payload(
        first in 0.0f64..100.0,
        second in 0.0f64..100.0,
        payload in 1.0f64..150.0,
    ) {
        let mut serials = SerialGenerator::with_seed(1);
        let mut c = Container::gas(spec(10.0, payload), 2.0, &mut serials);

        for amount in [first, second] {
            let before = c.mass_kg();
            match c.load(amount) {
                Ok(()) => {
                    prop_assert!(before + amount < payload);
                    prop_assert_eq!(c.mass_kg(), before + amount);
                }
                Err(LoadError::HazardRejected(_)) => {
                    prop_assert!(before + amount >= payload);
                    prop_assert_eq!(c.mass_kg(), before);
                }
                Err(other) => prop_assert!(false, "gas never hard-fails: {other:?}"),
            }
        }
    }

    #[test]
    fn gas_empty_keeps_exactly_the_residue_fraction(amount in 0.0f64..99.0) {
        let mut serials = SerialGenerator::with_seed(1);
        let mut c = Container::gas(spec(10.0, 100.0), 2.0, &mut serials);
        c.load(amount).expect("strictly below payload");

        c.empty();
        prop_assert_eq!(c.mass_kg(), amount * GAS_RESIDUE_FRACTION);
        if amount > 0.0 {
            prop_assert!(c.mass_kg() > 0.0);
        }
    }

    #[test]
    fn empty_zeroes_every_non_gas_container(amount in 0.0f64..80.0) {
        let mut serials = SerialGenerator::with_seed(1);
        let mut liquid = Container::liquid(spec(50.0, 100.0), LiquidCargo::Ordinary, &mut serials);
        let product = Arc::new(ProductType::new("Fish", 2.0));
        let mut reefer = Container::refrigerated(spec(50.0, 100.0), product, &mut serials);

        liquid.load(amount).expect("within ceiling and payload");
        reefer.load(amount).expect("below payload");
        liquid.empty();
        reefer.empty();
        prop_assert_eq!(liquid.mass_kg(), 0.0);
        prop_assert_eq!(reefer.mass_kg(), 0.0);
    }

    #[test]
    fn ship_admits_a_container_iff_both_limits_hold(
        tares in prop::collection::vec(1.0f64..50.0, 1..20),
        max_count in 1usize..10,
        limit_tons in 0.01f64..0.5,
    ) {
        let mut serials = SerialGenerator::with_seed(1);
        let mut ship = ContainerShip::new("Prop", 10.0, max_count, limit_tons);

        for tare in tares {
            let before_count = ship.container_count();
            let before_weight = ship.total_weight_kg();
            let c = Container::gas(spec(tare, 100.0), 1.0, &mut serials);

            match ship.load_container(c) {
                Ok(()) => {
                    prop_assert!(before_count < max_count);
                    prop_assert!(before_weight + tare <= ship.max_weight_kg());
                    prop_assert_eq!(ship.container_count(), before_count + 1);
                }
                Err(_) => {
                    prop_assert!(
                        before_count >= max_count
                            || before_weight + tare > ship.max_weight_kg()
                    );
                    prop_assert_eq!(ship.container_count(), before_count);
                    prop_assert_eq!(ship.total_weight_kg(), before_weight);
                }
            }
        }
    }

    #[test]
    fn refrigerated_temperature_moves_iff_not_above_required(
        required in -30.0f64..30.0,
        requested in -60.0f64..60.0,
    ) {
        let mut serials = SerialGenerator::with_seed(1);
        let product = Arc::new(ProductType::new("Prop cargo", required));
        let mut c = Container::refrigerated(spec(50.0, 100.0), product, &mut serials);

        let outcome = c.set_temperature(requested);
        let current = match c.kind() {
            u_stowage::models::CargoKind::Refrigerated { current_temp_c, .. } => *current_temp_c,
            other => panic!("expected refrigerated kind, got {other:?}"),
        };
        if requested <= required {
            prop_assert!(outcome.is_ok());
            prop_assert_eq!(current, requested);
        } else {
            prop_assert!(outcome.is_err());
            prop_assert_eq!(current, required);
        }
    }
}
