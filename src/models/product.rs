//! Product type for refrigerated cargo.

use serde::{Deserialize, Serialize};

/// A kind of refrigerated cargo and the temperature it must be kept at.
///
/// Product types are created once and shared (via [`std::sync::Arc`]) among
/// every refrigerated container carrying the same cargo; they are never
/// mutated after construction.
///
/// # Examples
///
/// ```
/// use u_stowage::models::ProductType;
///
/// let bananas = ProductType::new("Bananas", 13.3);
/// assert_eq!(bananas.name(), "Bananas");
/// assert_eq!(bananas.required_temp_c(), 13.3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    name: String,
    required_temp_c: f64,
}

impl ProductType {
    /// Creates a product type with the given name and required temperature.
    pub fn new(name: impl Into<String>, required_temp_c: f64) -> Self {
        Self {
            name: name.into(),
            required_temp_c,
        }
    }

    /// Product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Temperature (°C) the cargo must be transported at.
    pub fn required_temp_c(&self) -> f64 {
        self.required_temp_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_new() {
        let p = ProductType::new("Fish", 2.0);
        assert_eq!(p.name(), "Fish");
        assert_eq!(p.required_temp_c(), 2.0);
    }

    #[test]
    fn test_product_type_shared() {
        use std::sync::Arc;

        let p = Arc::new(ProductType::new("Ice cream", -18.0));
        let a = Arc::clone(&p);
        let b = Arc::clone(&p);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.required_temp_c(), -18.0);
    }

    #[test]
    fn test_product_type_json_round_trip() {
        let p = ProductType::new("Cheese", 6.5);
        let json = serde_json::to_string(&p).expect("serialize");
        let back: ProductType = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, p);
    }
}
