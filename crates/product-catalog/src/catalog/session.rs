use super::error::CatalogError;
use crate::model::{Product, ProductFields, ProductId};

/// Which product, if any, the form is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    /// No product selected; a submit creates a new one.
    #[default]
    Idle,
    /// A submit replaces this product.
    Editing(ProductId),
}

/// Raw form input. Price is kept as text until submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Drafts {
    pub name: String,
    pub price: String,
    pub description: String,
    pub category: String,
}

impl Drafts {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    /// Copies a stored product into form fields. The price uses the shortest text that
    /// parses back to the same `f64`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category: product.category.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks every field and parses the price.
    ///
    /// All four fields are required; whitespace-only counts as empty. The price must be a
    /// finite number no smaller than zero.
    pub fn parse(&self) -> Result<ProductFields, CatalogError> {
        let required = [
            ("name", &self.name),
            ("price", &self.price),
            ("description", &self.description),
            ("category", &self.category),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CatalogError::Validation(format!("{field} is required")));
        }

        let price: f64 = self.price.trim().parse().map_err(|_| {
            CatalogError::Validation(format!("price {:?} is not a number", self.price))
        })?;
        if !price.is_finite() || price < 0.0 {
            return Err(CatalogError::Validation(format!(
                "price must be a non-negative number, got {:?}",
                self.price
            )));
        }

        Ok(ProductFields::new(
            self.name.clone(),
            price,
            self.description.clone(),
            self.category.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_valid_drafts() {
        let fields = Drafts::new("Pen", " 1.50 ", "Blue ink", "Stationery")
            .parse()
            .unwrap();
        assert_eq!(fields, ProductFields::new("Pen", 1.5, "Blue ink", "Stationery"));
    }

    #[test]
    fn test_parse_rejects_blank_fields() {
        let cases = [
            Drafts::new("", "1", "d", "c"),
            Drafts::new("n", "1", "   ", "c"),
            Drafts::new("n", "1", "d", "\t"),
            Drafts::new("n", "", "d", "c"),
        ];
        for drafts in cases {
            assert!(
                matches!(drafts.parse(), Err(CatalogError::Validation(_))),
                "{drafts:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_prices() {
        for price in ["abc", "-1", "NaN", "inf", "1,50"] {
            let drafts = Drafts::new("Pen", price, "Blue ink", "Stationery");
            assert!(
                matches!(drafts.parse(), Err(CatalogError::Validation(_))),
                "price {price:?} should be rejected"
            );
        }
        assert!(Drafts::new("Pen", "0", "Blue ink", "Stationery").parse().is_ok());
    }

    #[test]
    fn test_from_product_round_trips_price() {
        let product = Product::new(
            ProductId(1),
            ProductFields::new("Pen", 0.1 + 0.2, "Blue ink", "Stationery"),
        );
        let drafts = Drafts::from_product(&product);
        assert_eq!(drafts.parse().unwrap().price, product.price);
    }
}
