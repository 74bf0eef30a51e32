//! In-memory product catalog.
//!
//! The catalog is loaded once at startup, either from a JSON file (an array
//! of [`Product`] records) or from the built-in sample products, and is
//! read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use cart_drawer_core::{Product, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not a JSON array of products.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// Products offered by the storefront, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products, index })
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or contains
    /// duplicate ids.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not an array of products or contains
    /// duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The built-in sample catalog.
    #[must_use]
    pub fn sample() -> Self {
        let products = vec![
            sample_product(1, "Shirt", "Men", "Tops", 2000, &["Red", "Blue"]),
            sample_product(2, "Denim Jacket", "Men", "Outerwear", 349_900, &["Indigo"]),
            sample_product(3, "Summer Dress", "Women", "Dresses", 189_950, &["Yellow", "White"]),
            sample_product(4, "Canvas Tote", "Accessories", "Bags", 59_900, &[]),
            sample_product(5, "Wool Scarf", "Accessories", "Winter", 79_900, &["Grey"]),
        ];
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();
        Self { products, index }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products dealt round-robin into `n` columns.
    #[must_use]
    pub fn columns(&self, n: usize) -> Vec<Vec<&Product>> {
        let n = n.max(1);
        let mut columns: Vec<Vec<&Product>> = (0..n).map(|_| Vec::new()).collect();
        for (position, product) in self.products.iter().enumerate() {
            if let Some(column) = columns.get_mut(position % n) {
                column.push(product);
            }
        }
        columns
    }
}

fn sample_product(
    id: i32,
    name: &str,
    category: &str,
    subcategory: &str,
    paise: i64,
    colors: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        price: Decimal::new(paise, 2),
        description: format!("{name} from our {} collection.", category.to_lowercase()),
        image: format!("/static/media/products/{id}.svg"),
        colors: colors.iter().map(|c| (*c).to_string()).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_lookup() {
        let catalog = Catalog::sample();
        let shirt = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(shirt.name, "Shirt");
        assert_eq!(shirt.price, Decimal::from(20));
        assert!(catalog.get(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_from_json() {
        let catalog = Catalog::from_json(
            r#"[{"id": 7, "name": "Cap", "price": "299.00", "image": "/media/cap.jpg"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.products().len(), 1);
        assert_eq!(catalog.get(ProductId::new(7)).unwrap().name, "Cap");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_json(
            r#"[{"id": 1, "name": "A", "price": "1.00", "image": "a"},
                {"id": 1, "name": "B", "price": "2.00", "image": "b"}]"#,
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == ProductId::new(1)));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            Catalog::from_json("{}"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_columns_round_robin() {
        let catalog = Catalog::sample();
        let columns = catalog.columns(4);
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].len(), 2);
        assert_eq!(columns[0][1].id, ProductId::new(5));
        assert_eq!(columns[3].len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let result = Catalog::from_path(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
