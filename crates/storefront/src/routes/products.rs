//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use cart_drawer_core::{CurrencyCode, DEFAULT_COLOR, Product, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub image: String,
    /// Formatted unit price.
    pub price: String,
    /// One add-to-cart trigger is rendered per color.
    pub colors: Vec<String>,
    /// Color sent by the grid's single trigger.
    pub default_color: String,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, currency: CurrencyCode) -> Self {
        let colors = if product.colors.is_empty() {
            vec![DEFAULT_COLOR.to_string()]
        } else {
            product.colors.clone()
        };
        let default_color = colors
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());

        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            subcategory: product.subcategory.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            price: currency.format(product.price),
            colors,
            default_color,
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub empty_subtotal: String,
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let product = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let currency = state.config().currency;
    Ok(ProductShowTemplate {
        product: ProductView::new(product, currency),
        empty_subtotal: currency.format(rust_decimal::Decimal::ZERO),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::routes::routes;
    use crate::routes::test_support::{body_text, state};

    #[test]
    fn test_view_defaults_color() {
        let catalog = crate::catalog::Catalog::sample();
        let tote = catalog.get(ProductId::new(4)).unwrap();
        let view = ProductView::new(tote, CurrencyCode::INR);
        assert_eq!(view.colors, vec!["Default".to_string()]);
        assert_eq!(view.default_color, "Default");
        assert_eq!(view.price, "₹599.00");
    }

    #[tokio::test]
    async fn test_show_renders_trigger_per_color() {
        let response = routes()
            .with_state(state())
            .oneshot(Request::get("/products/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert_eq!(html.matches("btn-addtocart js-open-aside").count(), 2);
        assert!(html.contains("data-color=\"Red\""));
        assert!(html.contains("data-color=\"Blue\""));
        assert!(html.contains("id=\"cartDrawer\""));
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        for path in ["/products/999", "/products/shirt"] {
            let response = routes()
                .with_state(state())
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        }
    }
}
