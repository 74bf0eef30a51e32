//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use rust_decimal::Decimal;
use tracing::instrument;

use super::products::ProductView;
use crate::state::AppState;

/// Number of columns in the product grid.
pub const GRID_COLUMNS: usize = 4;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Products dealt round-robin into [`GRID_COLUMNS`] columns.
    pub columns: Vec<Vec<ProductView>>,
    /// Subtotal shown by the drawer before anything is added.
    pub empty_subtotal: String,
}

/// Display the product grid and the (empty, closed) cart drawer.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let currency = state.config().currency;
    let columns = state
        .catalog()
        .columns(GRID_COLUMNS)
        .into_iter()
        .map(|column| {
            column
                .into_iter()
                .map(|product| ProductView::new(product, currency))
                .collect()
        })
        .collect();

    HomeTemplate {
        columns,
        empty_subtotal: currency.format(Decimal::ZERO),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::routes::routes;
    use crate::routes::test_support::{body_text, state};

    #[tokio::test]
    async fn test_home_renders_grid_and_drawer_shell() {
        let response = routes()
            .with_state(state())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert_eq!(html.matches("class=\"col-6 col-md-3\"").count(), 4);
        assert_eq!(html.matches("data-product-id=").count(), 5);
        assert!(html.contains("id=\"cartDrawer\""));
        assert!(html.contains("id=\"close-cart-btn\""));
        assert!(html.contains("id=\"page-overlay\""));
        assert!(html.contains("<ul class=\"list-unstyled\" id=\"cart-items\"></ul>"));
        assert!(html.contains("id=\"cart-subtotal\">₹0.00<"));
        assert!(html.contains("js-cart-items-count\">0<"));
    }
}
