//! Cart route handlers.
//!
//! The drawer posts `product_id=<id>` to the add-to-cart endpoint and builds
//! its line item from the JSON reply. Each successful add is also counted in
//! the visitor's [`SessionCart`], which the cart page lists and edits with a
//! plain HTML form.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form, Json,
    extract::{State, rejection::FormRejection},
};
use cart_drawer_core::{AddToCartReply, Product, ProductId, SessionCart};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, info, instrument};

use crate::csrf::CsrfToken;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::session::SESSION_CART_KEY;
use crate::state::AppState;

/// Error sent when the id does not name a catalog product.
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Error sent for any method other than POST.
pub const INVALID_REQUEST_METHOD: &str = "Invalid request method";

/// Cart page form field naming the product to drop.
pub const REMOVE_FIELD: &str = "remove";

/// Cart page form field present when quantities are submitted.
pub const UPDATE_FIELD: &str = "update_cart";

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: Option<String>,
}

/// One product row on the cart page.
#[derive(Debug, Clone)]
pub struct CartRowView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub subtotal: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub rows: Vec<CartRowView>,
    pub total: String,
    /// Echoed in the form so the CSRF check passes without JavaScript.
    pub csrf_token: String,
    pub empty_subtotal: String,
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn load_cart(session: &Session) -> Result<SessionCart> {
    Ok(session
        .get::<SessionCart>(SESSION_CART_KEY)
        .await?
        .unwrap_or_default())
}

async fn save_cart(session: &Session, cart: &SessionCart) -> Result<()> {
    session.insert(SESSION_CART_KEY, cart).await?;
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Confirm a product, count it in the session cart and describe it for the
/// drawer.
///
/// A missing, unparsable or unknown id is answered with
/// `{"success": false, "error": "Product not found"}` and status 200, and
/// leaves the session untouched.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cart cannot be loaded or saved.
#[instrument(skip(state, session, form))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    form: std::result::Result<Form<AddToCartForm>, FormRejection>,
) -> Result<Json<AddToCartReply>> {
    let product_id = match form {
        Ok(Form(form)) => form.product_id,
        Err(rejection) => {
            debug!(%rejection, "unreadable add-to-cart form");
            None
        }
    };

    let Some(product) = lookup(&state, product_id.as_deref()) else {
        debug!(product_id = ?product_id, "add to cart for unknown product");
        return Ok(Json(AddToCartReply::rejected(PRODUCT_NOT_FOUND)));
    };

    let mut cart = load_cart(&session).await?;
    let quantity = cart.add_one(product.id);
    save_cart(&session, &cart).await?;

    let id = product.id.to_string();
    add_breadcrumb("cart", "Added to cart", &[("product_id", id.as_str())]);
    info!(product_id = %product.id, name = %product.name, quantity, "product added to cart");

    Ok(Json(AddToCartReply::added(product)))
}

/// Any non-POST request to the endpoint.
pub async fn invalid_method() -> Json<AddToCartReply> {
    Json(AddToCartReply::rejected(INVALID_REQUEST_METHOD))
}

/// Display the session cart.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cart cannot be loaded.
#[instrument(skip(state, session, token))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Extension(token): Extension<CsrfToken>,
) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    Ok(cart_page(&state, &cart, token))
}

/// Apply the cart page form, then display the result.
///
/// A `remove=<id>` field drops that product. Otherwise, if `update_cart` is
/// present, every `qty_<id>` field for a product in the cart overwrites its
/// quantity; values that are not positive whole numbers drop the product.
///
/// # Errors
///
/// Returns `AppError::Session` if the session cart cannot be loaded or saved.
#[instrument(skip(state, session, token, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Extension(token): Extension<CsrfToken>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<CartShowTemplate> {
    let mut cart = load_cart(&session).await?;

    if let Some(remove) = form.get(REMOVE_FIELD) {
        if let Ok(id) = remove.parse::<ProductId>()
            && cart.remove(id)
        {
            let id = id.to_string();
            add_breadcrumb("cart", "Removed from cart", &[("product_id", id.as_str())]);
            info!(product_id = %id, "product removed from cart");
        }
    } else if form.contains_key(UPDATE_FIELD) {
        let ids: Vec<ProductId> = cart.lines().map(|(id, _)| id).collect();
        for id in ids {
            if let Some(value) = form.get(&format!("qty_{id}")) {
                let quantity = cart.set_quantity(id, value);
                debug!(product_id = %id, quantity, "cart quantity set");
            }
        }
        add_breadcrumb("cart", "Updated cart", &[]);
    }

    save_cart(&session, &cart).await?;
    Ok(cart_page(&state, &cart, token))
}

// =============================================================================
// Helpers
// =============================================================================

fn lookup<'a>(state: &'a AppState, product_id: Option<&str>) -> Option<&'a Product> {
    let id = product_id?.parse::<ProductId>().ok()?;
    state.catalog().get(id)
}

/// Rows for products the catalog still knows, and their total.
fn cart_page(state: &AppState, cart: &SessionCart, token: CsrfToken) -> CartShowTemplate {
    let currency = state.config().currency;
    let catalog = state.catalog();

    let rows = cart
        .lines()
        .filter_map(|(id, quantity)| {
            let product = catalog.get(id)?;
            let subtotal = product
                .price
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX);
            Some(CartRowView {
                id,
                name: product.name.clone(),
                image: product.image.clone(),
                price: currency.format(product.price),
                quantity,
                subtotal: currency.format(subtotal),
            })
        })
        .collect();
    let total = cart.total(|id| catalog.get(id).map(|product| product.price));

    CartShowTemplate {
        rows,
        total: currency.format(total),
        csrf_token: token.0,
        empty_subtotal: currency.format(Decimal::ZERO),
    }
}
