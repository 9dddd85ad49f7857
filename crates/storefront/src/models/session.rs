//! Session-bound cart storage.
//!
//! Binds exactly one [`Cart`] to the visitor's session. The cart type itself
//! knows nothing about persistence; this wrapper adds load/save around the
//! same operations (composition, not inheritance). Every mutation made
//! through a loaded cart is written back before the request completes, so a
//! change made in one request is visible to the very next request from the
//! same session even when session storage is external.

use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use trailhead_core::Cart;

/// Session keys for storefront data.
pub mod session_keys {
    /// Key the serialized cart is stored under.
    pub const CART: &str = "cart";
}

/// The visitor's cart, scoped to their session.
///
/// Session identity and lifecycle (creation, expiry, cookie issuance) belong
/// to the session layer; this type only serializes a cart blob under a fixed
/// key.
pub struct CartSession {
    session: Session,
}

impl CartSession {
    /// Wrap the request's session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Load the session's cart, creating an empty one if none exists yet.
    ///
    /// Never returns an absent cart: a fresh session simply gets a new
    /// empty `Cart`.
    ///
    /// # Errors
    ///
    /// Returns a session error if the backing store cannot be read.
    pub async fn load(&self) -> Result<Cart, SessionError> {
        Ok(self
            .session
            .get::<Cart>(session_keys::CART)
            .await?
            .unwrap_or_default())
    }

    /// Write the cart back into the session (write-through).
    ///
    /// # Errors
    ///
    /// Returns a session error if the backing store cannot be written.
    pub async fn save(&self, cart: &Cart) -> Result<(), SessionError> {
        self.session.insert(session_keys::CART, cart).await
    }

    /// Drop the cart from the session entirely.
    ///
    /// The next [`load`](Self::load) starts over with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a session error if the backing store cannot be written.
    pub async fn remove(&self) -> Result<(), SessionError> {
        self.session.remove::<Cart>(session_keys::CART).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use trailhead_core::{Product, ProductId};

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::new(1500, 2),
            category: "Running".to_owned(),
        }
    }

    #[tokio::test]
    async fn load_creates_an_empty_cart_for_a_fresh_session() {
        let carts = CartSession::new(session());
        let cart = carts.load().await.expect("load");
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn saved_mutations_are_visible_on_the_next_load() {
        let carts = CartSession::new(session());

        let mut cart = carts.load().await.expect("load");
        cart.add_item(product(1), 2);
        carts.save(&cart).await.expect("save");

        let reloaded = carts.load().await.expect("reload");
        assert_eq!(reloaded, cart);
        assert_eq!(reloaded.compute_total(), Decimal::new(3000, 2));
    }

    #[tokio::test]
    async fn remove_resets_to_an_empty_cart() {
        let carts = CartSession::new(session());

        let mut cart = carts.load().await.expect("load");
        cart.add_item(product(1), 1);
        carts.save(&cart).await.expect("save");

        carts.remove().await.expect("remove");
        assert!(carts.load().await.expect("reload").is_empty());
    }
}
