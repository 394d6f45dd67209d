//! Application state.
//!
//! [`Storefront`] is the whole app: the credential store, the view router,
//! and - while signed in - a [`MainPage`] holding the catalog, cart,
//! wishlist and orders. The main page is created fresh each time the
//! session starts and thrown away on sign-out, so nothing but accounts and
//! the session flag outlives a session.

use rand::SeedableRng;
use rand::rngs::StdRng;
use secrecy::SecretString;
use tracing::{info, instrument};

use quickcart_core::{OrderId, OrderStatus, Price, ProductId, Username};

use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogClient, CatalogError, Product};
use crate::error::{Result, StorefrontError};
use crate::orders::{Cancellation, Order, OrderTracker};
use crate::prompt::{Confirm, Toast, Toasts};
use crate::router::{AuthForm, Resolution, View, ViewRouter};
use crate::services::auth::CredentialStore;
use crate::storage::KeyValueStore;
use crate::wishlist::Wishlist;

/// Toast shown after a successful order.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

/// The storefront application.
#[derive(Debug)]
pub struct Storefront<S> {
    credentials: CredentialStore<S>,
    router: ViewRouter,
    signed_in: bool,
    page: Option<MainPage>,
    seed: Option<u64>,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open the app over `store`, restoring the session flag.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` if the session flag cannot be read.
    pub fn new(store: S) -> Result<Self> {
        Self::build(store, None)
    }

    /// Like [`Storefront::new`], with tracking numbers drawn from a seeded
    /// generator so runs are reproducible.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` if the session flag cannot be read.
    pub fn with_seed(store: S, seed: u64) -> Result<Self> {
        Self::build(store, Some(seed))
    }

    fn build(store: S, seed: Option<u64>) -> Result<Self> {
        let credentials = CredentialStore::new(store);
        let signed_in = credentials.is_signed_in()?;

        let mut app = Self {
            credentials,
            router: ViewRouter::new(),
            signed_in: false,
            page: None,
            seed,
        };
        if signed_in {
            app.enter_session();
        }

        info!(signed_in, "Storefront opened");
        Ok(app)
    }

    /// Whether a session is active.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    /// The view to show right now.
    #[must_use]
    pub const fn view(&self) -> View {
        self.router.view(self.signed_in)
    }

    /// Resolve a path against the current session.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution {
        self.router.resolve(path, self.signed_in)
    }

    /// Switch between the sign-in and sign-up forms.
    pub const fn toggle_form(&mut self) -> AuthForm {
        self.router.toggle_form()
    }

    /// Create an account and start a session.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` if the username is invalid or taken.
    #[instrument(skip(self, password))]
    pub fn sign_up(&mut self, username: &str, password: &SecretString) -> Result<Username> {
        let username = self.credentials.sign_up(username, password)?;
        self.enter_session();
        Ok(username)
    }

    /// Sign in and start a session.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` if the credentials do not match.
    #[instrument(skip(self, password))]
    pub fn sign_in(&mut self, username: &str, password: &SecretString) -> Result<Username> {
        let username = self.credentials.sign_in(username, password)?;
        self.enter_session();
        Ok(username)
    }

    /// End the session and discard the main page.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Auth` if the session flag cannot be cleared.
    pub fn sign_out(&mut self) -> Result<()> {
        self.credentials.sign_out()?;
        self.signed_in = false;
        self.page = None;
        Ok(())
    }

    /// The main page, if signed in.
    #[must_use]
    pub const fn page(&self) -> Option<&MainPage> {
        self.page.as_ref()
    }

    /// The main page for mutation.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotSignedIn` when signed out.
    pub fn page_mut(&mut self) -> Result<&mut MainPage> {
        self.page.as_mut().ok_or(StorefrontError::NotSignedIn)
    }

    /// The credential store.
    #[must_use]
    pub const fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    fn enter_session(&mut self) {
        self.signed_in = true;
        if self.page.is_none() {
            let rng = self
                .seed
                .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
            self.page = Some(MainPage::new(rng));
        }
    }
}

/// State of the signed-in main page.
#[derive(Debug)]
pub struct MainPage {
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    orders: OrderTracker,
    shipping_address: String,
    toasts: Toasts,
    rng: StdRng,
}

impl MainPage {
    fn new(rng: StdRng) -> Self {
        Self {
            catalog: Catalog::new(),
            cart: Cart::new(),
            wishlist: Wishlist::new(),
            orders: OrderTracker::new(),
            shipping_address: String::new(),
            toasts: Toasts::default(),
            rng,
        }
    }

    /// Fetch the catalog. Failures leave it empty; see [`Catalog::apply`].
    pub async fn load_catalog(&mut self, client: &CatalogClient) {
        self.catalog.load(client).await;
    }

    /// Record a catalog fetch done elsewhere.
    pub fn apply_catalog(&mut self, result: std::result::Result<Vec<Product>, CatalogError>) {
        self.catalog.apply(result);
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        self.orders.orders()
    }

    /// The shipping address typed so far.
    #[must_use]
    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    pub fn set_shipping_address(&mut self, address: impl Into<String>) {
        self.shipping_address = address.into();
    }

    /// Add one unit of an item to the cart.
    pub fn add_to_cart(&mut self, name: &str, price: Price) {
        self.cart.add(name, price);
    }

    /// Add one unit of a catalog product to the cart, by product ID.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnknownProduct` if the product is not in the
    /// loaded catalog.
    pub fn add_product_to_cart(&mut self, id: ProductId) -> Result<()> {
        let (title, price) = self.product_line(id)?;
        self.cart.add(&title, price);
        Ok(())
    }

    /// Remove a cart line after confirmation. Returns whether it was removed.
    pub fn remove_from_cart(&mut self, name: &str, confirm: &mut impl Confirm) -> bool {
        self.cart.remove(name, confirm)
    }

    /// Overwrite a cart line's quantity. Returns whether the line exists.
    pub fn update_quantity(&mut self, name: &str, quantity: i64) -> bool {
        self.cart.update_quantity(name, quantity)
    }

    #[must_use]
    pub fn grand_total(&self) -> Price {
        self.cart.grand_total()
    }

    pub fn add_to_wishlist(&mut self, name: &str, price: Price) {
        self.wishlist.add(name, price);
    }

    /// Add a catalog product to the wishlist, by product ID.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnknownProduct` if the product is not in the
    /// loaded catalog.
    pub fn add_product_to_wishlist(&mut self, id: ProductId) -> Result<()> {
        let (title, price) = self.product_line(id)?;
        self.wishlist.add(&title, price);
        Ok(())
    }

    /// Remove every wishlist entry named `name`. Returns how many went.
    pub fn remove_from_wishlist(&mut self, name: &str) -> usize {
        self.wishlist.remove(name)
    }

    /// Place an order for the cart, shipped to the current shipping address.
    ///
    /// On success the cart and the shipping address are cleared and a
    /// success toast is queued.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Order` if the cart is empty or the address
    /// is blank. Nothing changes in that case.
    pub fn place_order(&mut self) -> Result<OrderId> {
        let id = self
            .orders
            .place_order(&mut self.cart, &self.shipping_address, &mut self.rng)?;

        self.shipping_address.clear();
        self.toasts.push(Toast::success(ORDER_PLACED_MESSAGE));
        Ok(id)
    }

    /// Move an order to its next status.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Order` for unknown or delivered orders.
    pub fn advance_order(&mut self, id: OrderId) -> Result<OrderStatus> {
        Ok(self.orders.advance(id)?)
    }

    /// Move an order to a specific status, if that is its next one.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Order` for unknown orders and illegal moves.
    pub fn update_order_status(&mut self, id: OrderId, status: OrderStatus) -> Result<OrderStatus> {
        Ok(self.orders.update_status(id, status)?)
    }

    /// Cancel a processing order after confirmation. A cancellation queues
    /// an info toast.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Order` for unknown orders and orders that are
    /// not processing.
    pub fn cancel_order(&mut self, id: OrderId, confirm: &mut impl Confirm) -> Result<Cancellation> {
        let outcome = self.orders.cancel(id, confirm)?;
        if matches!(outcome, Cancellation::Cancelled(_)) {
            self.toasts
                .push(Toast::info(format!("Order ID: {id} cancelled.")));
        }
        Ok(outcome)
    }

    /// Take the pending notifications.
    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    fn product_line(&self, id: ProductId) -> Result<(String, Price)> {
        self.catalog
            .find(id)
            .map(|p| (p.title.clone(), p.price))
            .ok_or_else(|| StorefrontError::UnknownProduct(id.to_string()))
    }
}
