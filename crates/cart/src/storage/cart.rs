//! Typed access to the persisted cart.

use rocketshoes_core::Cart;

use super::{KeyValueStore, StorageError};

/// Reads and writes the cart under a single key.
pub struct CartRepository<'a, S: ?Sized> {
    store: &'a S,
    key: &'a str,
}

impl<'a, S: KeyValueStore + ?Sized> CartRepository<'a, S> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a S, key: &'a str) -> Self {
        Self { store, key }
    }

    /// Load the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Json` if the stored value is not a cart.
    /// Returns `StorageError::DataCorruption` if it decodes but breaks cart invariants.
    pub fn load(&self) -> Result<Option<Cart>, StorageError> {
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(None);
        };

        let cart: Cart = serde_json::from_str(&raw)?;
        let cart = cart
            .validate()
            .map_err(|e| StorageError::DataCorruption(format!("invalid persisted cart: {e}")))?;

        Ok(Some(cart))
    }

    /// Overwrite the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be encoded or written.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.store.set(self.key, &raw)
    }
}
