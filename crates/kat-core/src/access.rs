//! Partner mode: whether wholesale prices may be shown.
//!
//! This is a display toggle, not a security boundary. The partner code is a
//! shared string compared on the client.

use subtle::ConstantTimeEq;

use crate::products::{Product, Variant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessGate {
    #[default]
    LoggedOut,
    LoggedIn,
}

impl AccessGate {
    /// Unlocks the gate if `code` matches `secret`. Surrounding whitespace in
    /// `code` is ignored. Without a configured secret nothing unlocks.
    ///
    /// A wrong code leaves the current state unchanged.
    pub fn try_unlock(&mut self, code: &str, secret: Option<&str>) -> bool {
        let Some(secret) = secret.filter(|s| !s.is_empty()) else {
            tracing::debug!("partner code rejected; no code is configured");
            return false;
        };
        let matches: bool = code.trim().as_bytes().ct_eq(secret.as_bytes()).into();
        if matches {
            *self = AccessGate::LoggedIn;
            tracing::info!("partner pricing unlocked");
        } else {
            tracing::debug!("partner code rejected");
        }
        matches
    }

    pub fn lock(&mut self) {
        *self = AccessGate::LoggedOut;
    }

    #[must_use]
    pub fn is_unlocked(self) -> bool {
        self == AccessGate::LoggedIn
    }

    /// The product's per-size prices, or `None` while locked. This is the
    /// only accessor presentation code should use for price display.
    #[must_use]
    pub fn visible_prices(self, product: &Product) -> Option<&[Variant]> {
        self.is_unlocked().then_some(product.variants.as_slice())
    }
}
