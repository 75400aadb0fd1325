//! Secret key material

use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// HMAC secret shared by every encode and decode call of a codec
///
/// Clones share one buffer, which is zeroed when the last clone drops.
/// The bytes never appear in `Debug` output and the type has no serde
/// implementations.
#[derive(Clone)]
pub struct Secret(Arc<Zeroizing<Vec<u8>>>);

impl Secret {
    /// Wrap key bytes
    #[must_use]
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self(Arc::new(Zeroizing::new(bytes.as_ref().to_vec())))
    }

    /// Raw key bytes
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Key length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret([REDACTED; {} bytes])", self.len())
    }
}
