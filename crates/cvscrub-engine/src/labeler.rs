//! Deterministic placeholder labels
//!
//! A label is `{{STEM-<hash>}}` where the hash is a BLAKE3 keyed hash of the
//! category stem and the original text. The key is derived from the run salt,
//! so the same salt always yields the same labels.

use cvscrub_core::Category;

const KEY_CONTEXT: &str = "cvscrub 2024-06-01 placeholder labels v1";

/// Hex characters shown in a label unless a collision forces more
pub const DEFAULT_WIDTH: usize = 10;

/// Hex length of a full BLAKE3 digest
pub const MAX_WIDTH: usize = 64;

#[derive(Clone)]
pub struct Labeler {
    key: [u8; 32],
}

impl Labeler {
    pub fn new(salt: &str) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, salt.as_bytes()),
        }
    }

    /// Labeler over a fresh random salt
    pub fn random() -> Self {
        Self::new(&uuid::Uuid::new_v4().to_string())
    }

    /// Full hex digest for `text` in `category`
    pub fn digest(&self, category: Category, text: &str) -> String {
        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(category.stem().as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Label showing the first `width` hex characters of the digest
    pub fn label(&self, category: Category, text: &str, width: usize) -> String {
        let digest = self.digest(category, text);
        let width = width.clamp(1, MAX_WIDTH);
        format!("{{{{{}-{}}}}}", category.stem(), &digest[..width])
    }
}
