//! Block and page ids.
//!
//! Ids look like `<seed>-<n>`: the seed is a crc32 of the owning scope
//! (an edit session for block ids, a store for page ids) and `n` counts
//! up from 1. Both parts are lowercase ASCII, so an id is always a valid
//! slug as well.

use crc32fast::Hasher;

/// Hex crc32 of `scope` under the `pagecraft://` namespace. The same
/// scope name always yields the same seed.
pub fn get_scope_id(scope: &str) -> String {
    let name = if scope.starts_with("pagecraft://") {
        scope.to_string()
    } else {
        format!("pagecraft://{}", scope)
    };

    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Mints block ids for one session, or page ids for one store
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    /// Generator seeded from a session id or store name
    pub fn new(scope: &str) -> Self {
        Self {
            seed: get_scope_id(scope),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Next id in sequence, without checking what is already in use
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Next id that `taken` does not claim.
    ///
    /// Loaded pages and imported block sequences may hold ids minted by an
    /// earlier generator with the same seed.
    pub fn new_unique_id(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id();
            if !taken(&id) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
