//! Places: named, non-negative token counters.

use derive_more::Display;

/// Longest name kept for a place or transition; longer names are truncated at registration.
pub const MAX_NAME_LEN: usize = 31;

/// Stable index of a place within a [`Net`](super::Net), assigned at registration.
///
/// Registration order defines this index, and it is what the snapshot JSON and every arc
/// refer to — it never changes once a place is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "P{}", _0)]
pub struct PlaceId(pub usize);

impl PlaceId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

pub(crate) fn truncate_name(name: &str) -> String {
    let mut owned = name.to_string();
    if owned.len() > MAX_NAME_LEN {
        let mut end = MAX_NAME_LEN;
        while !owned.is_char_boundary(end) {
            end -= 1;
        }
        owned.truncate(end);
    }
    owned
}

/// A place's static attributes. The live token count is never stored here — it lives in the
/// marking (see [`crate::marking::Marking`]) so that it can change without touching topology.
#[derive(Debug, Clone)]
pub struct Place {
    pub(crate) name: String,
    pub(crate) initial_tokens: u32,
}

impl Place {
    pub(crate) fn new(name: &str, initial_tokens: u32) -> Self {
        Self { name: truncate_name(name), initial_tokens }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn initial_tokens(&self) -> u32 {
        self.initial_tokens
    }
}
