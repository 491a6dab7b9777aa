//! Ordered name-resolution chain for scanned EAN codes.

use super::ean::EanCode;

/// Outcome of the resolution chain.
///
/// `NotFound` routes the session into manual naming; it is never collapsed
/// into an empty name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameResolution {
    Found(String),
    NotFound,
}

/// A single naming capability: EAN in, best-effort product name out.
///
/// Implementations absorb their own faults; a timeout or a malformed
/// response surfaces as `None`, never as an error.
#[allow(async_fn_in_trait)]
pub trait NameSource {
    async fn lookup(&self, ean: &EanCode) -> Option<String>;
}

/// Strict ordered fallback: the remote product database is asked first, the
/// generative namer only when the remote yields nothing. The first non-blank
/// name wins; manual entry is the caller's job when both come back empty.
pub struct NameResolver<R, G> {
    remote: R,
    generative: G,
}

impl<R: NameSource, G: NameSource> NameResolver<R, G> {
    pub fn new(remote: R, generative: G) -> Self {
        Self { remote, generative }
    }

    pub async fn resolve(&self, ean: &EanCode) -> NameResolution {
        if let Some(name) = clean(self.remote.lookup(ean).await) {
            return NameResolution::Found(name);
        }
        if let Some(name) = clean(self.generative.lookup(ean).await) {
            return NameResolution::Found(name);
        }
        NameResolution::NotFound
    }
}

fn clean(name: Option<String>) -> Option<String> {
    name.map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
}
