//! DID-keyed codec registry
//!
//! A [`Registry`] maps each Data Identifier to the [`Codec`] that defines
//! its layout. It is populated once, typically from an external catalog,
//! and then queried by whatever layer exchanges raw buffers with a device.
//! Lookups and the `decode`/`encode` shortcuts take `&self`, so a built
//! registry can be shared freely between threads.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{self, Display};

use crate::codec::{Codec, Mode};
use crate::conv::info::CodecInfo;
use crate::conv::Transcode;
use crate::error::RegistryError;
use crate::value::Value;

/// Data Identifier: the 16-bit key of a diagnostic data record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde_impls", derive(serde::Serialize))]
pub struct Did(pub u16);

impl Display for Did {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

impl From<u16> for Did {
    fn from(id: u16) -> Self {
        Did(id)
    }
}

/// Mapping from [`Did`] to [`Codec`], iterated in ascending DID order
#[derive(Debug, Clone, Default)]
pub struct Registry {
    codecs: BTreeMap<Did, Codec>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `codec` with `did`, returning the codec it replaces, if any
    pub fn register(&mut self, did: impl Into<Did>, codec: impl Into<Codec>) -> Option<Codec> {
        let did = did.into();
        let codec = codec.into();
        tracing::debug!(%did, name = codec.name(), kind = %codec.kind(), len = codec.byte_len(), "registering codec");
        let prev = self.codecs.insert(did, codec);
        if let Some(prev) = &prev {
            tracing::warn!(%did, replaced = prev.name(), "codec replaced");
        }
        prev
    }

    /// Codec registered for `did`, if any
    #[must_use]
    pub fn get(&self, did: Did) -> Option<&Codec> {
        self.codecs.get(&did)
    }

    /// Codec registered for `did`
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if there is none.
    pub fn lookup(&self, did: Did) -> Result<&Codec, RegistryError> {
        self.get(did).ok_or_else(|| {
            tracing::debug!(%did, "no codec registered");
            RegistryError::NotRegistered(did)
        })
    }

    /// Decodes `bytes` with the codec registered for `did`.
    ///
    /// # Errors
    ///
    /// Fails if `did` is unknown, or with the codec's own error wrapped in
    /// [`RegistryError::Codec`].
    pub fn decode(&self, did: Did, bytes: &[u8], mode: Mode) -> Result<Value, RegistryError> {
        let codec = self.lookup(did)?;
        tracing::trace!(%did, name = codec.name(), ?mode, len = bytes.len(), "decode");
        codec
            .decode_with(bytes, mode)
            .map_err(|source| RegistryError::Codec { did, source })
    }

    /// Encodes `value` with the codec registered for `did`.
    ///
    /// # Errors
    ///
    /// Fails if `did` is unknown, or with the codec's own error wrapped in
    /// [`RegistryError::Codec`].
    pub fn encode(&self, did: Did, value: &Value, mode: Mode) -> Result<Vec<u8>, RegistryError> {
        let codec = self.lookup(did)?;
        tracing::trace!(%did, name = codec.name(), ?mode, "encode");
        codec
            .encode_with(value, mode)
            .map_err(|source| RegistryError::Codec { did, source })
    }

    /// Self-descriptions of every registered codec, in DID order
    #[must_use]
    pub fn describe_all(&self) -> Vec<(Did, CodecInfo)> {
        self.codecs
            .iter()
            .map(|(&did, codec)| (did, codec.describe()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Did, Codec> {
        self.codecs.iter()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = (&'a Did, &'a Codec);
    type IntoIter = btree_map::Iter<'a, Did, Codec>;

    fn into_iter(self) -> Self::IntoIter {
        self.codecs.iter()
    }
}

impl<D: Into<Did>, C: Into<Codec>> FromIterator<(D, C)> for Registry {
    fn from_iter<I: IntoIterator<Item = (D, C)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (did, codec) in iter {
            registry.register(did, codec);
        }
        registry
    }
}

impl<D: Into<Did>, C: Into<Codec>> Extend<(D, C)> for Registry {
    fn extend<I: IntoIterator<Item = (D, C)>>(&mut self, iter: I) {
        for (did, codec) in iter {
            self.register(did, codec);
        }
    }
}
