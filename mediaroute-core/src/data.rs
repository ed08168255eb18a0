//! Reference-counted media byte buffer
//!
//! [`MediaData`] is the byte container behind every encoded packet. Cloning it
//! shares the underlying storage; mutating it copies the storage first when
//! another holder still references it, so readers never observe a write made
//! through someone else's handle.

use crate::error::{MediaResult, MediaRouteError};
use bytes::Bytes;
use std::fmt;
use std::ops::Deref;

/// Growable byte buffer with shared, copy-on-write storage
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct MediaData {
    bytes: Bytes,
}

impl MediaData {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self { bytes: Bytes::new() }
    }

    /// Create a buffer holding a copy of `data`
    pub fn from_slice(data: &[u8]) -> MediaResult<Self> {
        let mut buffer = Self::new();
        buffer.append(data)?;
        Ok(buffer)
    }

    /// Number of bytes held
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// View of the contents
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the contents, without copying
    pub fn to_bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    /// Whether both buffers point at the same storage
    pub fn is_shared_with(&self, other: &MediaData) -> bool {
        !self.is_empty()
            && self.bytes.len() == other.bytes.len()
            && self.bytes.as_ptr() == other.bytes.as_ptr()
    }

    /// Copy `data` onto the end of the buffer.
    ///
    /// Storage shared with another holder is copied before the write.
    pub fn append(&mut self, data: &[u8]) -> MediaResult<()> {
        if data.is_empty() {
            return Ok(());
        }

        let required = self
            .len()
            .checked_add(data.len())
            .ok_or(MediaRouteError::AllocationFailed {
                requested: usize::MAX,
            })?;

        let mut buf = self.take_unique(required)?;
        buf.extend_from_slice(data);
        self.bytes = Bytes::from(buf);
        Ok(())
    }

    /// Append the contents of another buffer.
    ///
    /// An empty buffer adopts the other buffer's storage instead of copying
    /// it.
    pub fn append_data(&mut self, other: &MediaData) -> MediaResult<()> {
        if self.is_empty() {
            self.bytes = other.bytes.clone();
            return Ok(());
        }
        self.append(other.as_slice())
    }

    /// Detach the storage as a uniquely owned vector with room for `required`
    /// bytes. On failure the buffer keeps its previous contents.
    fn take_unique(&mut self, required: usize) -> MediaResult<Vec<u8>> {
        let current = std::mem::take(&mut self.bytes);

        let mut buf: Vec<u8> = match current.try_into_mut() {
            Ok(unique) => unique.into(),
            Err(shared) => {
                let mut copy = Vec::new();
                if copy.try_reserve_exact(required).is_err() {
                    self.bytes = shared;
                    return Err(MediaRouteError::allocation(required));
                }
                copy.extend_from_slice(&shared);
                copy
            }
        };

        if buf.try_reserve(required - buf.len()).is_err() {
            self.bytes = Bytes::from(buf);
            return Err(MediaRouteError::allocation(required));
        }

        Ok(buf)
    }
}

impl Deref for MediaData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for MediaData {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Bytes> for MediaData {
    fn from(bytes: Bytes) -> Self {
        Self { bytes }
    }
}

impl From<Vec<u8>> for MediaData {
    fn from(data: Vec<u8>) -> Self {
        Self {
            bytes: Bytes::from(data),
        }
    }
}

impl fmt::Debug for MediaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaData").field("len", &self.len()).finish()
    }
}
