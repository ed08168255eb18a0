//! # mediaroute core
//!
//! Shared building blocks for the media route: the error taxonomy, media type
//! tags, the reference-counted byte buffer, and encoded packets.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod error;
pub mod media_type;
pub mod packet;

// Re-export main types
pub use data::MediaData;
pub use error::{BoundsError, ErrorCategory, MediaResult, MediaRouteError};
pub use media_type::{AudioChannelLayout, MediaType};
pub use packet::{MediaPacket, MediaPacketFlag};
