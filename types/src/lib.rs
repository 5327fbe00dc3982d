/*!
    Shared types for the streamdec crate ecosystem.

    This crate defines the vocabulary of the ecosystem — the types that cross
    crate boundaries. It has no dependency on any codec engine, making it
    lightweight and enabling consumers to depend on it without pulling in
    engine bindings.
*/

mod chunk;
mod codec;
mod error;
mod format;
mod frame;
mod params;
mod time;

pub use chunk::Chunk;
pub use codec::{CodecId, MediaKind};
pub use error::{Error, Result};
pub use format::{ChannelLayout, PixelFormat, PlaneGeometry, SampleFormat};
pub use frame::{AudioFrame, DecodedFrame, VideoFrame};
pub use params::{AudioParams, OutputCaps, StreamDetail, StreamParams, VideoParams};
pub use time::{ClockTime, Rational};
