/*!
    Codec engine and parser interfaces for the streamdec crate ecosystem.

    The adapter never decodes a bitstream itself. This crate defines the
    contracts it drives instead: a codec engine that turns coded units into
    raw pictures or samples, an optional incremental parser that finds coded
    frame boundaries in an unframed byte window, a buffer-loan contract for
    engines that want to decode straight into caller-owned memory, and the
    per-codec capability table that configures how the decode loop treats
    each codec.
*/

pub use streamdec_types::{
    AudioFrame, ChannelLayout, Chunk, ClockTime, CodecId, DecodedFrame, Error, MediaKind,
    OutputCaps, PixelFormat, Rational, Result, SampleFormat, StreamParams, VideoFrame,
};

mod caps;
mod parser;
mod pool;
mod session;

pub use caps::{caps_for, Advance, CodecCaps};
pub use parser::{FrameParser, ParseOutcome};
pub use pool::{FrameBufferPool, LoanedBuffer, VecPool};
pub use session::{
    AudioAttributes, CodecEngine, DecodeStep, EngineAttributes, EngineSession, OpenOptions,
    RawOutput, RawPicture, RawPlane, RawSamples, VideoAttributes,
};
