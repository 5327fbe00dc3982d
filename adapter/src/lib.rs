/*!
    Framing, buffering and timestamp propagation around a codec engine.

    This crate is the core of the streamdec ecosystem. It turns a sequence
    of arbitrarily-sized, arbitrarily-timed input chunks into correctly
    bounded coded frames, feeds them to a stateful engine decode step that
    may consume fewer bytes than offered, caches incomplete trailing data
    across calls, and reconstructs per-output timestamps and durations,
    including for outputs that arrive out of lockstep with inputs.

    The decode algorithm itself lives behind the traits in
    `streamdec-engine`; nothing here inspects a bitstream beyond what a
    parser reports.
*/

pub use streamdec_engine::{
    caps_for, Advance, AudioAttributes, CodecCaps, CodecEngine, DecodeStep, EngineAttributes,
    EngineSession, FrameBufferPool, FrameParser, LoanedBuffer, OpenOptions, ParseOutcome,
    RawOutput, RawPicture, RawPlane, RawSamples, VecPool, VideoAttributes,
};
pub use streamdec_types::{
    AudioFrame, AudioParams, ChannelLayout, Chunk, ClockTime, CodecId, DecodedFrame, Error,
    MediaKind, OutputCaps, PixelFormat, Rational, Result, SampleFormat, StreamDetail,
    StreamParams, VideoFrame, VideoParams,
};

mod cache;
mod driver;
mod output;
mod session;
mod sink;

pub use cache::FrameCache;
pub use session::{ChainOutcome, StreamDecoder};
pub use sink::Downstream;
