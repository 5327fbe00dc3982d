/*!
    Codec engine contract.
*/

use streamdec_types::{CodecId, PixelFormat, Rational, Result, SampleFormat, StreamParams};

use crate::parser::FrameParser;
use crate::pool::FrameBufferPool;

/**
    Open-time options resolved from the codec capability table.
*/
#[derive(Default)]
pub struct OpenOptions {
    /// The engine must accept coded units that are not complete frames.
    pub tolerate_truncated: bool,
    /// Buffer pool the engine may draw output allocations from. Engines
    /// that do not support caller-owned output ignore it.
    pub buffer_pool: Option<Box<dyn FrameBufferPool>>,
}

/**
    A codec engine: the external component that performs actual bitstream
    decoding.

    One engine value serves as a factory for decode sessions and,
    for codecs with incremental structure, frame parsers.
*/
pub trait CodecEngine {
    /**
        Open a decode session for the given stream parameters.

        Implementations reject parameters they cannot handle with
        [`Error::EngineOpen`]; no session state may survive a failed open.

        [`Error::EngineOpen`]: streamdec_types::Error::EngineOpen
    */
    fn open(&self, params: &StreamParams, options: OpenOptions) -> Result<Box<dyn EngineSession>>;

    /**
        Create an incremental parser for the codec, if the engine has one.

        Called once per session open, and only for codecs whose capability
        entry asks for a parser.
    */
    fn new_parser(&self, codec: CodecId) -> Option<Box<dyn FrameParser>>;
}

/**
    One open decode session. Exclusively owned by the adapter; dropping the
    session releases all engine-side resources.
*/
pub trait EngineSession {
    /**
        Feed one coded unit to the decoder.

        The step reports how many bytes of the unit the engine consumed
        (negative for a fatal bitstream error) and carries at most one
        produced output. A session may buffer internally: several units can
        go in before the first output comes out.
    */
    fn decode(&mut self, unit: &[u8]) -> Result<DecodeStep>;

    /**
        Current stream attributes as the engine sees them.

        Queried after each produced output rather than cached at open:
        engines typically learn the real dimensions, rates and aspect
        ratios from the bitstream, not from the open parameters.
    */
    fn attributes(&self) -> EngineAttributes;
}

/**
    Result of one engine decode step.
*/
#[derive(Debug)]
pub struct DecodeStep {
    /// Bytes of the coded unit the engine consumed. Zero means the engine
    /// made no progress; negative signals a fatal bitstream error.
    pub consumed: i64,
    /// Produced output, if this step completed one.
    pub output: Option<RawOutput>,
}

impl DecodeStep {
    /**
        A step that consumed bytes without completing an output.
    */
    pub fn consumed(consumed: i64) -> Self {
        DecodeStep {
            consumed,
            output: None,
        }
    }

    /**
        A step that consumed bytes and completed an output.
    */
    pub fn produced(consumed: i64, output: RawOutput) -> Self {
        DecodeStep {
            consumed,
            output: Some(output),
        }
    }
}

/**
    Raw engine output, before materialization.
*/
#[derive(Debug)]
pub enum RawOutput {
    /// A decoded picture in the engine's internal representation.
    Video(RawPicture),
    /// A run of decoded samples.
    Audio(RawSamples),
}

/**
    A decoded picture as the engine holds it: per-plane data with engine
    strides, possibly padded. The adapter packs it into an exact-size
    output buffer.
*/
#[derive(Debug)]
pub struct RawPicture {
    /// Planes in format order.
    pub planes: Vec<RawPlane>,
}

/**
    One plane of a raw picture.
*/
#[derive(Debug)]
pub struct RawPlane {
    /// Plane bytes, rows `stride` apart.
    pub data: Vec<u8>,
    /// Bytes from one row to the next.
    pub stride: usize,
}

/**
    A run of decoded audio samples as the engine reports it.
*/
#[derive(Debug)]
pub struct RawSamples {
    /// Total interleaved samples across all channels. Engines surface this
    /// signed; a negative count marks the output as malformed.
    pub sample_count: i64,
    /// Interleaved sample bytes.
    pub data: Vec<u8>,
}

/**
    Readable session attributes, per media kind.
*/
#[derive(Clone, Debug, Default)]
pub struct EngineAttributes {
    /// Video attributes, present for video sessions.
    pub video: Option<VideoAttributes>,
    /// Audio attributes, present for audio sessions.
    pub audio: Option<AudioAttributes>,
}

/**
    Video attributes the engine derives from the bitstream.
*/
#[derive(Clone, Debug)]
pub struct VideoAttributes {
    /// Picture width in pixels.
    pub width: u32,
    /// Picture height in pixels.
    pub height: u32,
    /// Output pixel format.
    pub pixel_format: PixelFormat,
    /// Frame rate, when the bitstream carries one. Engines sometimes get
    /// this wrong; it is still preferred over nothing.
    pub frame_rate: Option<Rational>,
    /// Sample aspect ratio, when the bitstream carries one.
    pub aspect_ratio: Option<Rational>,
}

/**
    Audio attributes the engine derives from the bitstream.
*/
#[derive(Clone, Debug)]
pub struct AudioAttributes {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Sample format of produced output.
    pub sample_format: SampleFormat,
}
