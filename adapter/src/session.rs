/*!
    Decode session lifecycle and the chain entry point.
*/

use streamdec_engine::{
    caps_for, CodecCaps, CodecEngine, EngineSession, FrameParser, OpenOptions,
};
use streamdec_types::{Chunk, CodecId, Error, Rational, Result, StreamParams};

use crate::cache::FrameCache;
use crate::driver::DecodeRun;
use crate::output::Materializer;
use crate::sink::Downstream;

/**
    What one chain invocation did.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Decoded units pushed downstream.
    pub produced: usize,
    /// Trailing bytes stored for the next invocation.
    pub cached: usize,
}

/// Everything that only exists while a session is open. Dropping it
/// releases the engine session, the parser context and the pending cache
/// in one move.
struct OpenState {
    caps: CodecCaps,
    session: Box<dyn EngineSession>,
    parser: Option<Box<dyn FrameParser>>,
    cache: FrameCache,
    par_hint: Option<Rational>,
    negotiated: bool,
    decode_steps: u64,
}

/**
    The streaming decoder adapter.

    Sits between an upstream element delivering arbitrarily-chunked encoded
    bytes and a downstream consumer expecting framed, decoded, timestamped
    units. The engine doing the actual decoding is handed in at
    construction and driven through its trait.

    A session opens when upstream negotiation settles
    ([`on_format_negotiated`]) and closes on teardown
    ([`on_stream_stop_or_pause`]) or mid-stream format change. Chunks only
    flow while a session is open.

    [`on_format_negotiated`]: StreamDecoder::on_format_negotiated
    [`on_stream_stop_or_pause`]: StreamDecoder::on_stream_stop_or_pause
*/
pub struct StreamDecoder {
    engine: Box<dyn CodecEngine>,
    open: Option<OpenState>,
}

impl StreamDecoder {
    /**
        Create a closed adapter around a codec engine.
    */
    pub fn new(engine: Box<dyn CodecEngine>) -> Self {
        StreamDecoder { engine, open: None }
    }

    /**
        True while a decode session is open.
    */
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /**
        Codec of the open session.
    */
    pub fn codec(&self) -> Option<CodecId> {
        self.open.as_ref().map(|s| s.caps.codec)
    }

    /**
        Decode-loop iterations run since the session opened.
    */
    pub fn decode_steps(&self) -> u64 {
        self.open.as_ref().map_or(0, |s| s.decode_steps)
    }

    /**
        Bytes waiting in the pending cache.
    */
    pub fn pending_bytes(&self) -> usize {
        self.open.as_ref().map_or(0, |s| s.cache.pending_len())
    }

    /**
        Open a decode session for negotiated stream parameters.

        The capability table decides how the codec is driven: whether a
        parser is created, which consumption count advances the window,
        and which open-time options the engine gets. On failure nothing is
        kept: the session stays closed and partially-initialized state is
        released.
    */
    pub fn open(&mut self, params: &StreamParams) -> Result<()> {
        if self.open.is_some() {
            return Err(Error::invariant("session already open; close it first"));
        }
        if params.codec.kind() != params.kind() {
            return Err(Error::engine_open(format!(
                "{} does not decode {:?} streams",
                params.codec.name(),
                params.kind()
            )));
        }

        let caps = caps_for(params.codec);
        let options = OpenOptions {
            tolerate_truncated: caps.tolerate_truncated,
            buffer_pool: None,
        };
        let session = self.engine.open(params, options)?;
        let parser = if caps.parses {
            self.engine.new_parser(params.codec)
        } else {
            None
        };
        let par_hint = params.video_params().and_then(|v| v.pixel_aspect);

        log::debug!(
            "[session] opened {} session (parser: {})",
            params.codec.name(),
            parser.is_some()
        );

        self.open = Some(OpenState {
            caps,
            session,
            parser,
            cache: FrameCache::new(),
            par_hint,
            negotiated: false,
            decode_steps: 0,
        });
        Ok(())
    }

    /**
        Close the session, releasing the engine session, parser context and
        any pending cache. Safe to call on an already-closed session.
    */
    pub fn close(&mut self) {
        if let Some(state) = self.open.take() {
            log::debug!("[session] closing {} session", state.caps.codec.name());
            drop(state);
        }
    }

    /**
        Close and reopen with new parameters; used when upstream format
        changes mid-stream.
    */
    pub fn reset_on_format_change(&mut self, params: &StreamParams) -> Result<()> {
        self.close();
        self.open(params)
    }

    /**
        Upstream negotiation settled. Opens a session, replacing any
        previous one.
    */
    pub fn on_format_negotiated(&mut self, params: &StreamParams) -> Result<()> {
        self.reset_on_format_change(params)
    }

    /**
        The stream is stopping or pausing; tear the session down.
    */
    pub fn on_stream_stop_or_pause(&mut self) {
        self.close();
    }

    /**
        Process one input chunk to completion, pushing every decoded unit
        it yields downstream.

        Pending bytes from the previous call are joined in front of the
        chunk first. Trailing bytes that do not form a complete coded
        frame are cached for the next call, except after an error, which
        discards the rest of the chunk.
    */
    pub fn chain(&mut self, chunk: Chunk, downstream: &mut dyn Downstream) -> Result<ChainOutcome> {
        let state = self
            .open
            .as_mut()
            .ok_or_else(|| Error::negotiation("input received before stream format was set"))?;

        log::debug!("[chain] received chunk of {} bytes", chunk.len());

        let OpenState {
            caps,
            session,
            parser,
            cache,
            par_hint,
            negotiated,
            decode_steps,
        } = state;

        let chunk = cache.absorb(chunk);
        let mut materializer = Materializer::new(downstream, negotiated, *par_hint, &chunk);
        let mut run = DecodeRun::new(
            session.as_mut(),
            parser.as_deref_mut(),
            caps,
            chunk.data.clone(),
            chunk.pts,
        );

        let mut produced = 0;
        while let Some(step) = run.next_step()? {
            *decode_steps += 1;
            if let Some(output) = step.output {
                if materializer.emit(output.raw, &output.attrs)? {
                    produced += 1;
                }
            }
        }

        // Only parser-driven framing keeps remainders; whole-window codecs
        // drop whatever the engine declined.
        let remainder = run.remainder();
        let cached = if run.parser_active() && !remainder.is_empty() {
            cache.store(remainder)?;
            cache.pending_len()
        } else {
            0
        };

        Ok(ChainOutcome { produced, cached })
    }
}

impl std::fmt::Debug for StreamDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("open", &self.is_open())
            .field("codec", &self.codec())
            .finish_non_exhaustive()
    }
}
