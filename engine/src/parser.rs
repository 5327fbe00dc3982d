/*!
    Incremental frame parser contract.
*/

use bytes::Bytes;
use streamdec_types::ClockTime;

/**
    Outcome of one parse call over a byte window.
*/
#[derive(Debug)]
pub enum ParseOutcome {
    /// A complete coded frame was found. `consumed` (always > 0) is
    /// authoritative for advancing the window; `unit` is authoritative for
    /// what to decode. They can differ when the parser buffers internally.
    Frame {
        /// Bytes to remove from the front of the window.
        consumed: usize,
        /// The coded unit to hand to the engine.
        unit: Bytes,
    },
    /// The window ends mid-frame. The caller keeps the whole window and
    /// waits for more input.
    NeedMoreData,
    /// The parser cannot advance on this window at all. The caller must not
    /// call again with the same window; the whole window is kept pending.
    NoProgress,
}

/**
    A codec-specific incremental parser.

    Given a window of raw bytes, finds the boundary of one complete coded
    frame. Stateful: a parser may carry partial-frame knowledge between
    calls, which is why `consumed` and the returned unit length can differ.
*/
pub trait FrameParser {
    /**
        Scan `window` for the next complete coded frame.

        `timing_hint` is the expected timestamp of the next frame, for
        parsers that interpolate timing; most ignore it.
    */
    fn parse(&mut self, window: &Bytes, timing_hint: Option<ClockTime>) -> ParseOutcome;
}
