/*!
    The per-chunk decode loop.
*/

use bytes::Bytes;
use streamdec_engine::{
    Advance, CodecCaps, EngineAttributes, EngineSession, FrameParser, ParseOutcome, RawOutput,
};
use streamdec_types::{ClockTime, Error, Result};

/**
    Raw output plus the engine attributes in effect when it was produced.

    Attributes travel with the output because engines learn dimensions and
    rates from the bitstream as they go; the values at production time are
    the ones that describe the unit.
*/
#[derive(Debug)]
pub(crate) struct ProducedOutput {
    pub raw: RawOutput,
    pub attrs: EngineAttributes,
}

/**
    One completed iteration of the decode loop.
*/
#[derive(Debug)]
pub(crate) struct DriverStep {
    /// Bytes the engine consumed from the coded unit this iteration.
    pub consumed: usize,
    /// Output produced this iteration, if any.
    pub output: Option<ProducedOutput>,
}

/**
    A single pass over one joined input window.

    The caller drives the loop by calling [`DecodeRun::next_step`] until it
    returns `Ok(None)` or an error. Not restartable.
*/
pub(crate) struct DecodeRun<'a> {
    engine: &'a mut dyn EngineSession,
    parser: Option<&'a mut (dyn FrameParser + 'static)>,
    caps: &'a CodecCaps,
    window: Bytes,
    timing_hint: Option<ClockTime>,
    finished: bool,
}

impl<'a> DecodeRun<'a> {
    pub fn new(
        engine: &'a mut dyn EngineSession,
        parser: Option<&'a mut (dyn FrameParser + 'static)>,
        caps: &'a CodecCaps,
        window: Bytes,
        timing_hint: Option<ClockTime>,
    ) -> Self {
        DecodeRun {
            engine,
            parser,
            caps,
            window,
            timing_hint,
            finished: false,
        }
    }

    /**
        Run one iteration: slice the next coded unit, feed it to the
        engine, and interpret the consumption and production counts.

        `Ok(None)` ends the run: the window is exhausted, the parser wants
        more data, or the engine stopped making progress. Errors also end
        the run; the remaining window is then discarded by the caller.
    */
    pub fn next_step(&mut self) -> Result<Option<DriverStep>> {
        if self.finished || self.window.is_empty() {
            self.finished = true;
            return Ok(None);
        }

        // A parser slices the unit only for parser-framed codecs;
        // self-delimiting codecs take the whole window even when a parser
        // context exists.
        let use_parser = self.parser.is_some() && self.caps.advance == Advance::Parser;

        let unit = if use_parser {
            let parser = match self.parser.as_mut() {
                Some(p) => p,
                None => return Err(Error::invariant("parser vanished mid-run")),
            };
            match parser.parse(&self.window, self.timing_hint) {
                ParseOutcome::Frame { consumed, unit } => {
                    if consumed == 0 {
                        // Contract says consumed > 0; stop rather than spin.
                        log::warn!("[driver] parser returned a frame without consuming bytes");
                        self.finished = true;
                        return Ok(None);
                    }
                    if consumed > self.window.len() {
                        self.finished = true;
                        return Err(Error::malformed(
                            "parser consumed more bytes than the window holds",
                        ));
                    }
                    self.window = self.window.slice(consumed..);
                    unit
                }
                ParseOutcome::NeedMoreData | ParseOutcome::NoProgress => {
                    // The whole remaining window stays pending.
                    self.finished = true;
                    return Ok(None);
                }
            }
        } else {
            self.window.clone()
        };

        let step = if self.caps.writes_input {
            // The decoder may scribble on its input; give it a private
            // copy so the shared window stays intact.
            let scratch = unit.to_vec();
            self.engine.decode(&scratch)
        } else {
            self.engine.decode(&unit)
        };
        let step = match step {
            Ok(step) => step,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        if step.consumed < 0 {
            self.finished = true;
            return Err(Error::decode(format!(
                "engine reported bitstream error ({})",
                step.consumed
            )));
        }
        let consumed = step.consumed as usize;

        if !use_parser {
            // Parser-framed codecs already advanced at the parse step.
            let advance = consumed.min(self.window.len());
            self.window = self.window.slice(advance..);
        }

        if consumed == 0 {
            // No forward progress; stop before this turns into a spin.
            if step.output.is_some() {
                log::debug!("[driver] engine produced output without consuming input; dropping");
            }
            self.finished = true;
            return Ok(None);
        }

        let output = step.output.map(|raw| ProducedOutput {
            attrs: self.engine.attributes(),
            raw,
        });

        Ok(Some(DriverStep { consumed, output }))
    }

    /**
        Bytes of the window not consumed by the run.
    */
    pub fn remainder(&self) -> Bytes {
        self.window.clone()
    }

    /**
        True when a parser context exists for this run, whether or not it
        slices units. Governs whether trailing bytes are cached.
    */
    pub fn parser_active(&self) -> bool {
        self.parser.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use streamdec_engine::{caps_for, DecodeStep, RawSamples};
    use streamdec_types::CodecId;

    /// Engine that consumes a fixed number of bytes per call and reports
    /// each unit length it was handed. The call count lives behind a shared
    /// `Cell` so a test can observe it while the engine is borrowed.
    struct ScriptedEngine {
        consume: Vec<i64>,
        calls: Rc<Cell<usize>>,
        unit_lens: Vec<usize>,
    }

    impl EngineSession for ScriptedEngine {
        fn decode(&mut self, unit: &[u8]) -> Result<DecodeStep> {
            self.unit_lens.push(unit.len());
            let consumed = self.consume[self.calls.get().min(self.consume.len() - 1)];
            self.calls.set(self.calls.get() + 1);
            Ok(DecodeStep::produced(
                consumed,
                RawOutput::Audio(RawSamples {
                    sample_count: 2,
                    data: vec![0, 1, 2, 3],
                }),
            ))
        }

        fn attributes(&self) -> EngineAttributes {
            EngineAttributes::default()
        }
    }

    /// Parser that cuts fixed-size frames and buffers internally: it
    /// consumes `cut` bytes but hands back a shorter unit.
    struct FixedCutParser {
        cut: usize,
        unit_len: usize,
    }

    impl FrameParser for FixedCutParser {
        fn parse(&mut self, window: &Bytes, _hint: Option<ClockTime>) -> ParseOutcome {
            if window.len() < self.cut {
                return ParseOutcome::NeedMoreData;
            }
            ParseOutcome::Frame {
                consumed: self.cut,
                unit: window.slice(0..self.unit_len),
            }
        }
    }

    #[test]
    fn parser_consumed_advances_window_and_unit_feeds_engine() {
        let caps = caps_for(CodecId::Mpeg1Video);
        let mut engine = ScriptedEngine {
            consume: vec![3],
            calls: Rc::new(Cell::new(0)),
            unit_lens: Vec::new(),
        };
        let mut parser = FixedCutParser {
            cut: 10,
            unit_len: 6,
        };
        let mut run = DecodeRun::new(
            &mut engine,
            Some(&mut parser),
            &caps,
            Bytes::from(vec![0u8; 25]),
            None,
        );

        // Two full cuts fit in 25 bytes; the third call sees 5 and stalls.
        assert!(run.next_step().unwrap().is_some());
        assert!(run.next_step().unwrap().is_some());
        assert!(run.next_step().unwrap().is_none());

        // The engine saw the parser's units, not the raw cuts, and the
        // window advanced by the parser's count, not the engine's.
        assert_eq!(run.remainder().len(), 5);
        assert_eq!(engine.unit_lens, vec![6, 6]);
    }

    #[test]
    fn zero_consumption_without_parser_terminates() {
        let caps = caps_for(CodecId::Mpeg4);
        let calls = Rc::new(Cell::new(0));
        let mut engine = ScriptedEngine {
            consume: vec![0],
            calls: calls.clone(),
            unit_lens: Vec::new(),
        };
        let mut run = DecodeRun::new(&mut engine, None, &caps, Bytes::from(vec![0u8; 100]), None);

        assert!(run.next_step().unwrap().is_none());
        assert_eq!(calls.get(), 1);
        // Finished for good, not merely paused.
        assert!(run.next_step().unwrap().is_none());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn negative_consumption_is_a_decode_error() {
        let caps = caps_for(CodecId::Mpeg4);
        let mut engine = ScriptedEngine {
            consume: vec![-1],
            calls: Rc::new(Cell::new(0)),
            unit_lens: Vec::new(),
        };
        let mut run = DecodeRun::new(&mut engine, None, &caps, Bytes::from(vec![0u8; 10]), None);

        let err = run.next_step().unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(run.next_step().unwrap().is_none());
    }
}
