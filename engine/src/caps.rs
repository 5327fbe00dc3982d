/*!
    Per-codec capability table.

    Codec quirks are declared here once and resolved at session open, so
    the decode loop never compares codec identifiers.
*/

use streamdec_types::{CodecId, MediaKind};

/**
    Which byte count advances the input window after an iteration of the
    decode loop.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The parser's consumed count, applied at the parse step. Used by
    /// codecs whose frames the parser delimits.
    Parser,
    /// The engine's consumed count, applied after the decode step. Used by
    /// codecs that frame themselves and ignore parser boundaries, and by
    /// all codecs decoded without a parser.
    Engine,
}

/**
    How the decode loop must treat one codec. Resolved once at session
    open from [`caps_for`].
*/
#[derive(Clone, Copy, Debug)]
pub struct CodecCaps {
    /// The codec described.
    pub codec: CodecId,
    /// Media kind the codec decodes to.
    pub kind: MediaKind,
    /// Ask the engine for an incremental parser at session open. False for
    /// codecs that always arrive framed by the container.
    pub parses: bool,
    /// Window advancement convention.
    pub advance: Advance,
    /// The engine must be opened tolerating truncated coded units.
    pub tolerate_truncated: bool,
    /// The decoder scribbles on its input buffer; hand it a private copy.
    pub writes_input: bool,
}

/**
    Capability entry for a codec.
*/
pub const fn caps_for(codec: CodecId) -> CodecCaps {
    let kind = codec.kind();
    match codec {
        // MPEG-1/2 elementary streams are parser-framed, and the decoder
        // accepts truncated units while a frame straddles windows.
        CodecId::Mpeg1Video | CodecId::Mpeg2Video => CodecCaps {
            codec,
            kind,
            parses: true,
            advance: Advance::Parser,
            tolerate_truncated: true,
            writes_input: false,
        },
        // MPEG-4 part 2 always arrives framed by the container.
        CodecId::Mpeg4 => CodecCaps {
            codec,
            kind,
            parses: false,
            advance: Advance::Engine,
            tolerate_truncated: false,
            writes_input: false,
        },
        // MJPEG images are self-delimiting; the decoder ignores parser
        // boundaries, so the whole window goes in and the engine's count
        // comes back out.
        CodecId::Mjpeg => CodecCaps {
            codec,
            kind,
            parses: true,
            advance: Advance::Engine,
            tolerate_truncated: false,
            writes_input: false,
        },
        // The Sorenson decoders write into their input buffer.
        CodecId::Svq1 | CodecId::Svq3 => CodecCaps {
            codec,
            kind,
            parses: true,
            advance: Advance::Parser,
            tolerate_truncated: false,
            writes_input: true,
        },
        CodecId::H263 | CodecId::H264 => CodecCaps {
            codec,
            kind,
            parses: true,
            advance: Advance::Parser,
            tolerate_truncated: false,
            writes_input: false,
        },
        // MP3 frames are self-delimiting, like MJPEG.
        CodecId::Mp3 => CodecCaps {
            codec,
            kind,
            parses: true,
            advance: Advance::Engine,
            tolerate_truncated: false,
            writes_input: false,
        },
        CodecId::Mp2 | CodecId::Aac | CodecId::Ac3 => CodecCaps {
            codec,
            kind,
            parses: true,
            advance: Advance::Parser,
            tolerate_truncated: false,
            writes_input: false,
        },
        // CodecId is non_exhaustive; unknown codecs get the conservative
        // whole-window treatment.
        _ => CodecCaps {
            codec,
            kind,
            parses: false,
            advance: Advance::Engine,
            tolerate_truncated: false,
            writes_input: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_framed_codecs_advance_by_parser() {
        for codec in [
            CodecId::Mpeg1Video,
            CodecId::Mpeg2Video,
            CodecId::H264,
            CodecId::Mp2,
        ] {
            let caps = caps_for(codec);
            assert!(caps.parses, "{:?}", codec);
            assert_eq!(caps.advance, Advance::Parser, "{:?}", codec);
        }
    }

    #[test]
    fn self_delimiting_codecs_advance_by_engine() {
        for codec in [CodecId::Mp3, CodecId::Mjpeg] {
            let caps = caps_for(codec);
            assert!(caps.parses, "{:?}", codec);
            assert_eq!(caps.advance, Advance::Engine, "{:?}", codec);
        }
    }

    #[test]
    fn container_framed_codec_skips_the_parser() {
        let caps = caps_for(CodecId::Mpeg4);
        assert!(!caps.parses);
        assert_eq!(caps.advance, Advance::Engine);
    }

    #[test]
    fn truncated_and_writable_input_flags() {
        assert!(caps_for(CodecId::Mpeg1Video).tolerate_truncated);
        assert!(caps_for(CodecId::Mpeg2Video).tolerate_truncated);
        assert!(!caps_for(CodecId::H264).tolerate_truncated);

        assert!(caps_for(CodecId::Svq1).writes_input);
        assert!(caps_for(CodecId::Svq3).writes_input);
        assert!(!caps_for(CodecId::Mpeg4).writes_input);
    }

    #[test]
    fn kinds_match_codec_table() {
        assert_eq!(caps_for(CodecId::H264).kind, MediaKind::Video);
        assert_eq!(caps_for(CodecId::Aac).kind, MediaKind::Audio);
    }
}
