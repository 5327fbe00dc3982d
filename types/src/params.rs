/*!
    Negotiated stream parameters and output capabilities.
*/

use crate::{ChannelLayout, CodecId, MediaKind, PixelFormat, Rational, SampleFormat};

/**
    Video-specific stream parameters delivered by upstream negotiation.
*/
#[derive(Clone, Debug)]
pub struct VideoParams {
    /// Coded width in pixels.
    pub width: u32,
    /// Coded height in pixels.
    pub height: u32,
    /// Frame rate advertised upstream, if any.
    pub frame_rate: Option<Rational>,
    /// Pixel aspect ratio advertised upstream, if any. Used at output
    /// negotiation only when the engine does not report its own.
    pub pixel_aspect: Option<Rational>,
}

/**
    Audio-specific stream parameters delivered by upstream negotiation.
*/
#[derive(Clone, Debug)]
pub struct AudioParams {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
}

/**
    Kind-specific half of the stream parameters.
*/
#[derive(Clone, Debug)]
pub enum StreamDetail {
    /// Parameters of a video stream.
    Video(VideoParams),
    /// Parameters of an audio stream.
    Audio(AudioParams),
}

/**
    Everything the adapter needs to open a decode session: the codec, the
    kind-specific geometry, and out-of-band codec data.
*/
#[derive(Clone, Debug)]
pub struct StreamParams {
    /// Codec carried by the stream.
    pub codec: CodecId,
    /// Kind-specific parameters.
    pub detail: StreamDetail,
    /// Out-of-band codec configuration (sequence headers and the like).
    pub extradata: Option<Vec<u8>>,
}

impl StreamParams {
    /**
        Video stream parameters.
    */
    pub fn video(codec: CodecId, params: VideoParams) -> Self {
        StreamParams {
            codec,
            detail: StreamDetail::Video(params),
            extradata: None,
        }
    }

    /**
        Audio stream parameters.
    */
    pub fn audio(codec: CodecId, params: AudioParams) -> Self {
        StreamParams {
            codec,
            detail: StreamDetail::Audio(params),
            extradata: None,
        }
    }

    /**
        Attach out-of-band codec data.
    */
    pub fn with_extradata(mut self, extradata: Vec<u8>) -> Self {
        self.extradata = Some(extradata);
        self
    }

    /**
        The media kind these parameters describe.
    */
    pub fn kind(&self) -> MediaKind {
        match self.detail {
            StreamDetail::Video(_) => MediaKind::Video,
            StreamDetail::Audio(_) => MediaKind::Audio,
        }
    }

    /**
        Video half, if this is a video stream.
    */
    pub fn video_params(&self) -> Option<&VideoParams> {
        match &self.detail {
            StreamDetail::Video(v) => Some(v),
            StreamDetail::Audio(_) => None,
        }
    }

    /**
        Audio half, if this is an audio stream.
    */
    pub fn audio_params(&self) -> Option<&AudioParams> {
        match &self.detail {
            StreamDetail::Audio(a) => Some(a),
            StreamDetail::Video(_) => None,
        }
    }
}

/**
    The output shape offered to the downstream consumer, exchanged exactly
    once per format change.
*/
#[derive(Clone, Debug, PartialEq)]
pub enum OutputCaps {
    /// Decoded video shape.
    Video {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Pixel format of pushed frames.
        pixel_format: PixelFormat,
        /// Frame rate, when the engine reports one.
        frame_rate: Option<Rational>,
        /// Pixel aspect ratio, engine-reported or upstream-provided.
        pixel_aspect: Option<Rational>,
    },
    /// Decoded audio shape.
    Audio {
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Channel layout of pushed frames.
        channels: ChannelLayout,
        /// Sample format of pushed frames.
        sample_format: SampleFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_params_accessors() {
        let p = StreamParams::video(
            CodecId::H264,
            VideoParams {
                width: 1920,
                height: 1080,
                frame_rate: Some(Rational::new(30, 1)),
                pixel_aspect: None,
            },
        )
        .with_extradata(vec![0, 0, 0, 1]);

        assert_eq!(p.kind(), MediaKind::Video);
        assert_eq!(p.video_params().unwrap().width, 1920);
        assert!(p.audio_params().is_none());
        assert_eq!(p.extradata.as_deref(), Some(&[0u8, 0, 0, 1][..]));
    }

    #[test]
    fn audio_params_kind() {
        let p = StreamParams::audio(
            CodecId::Mp3,
            AudioParams {
                sample_rate: 44_100,
                channels: 2,
            },
        );
        assert_eq!(p.kind(), MediaKind::Audio);
        assert_eq!(p.audio_params().unwrap().channels, 2);
    }
}
