/*!
    Codec identifiers.
*/

/**
    The kind of media a stream carries.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Moving pictures.
    Video,
    /// Sampled sound.
    Audio,
}

/**
    Codecs the adapter knows how to drive.

    This is the set of compressed formats the capability table describes.
    Raw video and PCM audio never pass through the adapter (they need no
    decode step), so they have no identifier here.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecId {
    /// MPEG-1 video.
    Mpeg1Video,
    /// MPEG-2 video.
    Mpeg2Video,
    /// MPEG-4 part 2 video.
    Mpeg4,
    /// H.263 video.
    H263,
    /// H.264 / AVC video.
    H264,
    /// Motion JPEG video.
    Mjpeg,
    /// Sorenson Video 1.
    Svq1,
    /// Sorenson Video 3.
    Svq3,
    /// MPEG audio layer II.
    Mp2,
    /// MPEG audio layer III.
    Mp3,
    /// Advanced Audio Coding.
    Aac,
    /// Dolby AC-3.
    Ac3,
}

impl CodecId {
    /**
        The media kind this codec decodes to.
    */
    pub const fn kind(self) -> MediaKind {
        match self {
            CodecId::Mpeg1Video
            | CodecId::Mpeg2Video
            | CodecId::Mpeg4
            | CodecId::H263
            | CodecId::H264
            | CodecId::Mjpeg
            | CodecId::Svq1
            | CodecId::Svq3 => MediaKind::Video,
            CodecId::Mp2 | CodecId::Mp3 | CodecId::Aac | CodecId::Ac3 => MediaKind::Audio,
        }
    }

    /**
        Short lowercase name, for log messages.
    */
    pub const fn name(self) -> &'static str {
        match self {
            CodecId::Mpeg1Video => "mpeg1video",
            CodecId::Mpeg2Video => "mpeg2video",
            CodecId::Mpeg4 => "mpeg4",
            CodecId::H263 => "h263",
            CodecId::H264 => "h264",
            CodecId::Mjpeg => "mjpeg",
            CodecId::Svq1 => "svq1",
            CodecId::Svq3 => "svq3",
            CodecId::Mp2 => "mp2",
            CodecId::Mp3 => "mp3",
            CodecId::Aac => "aac",
            CodecId::Ac3 => "ac3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_kind() {
        assert_eq!(CodecId::H264.kind(), MediaKind::Video);
        assert_eq!(CodecId::Mjpeg.kind(), MediaKind::Video);
        assert_eq!(CodecId::Mp3.kind(), MediaKind::Audio);
        assert_eq!(CodecId::Aac.kind(), MediaKind::Audio);
    }

    #[test]
    fn codec_name() {
        assert_eq!(CodecId::Mpeg1Video.name(), "mpeg1video");
        assert_eq!(CodecId::Ac3.name(), "ac3");
    }
}
