/*!
    Decoded output frames.
*/

use crate::{ClockTime, PixelFormat, SampleFormat};

/**
    A decoded video picture.

    Data is packed (stride-free), planes in order, sized exactly to
    `format.buffer_size(width, height)`.
*/
#[derive(Clone, Debug)]
pub struct VideoFrame {
    /// Packed pixel data.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: PixelFormat,
    /// Presentation timestamp, when derivable.
    pub pts: Option<ClockTime>,
    /// Display duration, when derivable.
    pub duration: Option<ClockTime>,
}

impl VideoFrame {
    /**
        Create a new video frame.
    */
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
        pts: Option<ClockTime>,
        duration: Option<ClockTime>,
    ) -> Self {
        VideoFrame {
            data,
            width,
            height,
            format,
            pts,
            duration,
        }
    }
}

/**
    A run of decoded audio samples, interleaved.
*/
#[derive(Clone, Debug)]
pub struct AudioFrame {
    /// Interleaved sample data.
    pub data: Vec<u8>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Sample format.
    pub format: SampleFormat,
    /// Presentation timestamp, when derivable.
    pub pts: Option<ClockTime>,
    /// Play duration, when derivable.
    pub duration: Option<ClockTime>,
}

impl AudioFrame {
    /**
        Create a new audio frame.
    */
    pub fn new(
        data: Vec<u8>,
        sample_rate: u32,
        channels: u16,
        format: SampleFormat,
        pts: Option<ClockTime>,
        duration: Option<ClockTime>,
    ) -> Self {
        AudioFrame {
            data,
            sample_rate,
            channels,
            format,
            pts,
            duration,
        }
    }

    /**
        Sample frames in this buffer (one frame = one sample per channel).
    */
    pub fn sample_frames(&self) -> usize {
        let frame_bytes = self.format.bytes_per_sample() * self.channels as usize;
        if frame_bytes == 0 {
            return 0;
        }
        self.data.len() / frame_bytes
    }
}

/**
    A decoded unit handed to the downstream consumer.
*/
#[derive(Clone, Debug)]
pub enum DecodedFrame {
    /// A video picture.
    Video(VideoFrame),
    /// An audio buffer.
    Audio(AudioFrame),
}

impl DecodedFrame {
    /**
        Presentation timestamp, when stamped.
    */
    pub fn pts(&self) -> Option<ClockTime> {
        match self {
            DecodedFrame::Video(f) => f.pts,
            DecodedFrame::Audio(f) => f.pts,
        }
    }

    /**
        Duration, when stamped.
    */
    pub fn duration(&self) -> Option<ClockTime> {
        match self {
            DecodedFrame::Video(f) => f.duration,
            DecodedFrame::Audio(f) => f.duration,
        }
    }

    /**
        Raw payload bytes.
    */
    pub fn payload(&self) -> &[u8] {
        match self {
            DecodedFrame::Video(f) => &f.data,
            DecodedFrame::Audio(f) => &f.data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_frame_sample_frames() {
        // 16 bytes of interleaved stereo S16 is 4 sample frames.
        let f = AudioFrame::new(vec![0u8; 16], 48_000, 2, SampleFormat::S16, None, None);
        assert_eq!(f.sample_frames(), 4);
    }

    #[test]
    fn decoded_frame_accessors() {
        let v = VideoFrame::new(
            vec![0u8; 24],
            4,
            2,
            PixelFormat::Rgb24,
            Some(ClockTime::from_secs(1)),
            None,
        );
        let d = DecodedFrame::Video(v);
        assert_eq!(d.pts(), Some(ClockTime::from_secs(1)));
        assert_eq!(d.duration(), None);
        assert_eq!(d.payload().len(), 24);
    }
}
