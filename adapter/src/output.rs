/*!
    Output materialization: allocating, packing and stamping decoded units.
*/

use streamdec_engine::{
    AudioAttributes, EngineAttributes, RawOutput, RawPicture, RawSamples, VideoAttributes,
};
use streamdec_types::{
    AudioFrame, ChannelLayout, Chunk, ClockTime, DecodedFrame, Error, OutputCaps, Rational,
    Result, VideoFrame,
};

use crate::sink::Downstream;

/**
    Turns raw engine output into stamped frames and hands them downstream.

    One materializer lives for one chain invocation. It owns the timestamp
    cursor: seeded from the chunk's timestamp, advanced by each audio
    unit's duration so that several outputs cut from one chunk line up
    back-to-back. Video keeps the cursor where it is.
*/
pub(crate) struct Materializer<'a> {
    downstream: &'a mut dyn Downstream,
    negotiated: &'a mut bool,
    par_hint: Option<Rational>,
    fallback_duration: Option<ClockTime>,
    cursor: Option<ClockTime>,
}

impl<'a> Materializer<'a> {
    pub fn new(
        downstream: &'a mut dyn Downstream,
        negotiated: &'a mut bool,
        par_hint: Option<Rational>,
        chunk: &Chunk,
    ) -> Self {
        Materializer {
            downstream,
            negotiated,
            par_hint,
            fallback_duration: chunk.duration,
            cursor: chunk.pts,
        }
    }

    /**
        Materialize one raw output. Returns true when a unit was pushed
        downstream (false when it was dropped softly).
    */
    pub fn emit(&mut self, raw: RawOutput, attrs: &EngineAttributes) -> Result<bool> {
        match raw {
            RawOutput::Video(picture) => {
                let video = attrs
                    .video
                    .as_ref()
                    .ok_or_else(|| Error::malformed("video output without video attributes"))?;
                let frame = self.stamp_video(picture, video)?;
                self.ensure_negotiated_video(video)?;
                self.deliver(DecodedFrame::Video(frame))
            }
            RawOutput::Audio(samples) => {
                let audio = attrs
                    .audio
                    .as_ref()
                    .ok_or_else(|| Error::malformed("audio output without audio attributes"))?;
                let Some(frame) = self.stamp_audio(samples, audio)? else {
                    return Ok(false);
                };
                self.ensure_negotiated_audio(audio)?;
                self.deliver(DecodedFrame::Audio(frame))
            }
        }
    }

    /**
        Pack the engine's strided picture into an exact-size buffer and
        derive its timing.
    */
    fn stamp_video(&mut self, picture: RawPicture, video: &VideoAttributes) -> Result<VideoFrame> {
        let size = video.pixel_format.buffer_size(video.width, video.height);
        let mut data = vec![0u8; size];
        pack_picture(&picture, video, &mut data)?;

        // Timestamp only when the input was timed and the engine knows a
        // frame rate; otherwise inherit the chunk's duration.
        let frame_duration = video.frame_rate.and_then(ClockTime::from_frame_rate);
        let (pts, duration) = match (self.cursor, frame_duration) {
            (Some(ts), Some(d)) => (Some(ts), Some(d)),
            _ => (None, self.fallback_duration),
        };

        Ok(VideoFrame::new(
            data,
            video.width,
            video.height,
            video.pixel_format,
            pts,
            duration,
        ))
    }

    /**
        Wrap an engine sample run and derive its timing, advancing the
        cursor. Returns `Ok(None)` for an empty run.
    */
    fn stamp_audio(
        &mut self,
        samples: RawSamples,
        audio: &AudioAttributes,
    ) -> Result<Option<AudioFrame>> {
        if samples.sample_count < 0 {
            return Err(Error::malformed(format!(
                "engine reported negative sample count ({})",
                samples.sample_count
            )));
        }
        if samples.sample_count == 0 || samples.data.is_empty() {
            log::debug!("[output] empty audio output; dropping");
            return Ok(None);
        }
        if audio.channels == 0 || audio.sample_rate == 0 {
            return Err(Error::malformed("engine reports no channels or sample rate"));
        }

        let (pts, duration) = match self.cursor {
            Some(ts) => {
                let nanos = samples.sample_count as u64 * ClockTime::SECOND.nanos()
                    / (audio.channels as u64 * audio.sample_rate as u64);
                let d = ClockTime::from_nanos(nanos);
                self.cursor = Some(ts + d);
                (Some(ts), Some(d))
            }
            None => (None, None),
        };

        Ok(Some(AudioFrame::new(
            samples.data,
            audio.sample_rate,
            audio.channels,
            audio.sample_format,
            pts,
            duration,
        )))
    }

    fn ensure_negotiated_video(&mut self, video: &VideoAttributes) -> Result<()> {
        if *self.negotiated {
            return Ok(());
        }
        // Prefer the engine-reported aspect ratio: it comes from the
        // bitstream, which is more often correct than upstream metadata.
        let pixel_aspect = match video.aspect_ratio.filter(|r| r.is_positive()) {
            Some(par) => {
                log::debug!("[output] negotiating with engine-reported pixel aspect ratio");
                Some(par)
            }
            None => {
                if self.par_hint.is_some() {
                    log::debug!("[output] negotiating with upstream pixel aspect ratio");
                }
                self.par_hint
            }
        };
        let caps = OutputCaps::Video {
            width: video.width,
            height: video.height,
            pixel_format: video.pixel_format,
            frame_rate: video.frame_rate,
            pixel_aspect,
        };
        self.offer(&caps)
    }

    fn ensure_negotiated_audio(&mut self, audio: &AudioAttributes) -> Result<()> {
        if *self.negotiated {
            return Ok(());
        }
        let caps = OutputCaps::Audio {
            sample_rate: audio.sample_rate,
            channels: ChannelLayout::from_count(audio.channels),
            sample_format: audio.sample_format,
        };
        self.offer(&caps)
    }

    fn offer(&mut self, caps: &OutputCaps) -> Result<()> {
        if !self.downstream.negotiate(caps) {
            log::error!("[output] failed to negotiate decoded output with downstream");
            return Err(Error::negotiation("downstream refused decoded output shape"));
        }
        *self.negotiated = true;
        Ok(())
    }

    fn deliver(&mut self, frame: DecodedFrame) -> Result<bool> {
        if !self.downstream.usable() {
            log::debug!("[output] downstream not usable; dropping unit");
            return Ok(false);
        }
        match self.downstream.push(frame) {
            Ok(()) => Ok(true),
            Err(e) => {
                log::warn!("[output] downstream push failed: {}", e);
                Ok(false)
            }
        }
    }
}

/**
    Copy a strided picture into a packed destination buffer, plane by
    plane.
*/
fn pack_picture(picture: &RawPicture, video: &VideoAttributes, dst: &mut [u8]) -> Result<()> {
    let geometry = video.pixel_format.plane_geometry(video.width, video.height);
    if picture.planes.len() != geometry.len() {
        return Err(Error::malformed(format!(
            "engine produced {} planes, format {:?} has {}",
            picture.planes.len(),
            video.pixel_format,
            geometry.len()
        )));
    }

    let mut offset = 0;
    for (plane, geo) in picture.planes.iter().zip(&geometry) {
        let row_bytes = geo.row_bytes();
        if plane.stride < row_bytes {
            return Err(Error::malformed("plane stride shorter than row"));
        }
        for row in 0..geo.height {
            let src_start = row * plane.stride;
            let src_end = src_start + row_bytes;
            if src_end > plane.data.len() {
                return Err(Error::malformed("plane data shorter than geometry"));
            }
            dst[offset..offset + row_bytes].copy_from_slice(&plane.data[src_start..src_end]);
            offset += row_bytes;
        }
    }
    Ok(())
}
