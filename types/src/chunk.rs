/*!
    Input chunks.
*/

use bytes::Bytes;

use crate::ClockTime;

/**
    One delivery of encoded bytes from upstream.

    Chunk boundaries carry no meaning: a chunk may hold a fraction of a
    coded frame, several frames, or a frame split across its neighbours.
    The timestamp and duration are optional; upstream elements frequently
    deliver untimed data.
*/
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Encoded payload.
    pub data: Bytes,
    /// Presentation timestamp of the first coded unit starting in this
    /// chunk, when known.
    pub pts: Option<ClockTime>,
    /// Duration covered by this chunk, when known.
    pub duration: Option<ClockTime>,
}

impl Chunk {
    /**
        Create an untimed chunk.
    */
    pub fn new(data: impl Into<Bytes>) -> Self {
        Chunk {
            data: data.into(),
            pts: None,
            duration: None,
        }
    }

    /**
        Attach a presentation timestamp.
    */
    pub fn with_pts(mut self, pts: ClockTime) -> Self {
        self.pts = Some(pts);
        self
    }

    /**
        Attach a duration.
    */
    pub fn with_duration(mut self, duration: ClockTime) -> Self {
        self.duration = Some(duration);
        self
    }

    /**
        Payload length in bytes.
    */
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /**
        True when the chunk carries no bytes.
    */
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_builders() {
        let c = Chunk::new(vec![1u8, 2, 3])
            .with_pts(ClockTime::from_secs(2))
            .with_duration(ClockTime::MSECOND);
        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
        assert_eq!(c.pts, Some(ClockTime::from_secs(2)));
        assert_eq!(c.duration, Some(ClockTime::MSECOND));
    }

    #[test]
    fn untimed_by_default() {
        let c = Chunk::new(Bytes::new());
        assert!(c.is_empty());
        assert_eq!(c.pts, None);
        assert_eq!(c.duration, None);
    }
}
