/*!
    Pending-data cache between chain invocations.
*/

use bytes::{Bytes, BytesMut};
use streamdec_types::{Chunk, Error, Result};

/**
    Holds at most one pending partial buffer between chain invocations.

    When parser-driven framing leaves trailing bytes that do not form a
    complete coded frame, they wait here and are joined onto the front of
    the next chunk before any parsing happens.
*/
#[derive(Debug, Default)]
pub struct FrameCache {
    pending: Option<Bytes>,
}

impl FrameCache {
    /**
        Create an empty cache.
    */
    pub fn new() -> Self {
        FrameCache::default()
    }

    /**
        Join pending bytes (if any) in front of `chunk` and clear the
        pending slot.

        The result keeps the incoming chunk's timestamp and duration:
        pending bytes are untimed remainders of an earlier chunk, so the
        new chunk's timing is the only timing there is.
    */
    pub fn absorb(&mut self, chunk: Chunk) -> Chunk {
        match self.pending.take() {
            Some(pending) => {
                log::debug!(
                    "[cache] joining {} pending bytes with chunk of {}",
                    pending.len(),
                    chunk.len()
                );
                let mut joined = BytesMut::with_capacity(pending.len() + chunk.data.len());
                joined.extend_from_slice(&pending);
                joined.extend_from_slice(&chunk.data);
                Chunk {
                    data: joined.freeze(),
                    pts: chunk.pts,
                    duration: chunk.duration,
                }
            }
            None => chunk,
        }
    }

    /**
        Store trailing bytes left over by framing.

        The slot must be empty and the remainder non-empty: `absorb` drains
        the slot at the start of every chain call, so a second store in the
        same call is a contract breach.
    */
    pub fn store(&mut self, remainder: Bytes) -> Result<()> {
        if self.pending.is_some() {
            return Err(Error::invariant("pending buffer already present"));
        }
        if remainder.is_empty() {
            return Err(Error::invariant("pending buffer must not be empty"));
        }
        log::debug!("[cache] keeping {} bytes of trailing data", remainder.len());
        self.pending = Some(remainder);
        Ok(())
    }

    /**
        Drop any pending bytes.
    */
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /**
        True when a pending buffer is held.
    */
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /**
        Bytes currently pending.
    */
    pub fn pending_len(&self) -> usize {
        self.pending.as_ref().map_or(0, Bytes::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamdec_types::ClockTime;

    #[test]
    fn absorb_without_pending_passes_chunk_through() {
        let mut cache = FrameCache::new();
        let chunk = Chunk::new(vec![1u8, 2, 3]).with_pts(ClockTime::from_secs(1));
        let out = cache.absorb(chunk);
        assert_eq!(&out.data[..], &[1, 2, 3]);
        assert_eq!(out.pts, Some(ClockTime::from_secs(1)));
        assert!(!cache.has_pending());
    }

    #[test]
    fn absorb_joins_pending_in_stream_order() {
        let mut cache = FrameCache::new();
        cache.store(Bytes::from_static(&[1, 2])).unwrap();

        let chunk = Chunk::new(vec![3u8, 4]).with_pts(ClockTime::from_secs(7));
        let out = cache.absorb(chunk);
        assert_eq!(&out.data[..], &[1, 2, 3, 4]);
        // The joined buffer keeps the new chunk's timing.
        assert_eq!(out.pts, Some(ClockTime::from_secs(7)));
        assert!(!cache.has_pending());
    }

    #[test]
    fn double_store_is_an_invariant_violation() {
        let mut cache = FrameCache::new();
        cache.store(Bytes::from_static(&[1])).unwrap();
        let err = cache.store(Bytes::from_static(&[2])).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        // The original pending buffer is untouched.
        assert_eq!(cache.pending_len(), 1);
    }

    #[test]
    fn empty_store_is_an_invariant_violation() {
        let mut cache = FrameCache::new();
        let err = cache.store(Bytes::new()).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        assert!(!cache.has_pending());
    }

    #[test]
    fn clear_empties_the_slot() {
        let mut cache = FrameCache::new();
        cache.store(Bytes::from_static(&[1, 2, 3])).unwrap();
        cache.clear();
        assert!(!cache.has_pending());
        assert_eq!(cache.pending_len(), 0);
    }
}
