/*!
    Buffer-loan contract.

    Engines that can decode straight into caller-owned memory borrow
    buffers through this interface instead of smuggling references through
    unrelated picture fields. A loaned buffer is a moved value: it comes
    back exactly once, through [`FrameBufferPool::release`], or transfers
    onward with the output it carries.
*/

/**
    A buffer on loan from a pool.
*/
#[derive(Debug)]
pub struct LoanedBuffer {
    id: u64,
    /// Buffer contents; the engine writes decoded data here.
    pub data: Vec<u8>,
}

impl LoanedBuffer {
    /**
        Identity of the loan, stable for its lifetime.
    */
    pub fn id(&self) -> u64 {
        self.id
    }

    /**
        Take the contents, consuming the loan. Used when ownership of the
        decoded data transfers downstream instead of back to the pool.
    */
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/**
    Source of output buffers for engines that support caller-owned output.
*/
pub trait FrameBufferPool {
    /**
        Borrow a zeroed buffer of at least `size` bytes.
    */
    fn acquire(&mut self, size: usize) -> LoanedBuffer;

    /**
        Return a borrowed buffer.
    */
    fn release(&mut self, buffer: LoanedBuffer);
}

/**
    A plain heap-backed pool that recycles returned buffers.
*/
#[derive(Debug, Default)]
pub struct VecPool {
    next_id: u64,
    outstanding: usize,
    free: Vec<Vec<u8>>,
}

impl VecPool {
    /**
        Create an empty pool.
    */
    pub fn new() -> Self {
        VecPool::default()
    }

    /**
        Buffers currently on loan.
    */
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

impl FrameBufferPool for VecPool {
    fn acquire(&mut self, size: usize) -> LoanedBuffer {
        let mut data = self
            .free
            .iter()
            .position(|b| b.capacity() >= size)
            .map(|i| self.free.swap_remove(i))
            .unwrap_or_default();
        data.clear();
        data.resize(size, 0);

        let id = self.next_id;
        self.next_id += 1;
        self.outstanding += 1;
        LoanedBuffer { id, data }
    }

    fn release(&mut self, buffer: LoanedBuffer) {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.free.push(buffer.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_release_track_outstanding() {
        let mut pool = VecPool::new();
        let a = pool.acquire(64);
        let b = pool.acquire(16);
        assert_eq!(pool.outstanding(), 2);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.data.len(), 64);

        pool.release(a);
        pool.release(b);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn released_buffers_are_recycled() {
        let mut pool = VecPool::new();
        let a = pool.acquire(64);
        let ptr = a.data.as_ptr();
        pool.release(a);

        // A smaller request reuses the returned allocation.
        let b = pool.acquire(32);
        assert_eq!(b.data.as_ptr(), ptr);
        assert_eq!(b.data.len(), 32);
        assert!(b.data.iter().all(|&x| x == 0));
    }

    #[test]
    fn loan_transfers_out_with_into_data() {
        let mut pool = VecPool::new();
        let a = pool.acquire(8);
        // Ownership moves downstream; the pool never sees it again.
        let data = a.into_data();
        assert_eq!(data.len(), 8);
        assert_eq!(pool.outstanding(), 1);
    }
}
