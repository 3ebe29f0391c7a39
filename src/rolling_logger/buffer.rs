// -- buffer.rs --

use {
    crossbeam_channel::{bounded, Receiver, Sender},
    std::fmt,
};

// --

const DIGITS: &[u8; 10] = b"0123456789";

/// Buffers that grew beyond this are dropped instead of going back to the pool.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

const DEFAULT_POOL_CAPACITY: usize = 64;

/// Bytes of one record under construction, plus scratch space for digits.
pub struct LineBuffer {
    bytes: Vec<u8>,
    pub(crate) tmp: [u8; 29],
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(256),
            tmp: [0; 29],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn push(&mut self, b: u8) {
        self.bytes.push(b);
    }

    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.tmp = [0; 29];
    }

    /// Appends a newline unless the content already ends with one.
    pub fn ensure_newline(&mut self) {
        if self.bytes.last() != Some(&b'\n') {
            self.bytes.push(b'\n');
        }
    }

    /// Appends `tmp[..n]` to the content.
    pub(crate) fn flush_tmp(&mut self, n: usize) {
        self.bytes.extend_from_slice(&self.tmp[..n]);
    }

    /// Zero-padded two-digit integer at `tmp[i]`.
    pub(crate) fn two_digits(&mut self, i: usize, d: u32) {
        self.tmp[i + 1] = DIGITS[(d % 10) as usize];
        self.tmp[i] = DIGITS[(d / 10 % 10) as usize];
    }

    /// `n`-digit integer at `tmp[i]`, left-padded with `pad`.
    pub(crate) fn n_digits(&mut self, n: usize, i: usize, mut d: u32, pad: u8) {
        let mut j = n;
        while j > 0 && d > 0 {
            j -= 1;
            self.tmp[i + j] = DIGITS[(d % 10) as usize];
            d /= 10;
        }
        while j > 0 {
            j -= 1;
            self.tmp[i + j] = pad;
        }
    }

    /// Minimal-width integer at `tmp[i]`, returns the number of digits.
    pub(crate) fn some_digits(&mut self, i: usize, mut d: u32) -> usize {
        // print into the top, then copy down; u32 needs at most 10 digits
        let mut j = self.tmp.len();
        loop {
            j -= 1;
            self.tmp[j] = DIGITS[(d % 10) as usize];
            d /= 10;
            if d == 0 {
                break;
            }
        }
        let n = self.tmp.len() - j;
        self.tmp.copy_within(j.., i);
        n
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for LineBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.bytes.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

// --

/// A bounded free list of [`LineBuffer`]s.
///
/// Clones share the same free list. Acquire and release never block and
/// need no outside lock.
#[derive(Clone)]
pub struct BufferPool {
    tx: Sender<LineBuffer>,
    rx: Receiver<LineBuffer>,
}

impl BufferPool {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity.max(1));
        Self { tx, rx }
    }

    /// An empty buffer, recycled when one is available.
    pub fn acquire(&self) -> LineBuffer {
        self.rx.try_recv().unwrap_or_else(|_| LineBuffer::new())
    }

    /// Clears `buf` and keeps it for reuse, or drops it when the pool is full.
    pub fn release(&self, mut buf: LineBuffer) {
        if buf.capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        buf.clear();
        let _ = self.tx.try_send(buf);
    }

    /// Number of idle buffers.
    pub fn idle(&self) -> usize {
        self.rx.len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

// --

#[cfg(test)]
mod tests {
    use {super::*, std::fmt::Write, std::sync::Arc, std::thread};

    #[test]
    fn digits() {
        let mut b = LineBuffer::new();
        b.two_digits(0, 7);
        b.n_digits(6, 2, 123, b'0');
        b.flush_tmp(8);
        assert_eq!(b.as_bytes(), b"07000123");

        b.clear();
        let n = b.some_digits(1, 4_294_967_295);
        assert_eq!(n, 10);
        assert_eq!(&b.tmp[1..11], b"4294967295");

        let n = b.some_digits(0, 0);
        assert_eq!(n, 1);
        assert_eq!(b.tmp[0], b'0');
    }

    #[test]
    fn ensure_newline_once() {
        let mut b = LineBuffer::new();
        b.write_str("x\n").unwrap();
        b.ensure_newline();
        assert_eq!(b.as_bytes(), b"x\n");

        b.clear();
        b.write_str("x").unwrap();
        b.ensure_newline();
        assert_eq!(b.as_bytes(), b"x\n");
    }

    #[test]
    fn released_buffers_are_cleared() {
        let pool = BufferPool::new(4);
        let mut b = pool.acquire();
        b.write_str("left over from the last record").unwrap();
        pool.release(b);
        assert_eq!(pool.idle(), 1);

        let b = pool.acquire();
        assert!(b.is_empty());
        assert!(b.capacity() >= 30);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn full_pool_drops_buffers() {
        let pool = BufferPool::new(1);
        pool.release(LineBuffer::new());
        pool.release(LineBuffer::new());
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn oversized_buffers_are_not_retained() {
        let pool = BufferPool::new(2);
        let mut b = pool.acquire();
        b.extend_from_slice(&vec![b'x'; MAX_RETAINED_CAPACITY + 1]);
        pool.release(b);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn concurrent_acquire_release() {
        let pool = Arc::new(BufferPool::new(8));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        let mut b = pool.acquire();
                        assert!(b.is_empty());
                        write!(b, "thread {}", i).unwrap();
                        pool.release(b);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(pool.idle() <= 8);
    }
}
