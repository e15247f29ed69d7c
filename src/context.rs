use core::convert;

#[cfg(feature = "std")]
use std::io;

use crate::compress::{compress, INITIAL_STATE};
use crate::{Digest, Error, Result, BLOCK_LEN, DIGEST_LEN};

// Offset of the 64-bit length field inside the final block.
const LENGTH_OFFSET: usize = BLOCK_LEN - 8;

/// A context.
///
/// Absorbs input in arbitrary chunks and produces a [`Digest`] on demand.
/// Producing a digest resets the context, so it can be reused right away.
#[derive(Clone, Debug)]
pub struct Context {
    state: [u32; 4],
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
    total: u64,
}

impl Context {
    /// Create a context for computing a digest.
    #[inline]
    pub fn new() -> Context {
        Context {
            state: INITIAL_STATE,
            buffer: [0; BLOCK_LEN],
            buffered: 0,
            total: 0,
        }
    }

    /// Number of bytes absorbed since creation or the last reset, modulo 2^64.
    #[inline]
    pub fn total_bytes(&self) -> u64 {
        self.total
    }

    /// Number of bytes waiting in the partial block (always below 64).
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.buffered
    }

    /// Consume data.
    pub fn update<T: AsRef<[u8]>>(&mut self, data: T) {
        let mut data = data.as_ref();
        self.total = self.total.wrapping_add(data.len() as u64);

        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];
            if self.buffered < BLOCK_LEN {
                return;
            }
            self.state = compress(self.state, &self.buffer);
            self.buffered = 0;
        }

        let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
        for block in blocks {
            self.state = compress(self.state, block);
        }
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Consume a single byte.
    #[inline]
    pub fn update_byte(&mut self, byte: u8) {
        self.total = self.total.wrapping_add(1);
        self.buffer[self.buffered] = byte;
        self.buffered += 1;
        if self.buffered == BLOCK_LEN {
            self.state = compress(self.state, &self.buffer);
            self.buffered = 0;
        }
    }

    /// Consume `length` bytes of `data` starting at `offset`.
    ///
    /// Fails without touching the context when the region does not fit
    /// inside `data`.
    pub fn update_range(&mut self, data: &[u8], offset: usize, length: usize) -> Result<()> {
        let region = offset
            .checked_add(length)
            .and_then(|end| data.get(offset..end))
            .ok_or_else(|| {
                log::debug!(
                    "rejected update of {length} bytes at offset {offset} from {} bytes",
                    data.len()
                );
                Error::BufferBounds {
                    offset,
                    length,
                    available: data.len(),
                }
            })?;
        self.update(region);
        Ok(())
    }

    /// Finalize, write the digest into `output[offset..offset + 16]` and reset.
    ///
    /// `length` is the room the caller set aside for the digest; it must be
    /// at least 16 since partial digests are never returned. Exactly 16 bytes
    /// are written and 16 is returned. On error the context is unchanged.
    pub fn digest_into(&mut self, output: &mut [u8], offset: usize, length: usize) -> Result<usize> {
        if length < DIGEST_LEN {
            log::debug!("rejected digest into {length} bytes");
            return Err(Error::PartialDigestUnsupported { length });
        }
        let available = output.len().saturating_sub(offset);
        if available < DIGEST_LEN {
            log::debug!("rejected digest at offset {offset} with {available} bytes of room");
            return Err(Error::InsufficientOutputSpace { offset, available });
        }
        let digest = self.digest();
        output[offset..offset + DIGEST_LEN].copy_from_slice(&digest.0);
        Ok(DIGEST_LEN)
    }

    /// Finalize, return the digest and reset.
    pub fn digest(&mut self) -> Digest {
        let (state, compressions) = self.finish();
        log::trace!(
            "finalized {} bytes with {compressions} closing compression(s)",
            self.total
        );
        self.reset();
        Digest(serialize(state))
    }

    /// Finalize and return the digest.
    #[inline]
    pub fn compute(mut self) -> Digest {
        self.digest()
    }

    /// Return to the creation-time state, discarding any absorbed input.
    pub fn reset(&mut self) {
        self.state = INITIAL_STATE;
        self.buffer = [0; BLOCK_LEN];
        self.buffered = 0;
        self.total = 0;
    }

    // Pads the pending block, appends the bit length and compresses. Returns
    // the final state and how many blocks were compressed (one or two).
    fn finish(&mut self) -> ([u32; 4], usize) {
        let mut state = self.state;
        let mut compressions = 1;
        let cursor = self.buffered;

        self.buffer[cursor] = 0x80;
        self.buffer[cursor + 1..].fill(0);
        if cursor >= LENGTH_OFFSET {
            // No room left for the length field.
            state = compress(state, &self.buffer);
            self.buffer.fill(0);
            compressions += 1;
        }

        let bits = self.total.wrapping_mul(8);
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&bits.to_le_bytes());
        state = compress(state, &self.buffer);

        (state, compressions)
    }
}

fn serialize(state: [u32; 4]) -> [u8; DIGEST_LEN] {
    let mut output = [0u8; DIGEST_LEN];
    for (chunk, word) in output.chunks_exact_mut(4).zip(state) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    output
}

impl Default for Context {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl convert::From<Context> for Digest {
    #[inline]
    fn from(context: Context) -> Digest {
        context.compute()
    }
}

#[cfg(feature = "std")]
impl io::Write for Context {
    #[inline]
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.update(data);
        Ok(data.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
