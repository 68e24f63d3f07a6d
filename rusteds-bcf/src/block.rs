//! Linear byte stream over a lazy block sequence.

use crate::byteops;
use crate::error::{Error, Result};

/// A forward-only cursor over a sequence of byte blocks.
///
/// Presents the blocks as one contiguous stream: whenever a read would
/// run past the buffered bytes, the residue ahead of the cursor is
/// stitched onto the next raw block and the cursor resets to zero, so
/// every primitive read sees a contiguous slice even across block seams.
/// Blocks are pulled from the iterator only when a read needs them.
#[derive(Debug)]
pub struct BlockReader<I> {
    blocks: I,
    buf: Vec<u8>,
    offset: usize,
}

impl<I: Iterator<Item = Vec<u8>>> BlockReader<I> {
    /// Creates a reader over a block sequence.
    pub fn new(blocks: I) -> Self {
        Self {
            blocks,
            buf: Vec::new(),
            offset: 0,
        }
    }

    /// Bytes buffered ahead of the cursor.
    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Fetches blocks until `needed` bytes sit ahead of the cursor.
    fn ensure(&mut self, needed: usize) -> Result<()> {
        while self.remaining() < needed {
            let Some(block) = self.blocks.next() else {
                return Err(Error::StreamExhausted {
                    needed,
                    available: self.remaining(),
                });
            };
            if self.offset == self.buf.len() {
                self.buf = block;
            } else {
                self.buf.drain(..self.offset);
                self.buf.extend_from_slice(&block);
            }
            self.offset = 0;
        }
        Ok(())
    }

    /// Positions the cursor at an absolute offset within the stream head.
    ///
    /// Only meaningful before any read has consumed bytes; used once per
    /// stream to hop the fixed header prologue.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        self.ensure(offset)?;
        self.offset = offset;
        Ok(())
    }

    /// Advances the cursor by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.offset += n;
        Ok(())
    }

    /// Reads the next byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let value = self.buf[self.offset];
        self.offset += 1;
        Ok(value)
    }

    /// Reads the next little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        let value = byteops::le_u16(&self.buf[self.offset..]);
        self.offset += 2;
        Ok(value)
    }

    /// Reads the next little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let value = byteops::le_u32(&self.buf[self.offset..]);
        self.offset += 4;
        Ok(value)
    }

    /// Reads the next eight-byte field as its low 40 bits.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        let value = byteops::le_u64(&self.buf[self.offset..]);
        self.offset += 8;
        Ok(value)
    }

    /// Borrows the next `n` bytes and advances past them.
    ///
    /// The slice stays valid until the next call that may fetch a block.
    pub fn take(&mut self, n: usize) -> Result<&[u8]> {
        self.ensure(n)?;
        let slice = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }
}
