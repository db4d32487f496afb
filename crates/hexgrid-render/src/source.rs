#![forbid(unsafe_code)]

//! Byte source contract.
//!
//! The grid never owns the bytes it shows. A source must keep a stable
//! length for its lifetime and answer [`ByteSource::byte_at`] in
//! effectively constant time; slow sources degrade interactivity but not
//! correctness. Offsets outside `[0, len)` are a caller bug, and the row
//! slicer's clipping exists so that such calls never happen.

use std::sync::Arc;

/// Read-only random access to a byte sequence.
pub trait ByteSource {
    /// Total number of bytes.
    fn len(&self) -> u64;

    /// Byte at `offset`, which must be `< len()`.
    fn byte_at(&self, offset: u64) -> u8;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `out.len()` bytes starting at `offset` into `out`.
    fn read_into(&self, offset: u64, out: &mut [u8]) {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.byte_at(offset + i as u64);
        }
    }
}

impl ByteSource for [u8] {
    #[inline]
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    #[inline]
    fn byte_at(&self, offset: u64) -> u8 {
        self[offset as usize]
    }

    fn read_into(&self, offset: u64, out: &mut [u8]) {
        let start = offset as usize;
        out.copy_from_slice(&self[start..start + out.len()]);
    }
}

impl ByteSource for Vec<u8> {
    #[inline]
    fn len(&self) -> u64 {
        self.as_slice().len() as u64
    }

    #[inline]
    fn byte_at(&self, offset: u64) -> u8 {
        self.as_slice().byte_at(offset)
    }

    fn read_into(&self, offset: u64, out: &mut [u8]) {
        self.as_slice().read_into(offset, out);
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    #[inline]
    fn len(&self) -> u64 {
        (**self).len()
    }

    #[inline]
    fn byte_at(&self, offset: u64) -> u8 {
        (**self).byte_at(offset)
    }

    fn read_into(&self, offset: u64, out: &mut [u8]) {
        (**self).read_into(offset, out);
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    #[inline]
    fn len(&self) -> u64 {
        (**self).len()
    }

    #[inline]
    fn byte_at(&self, offset: u64) -> u8 {
        (**self).byte_at(offset)
    }

    fn read_into(&self, offset: u64, out: &mut [u8]) {
        (**self).read_into(offset, out);
    }
}

impl<T: ByteSource + ?Sized> ByteSource for Arc<T> {
    #[inline]
    fn len(&self) -> u64 {
        (**self).len()
    }

    #[inline]
    fn byte_at(&self, offset: u64) -> u8 {
        (**self).byte_at(offset)
    }

    fn read_into(&self, offset: u64, out: &mut [u8]) {
        (**self).read_into(offset, out);
    }
}
