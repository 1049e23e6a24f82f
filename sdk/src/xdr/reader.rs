use super::{padding_for, XdrDecode, XdrError};

/// Cursor over a borrowed XDR buffer.
///
/// A successful read leaves the cursor just past the bytes it consumed.
#[derive(Debug, Clone)]
pub struct XdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> XdrReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Starts reading at `cursor`, which may equal `buf.len()` but not exceed it.
    pub fn at(buf: &'a [u8], cursor: usize) -> Result<Self, XdrError> {
        if cursor > buf.len() {
            return Err(XdrError::UnexpectedEof {
                offset: cursor,
                needed: 0,
                remaining: 0,
            });
        }
        Ok(Self { buf, pos: cursor })
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Succeeds only if every byte has been consumed.
    pub fn finish(&self) -> Result<(), XdrError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(XdrError::TrailingBytes(n)),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], XdrError> {
        if self.remaining() < n {
            return Err(XdrError::UnexpectedEof {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        self.skip_padding(N)?;
        Ok(out)
    }

    pub fn read_u32(&mut self) -> Result<u32, XdrError> {
        let mut b = [0u8; 4];
        b.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(b))
    }

    pub fn read_i32(&mut self) -> Result<i32, XdrError> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64, XdrError> {
        let mut b = [0u8; 8];
        b.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(b))
    }

    pub fn read_i64(&mut self) -> Result<i64, XdrError> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_bool(&mut self) -> Result<bool, XdrError> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(XdrError::InvalidBool(other)),
        }
    }

    /// Fixed-length opaque of `len` bytes, followed by zero padding.
    pub fn read_fixed_opaque(&mut self, len: usize) -> Result<Vec<u8>, XdrError> {
        let bytes = self.take(len)?.to_vec();
        self.skip_padding(len)?;
        Ok(bytes)
    }

    pub fn read_var_opaque(&mut self, max: usize) -> Result<Vec<u8>, XdrError> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(XdrError::LengthExceedsMax { len, max });
        }
        self.read_fixed_opaque(len)
    }

    pub fn read_string(&mut self, max: usize) -> Result<String, XdrError> {
        let bytes = self.read_var_opaque(max)?;
        String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8)
    }

    pub fn read_optional<T: XdrDecode>(&mut self) -> Result<Option<T>, XdrError> {
        if self.read_bool()? {
            Ok(Some(T::decode(self)?))
        } else {
            Ok(None)
        }
    }

    pub fn read_var_array<T: XdrDecode>(&mut self, max: usize) -> Result<Vec<T>, XdrError> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(XdrError::LengthExceedsMax { len, max });
        }
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::decode(self)?);
        }
        Ok(items)
    }

    pub fn read<T: XdrDecode>(&mut self) -> Result<T, XdrError> {
        T::decode(self)
    }

    /// Reads the 4-byte `ext` union used by most Stellar structs. Only the
    /// empty arm (0) exists in this protocol version.
    pub fn read_empty_ext(&mut self) -> Result<(), XdrError> {
        match self.read_i32()? {
            0 => Ok(()),
            v => Err(XdrError::InvalidDiscriminant {
                kind: "extension",
                value: v.into(),
            }),
        }
    }

    /// Peeks at the next 32-bit word without moving the cursor.
    pub fn peek_i32(&self) -> Result<i32, XdrError> {
        self.clone().read_i32()
    }

    fn skip_padding(&mut self, len: usize) -> Result<(), XdrError> {
        let start = self.pos;
        let pad = self.take(padding_for(len))?;
        if pad.iter().any(|b| *b != 0) {
            return Err(XdrError::NonZeroPadding(start));
        }
        Ok(())
    }
}
