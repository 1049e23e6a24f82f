use super::{padding_for, XdrEncode, XdrError};

/// Append-only XDR output buffer.
#[derive(Debug, Default, Clone)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(value as u32);
    }

    /// Fixed-length opaque: the bytes, then zero padding. No length prefix.
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.pad(bytes.len());
    }

    /// Variable-length opaque with a declared maximum.
    pub fn write_var_opaque(&mut self, bytes: &[u8], max: usize) -> Result<(), XdrError> {
        if bytes.len() > max {
            return Err(XdrError::LengthExceedsMax {
                len: bytes.len(),
                max,
            });
        }
        self.write_len(bytes.len())?;
        self.write_fixed_opaque(bytes);
        Ok(())
    }

    /// XDR `string<max>`: same layout as variable opaque.
    pub fn write_string(&mut self, value: &str, max: usize) -> Result<(), XdrError> {
        self.write_var_opaque(value.as_bytes(), max)
    }

    /// Presence flag, then the value if present.
    pub fn write_optional<T: XdrEncode>(&mut self, value: Option<&T>) -> Result<(), XdrError> {
        match value {
            Some(v) => {
                self.write_bool(true);
                v.encode(self)
            }
            None => {
                self.write_bool(false);
                Ok(())
            }
        }
    }

    /// Variable-length array with a declared maximum element count.
    pub fn write_var_array<T: XdrEncode>(&mut self, items: &[T], max: usize) -> Result<(), XdrError> {
        if items.len() > max {
            return Err(XdrError::LengthExceedsMax {
                len: items.len(),
                max,
            });
        }
        self.write_len(items.len())?;
        for item in items {
            item.encode(self)?;
        }
        Ok(())
    }

    pub fn write<T: XdrEncode + ?Sized>(&mut self, value: &T) -> Result<(), XdrError> {
        value.encode(self)
    }

    fn write_len(&mut self, len: usize) -> Result<(), XdrError> {
        let len = u32::try_from(len).map_err(|_| XdrError::LengthExceedsMax {
            len,
            max: u32::MAX as usize,
        })?;
        self.write_u32(len);
        Ok(())
    }

    fn pad(&mut self, len: usize) {
        self.buf.extend(std::iter::repeat(0u8).take(padding_for(len)));
    }
}
