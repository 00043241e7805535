//! A minimal CDR (Common Data Representation) little-endian encoder and
//! decoder, matching the wire format ROS2/Zenoh bridges use for the
//! `geometry_msgs`/`nav_msgs`/status message families in [`super`].
//!
//! No crate in this codebase's dependency corpus targets ROS2's CDR
//! encapsulation, so this is hand-rolled rather than invented as a fake
//! dependency. It implements exactly the subset CDR2's "plain CDR,
//! little-endian" encapsulation needs for the fixed-shape IDL structs
//! here: primitive scalars, fixed-size arrays, length-prefixed sequences,
//! and null-terminated strings, each aligned to its own natural size.

use crate::error::ProtocolMismatch;

/// The 4-byte RTPS encapsulation header identifying "plain CDR,
/// little-endian" with no options.
const CDR_LE_HEADER: [u8; 4] = [0x00, 0x01, 0x00, 0x00];

pub struct CdrWriter {
    buf: Vec<u8>,
}

impl CdrWriter {
    pub fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(&CDR_LE_HEADER);
        Self { buf }
    }

    fn align(&mut self, boundary: usize) {
        let offset = self.buf.len() % boundary;
        if offset != 0 {
            self.buf.extend(std::iter::repeat(0u8).take(boundary - offset));
        }
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.buf.push(v as u8);
    }

    pub fn write_i32(&mut self, v: i32) {
        self.align(4);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.align(4);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.align(4);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_f64(&mut self, v: f64) {
        self.align(8);
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// CDR string: u32 length (including the trailing NUL), the bytes, the
    /// NUL terminator. No extra padding beyond the length's own alignment.
    pub fn write_string(&mut self, v: &str) {
        self.write_u32(v.len() as u32 + 1);
        self.buf.extend_from_slice(v.as_bytes());
        self.buf.push(0);
    }

    pub fn write_fixed_f64_array<const N: usize>(&mut self, values: &[f64; N]) {
        for v in values {
            self.write_f64(*v);
        }
    }

    pub fn write_fixed_u8_array<const N: usize>(&mut self, values: &[u8; N]) {
        for v in values {
            self.write_u8(*v);
        }
    }

    pub fn write_sequence_len(&mut self, len: usize) {
        self.write_u32(len as u32);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for CdrWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CdrReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> CdrReader<'a> {
    pub fn new(buf: &'a [u8]) -> Result<Self, ProtocolMismatch> {
        if buf.len() < 4 || buf[0..4] != CDR_LE_HEADER {
            return Err(ProtocolMismatch(
                "missing or unrecognized CDR little-endian encapsulation header".to_string(),
            ));
        }
        Ok(Self { buf, pos: 4 })
    }

    fn align(&mut self, boundary: usize) {
        let offset = self.pos % boundary;
        if offset != 0 {
            self.pos += boundary - offset;
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ProtocolMismatch> {
        if self.pos + n > self.buf.len() {
            return Err(ProtocolMismatch("unexpected end of CDR buffer".to_string()));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, ProtocolMismatch> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, ProtocolMismatch> {
        Ok(self.take(1)?[0] as i8)
    }

    pub fn read_i32(&mut self) -> Result<i32, ProtocolMismatch> {
        self.align(4);
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(i32::from_le_bytes(bytes))
    }

    pub fn read_u32(&mut self) -> Result<u32, ProtocolMismatch> {
        self.align(4);
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(u32::from_le_bytes(bytes))
    }

    pub fn read_f32(&mut self) -> Result<f32, ProtocolMismatch> {
        self.align(4);
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(f32::from_le_bytes(bytes))
    }

    pub fn read_f64(&mut self) -> Result<f64, ProtocolMismatch> {
        self.align(8);
        let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
        Ok(f64::from_le_bytes(bytes))
    }

    pub fn read_string(&mut self) -> Result<String, ProtocolMismatch> {
        let len = self.read_u32()? as usize;
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = self.take(len)?;
        let without_nul = &bytes[..len - 1];
        String::from_utf8(without_nul.to_vec())
            .map_err(|e| ProtocolMismatch(format!("invalid UTF-8 in CDR string: {e}")))
    }

    pub fn read_fixed_f64_array<const N: usize>(&mut self) -> Result<[f64; N], ProtocolMismatch> {
        let mut out = [0.0; N];
        for slot in out.iter_mut() {
            *slot = self.read_f64()?;
        }
        Ok(out)
    }

    pub fn read_fixed_u8_array<const N: usize>(&mut self) -> Result<[u8; N], ProtocolMismatch> {
        let mut out = [0u8; N];
        for slot in out.iter_mut() {
            *slot = self.read_u8()?;
        }
        Ok(out)
    }

    pub fn read_sequence_len(&mut self) -> Result<usize, ProtocolMismatch> {
        Ok(self.read_u32()? as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_scalars_and_string_with_alignment() {
        let mut w = CdrWriter::new();
        w.write_i8(-1);
        w.write_i32(42);
        w.write_string("frame");
        w.write_f64(1.5);
        let bytes = w.into_bytes();

        let mut r = CdrReader::new(&bytes).unwrap();
        assert_eq!(r.read_i8().unwrap(), -1);
        assert_eq!(r.read_i32().unwrap(), 42);
        assert_eq!(r.read_string().unwrap(), "frame");
        assert_eq!(r.read_f64().unwrap(), 1.5);
    }

    #[test]
    fn rejects_buffer_without_cdr_header() {
        let bytes = vec![1, 2, 3, 4, 5];
        assert!(CdrReader::new(&bytes).is_err());
    }
}
