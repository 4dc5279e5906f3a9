// src/raw_data/reader.rs
use crate::error::Result;
use crate::types::ByteOrder;
use crate::utils::{decode_sdt_text, trim_control};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// Typed, positioned reads over a seekable byte stream
///
/// Borrows the stream for the duration of one decode and applies the
/// stream's byte order to every multi-byte read.
///
/// # Example
///
/// ```
/// use sdt_rs::raw_data::FieldReader;
/// use sdt_rs::types::ByteOrder;
/// use std::io::Cursor;
///
/// let mut cursor = Cursor::new(vec![0u8, 0, 0, 0, 0xff, 0xff, 0xff, 0xff]);
/// let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
///
/// fields.seek(4).unwrap();
/// assert_eq!(fields.read_u32_widened().unwrap(), 0xffff_ffff);
/// ```
pub struct FieldReader<'a, R: Read + Seek> {
    stream: &'a mut R,
    order: ByteOrder,
}

impl<'a, R: Read + Seek> FieldReader<'a, R> {
    pub fn new(stream: &'a mut R, order: ByteOrder) -> Self {
        FieldReader { stream, order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Move to an absolute offset from the start of the stream
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.stream.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    pub fn position(&mut self) -> Result<u64> {
        Ok(self.stream.stream_position()?)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.stream.read_u8()?)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        if self.order.is_big_endian() {
            Ok(self.stream.read_i16::<BigEndian>()?)
        } else {
            Ok(self.stream.read_i16::<LittleEndian>()?)
        }
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        if self.order.is_big_endian() {
            Ok(self.stream.read_u16::<BigEndian>()?)
        } else {
            Ok(self.stream.read_u16::<LittleEndian>()?)
        }
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        if self.order.is_big_endian() {
            Ok(self.stream.read_i32::<BigEndian>()?)
        } else {
            Ok(self.stream.read_i32::<LittleEndian>()?)
        }
    }

    /// Read an unsigned 32-bit field, zero-extended into an `i64`
    ///
    /// The result is always in `0..=u32::MAX`; large counters (photon
    /// counts, clock resolutions) never come back negative.
    pub fn read_u32_widened(&mut self) -> Result<i64> {
        let raw = if self.order.is_big_endian() {
            self.stream.read_u32::<BigEndian>()?
        } else {
            self.stream.read_u32::<LittleEndian>()?
        };
        Ok(i64::from(raw))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        if self.order.is_big_endian() {
            Ok(self.stream.read_f32::<BigEndian>()?)
        } else {
            Ok(self.stream.read_f32::<LittleEndian>()?)
        }
    }

    /// Read exactly `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; len];
        self.stream.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Read a `len`-byte text run without trimming
    pub fn read_text(&mut self, len: usize) -> Result<String> {
        let bytes = self.read_bytes(len)?;
        Ok(decode_sdt_text(&bytes))
    }

    /// Read a fixed-length string field, trimmed of NUL padding and whitespace
    pub fn read_string(&mut self, len: usize) -> Result<String> {
        let text = self.read_text(len)?;
        Ok(trim_control(&text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdtError;
    use std::io::Cursor;

    #[test]
    fn test_read_integers_little_endian() {
        let data = vec![
            0x34, 0x12,             // i16 0x1234
            0xfe, 0xff,             // u16 65534
            1, 0, 0, 0,             // i32 1
        ];
        let mut cursor = Cursor::new(data);
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);

        assert_eq!(fields.read_i16().unwrap(), 0x1234);
        assert_eq!(fields.read_u16().unwrap(), 65534);
        assert_eq!(fields.read_i32().unwrap(), 1);
    }

    #[test]
    fn test_read_integers_big_endian() {
        let data = vec![0x12, 0x34, 0, 0, 0, 2];
        let mut cursor = Cursor::new(data);
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Big);

        assert_eq!(fields.read_i16().unwrap(), 0x1234);
        assert_eq!(fields.read_i32().unwrap(), 2);
    }

    #[test]
    fn test_widened_read_is_never_negative() {
        let data = vec![0x00, 0x00, 0x00, 0x80];
        let mut cursor = Cursor::new(data);
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);

        let value = fields.read_u32_widened().unwrap();
        assert_eq!(value, 0x8000_0000);
        assert!(value > 0);
    }

    #[test]
    fn test_read_floats() {
        let data: Vec<u8> = vec![0, 0, 128, 63];
        let mut cursor = Cursor::new(data);
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        assert!((fields.read_f32().unwrap() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_read_string_trims_padding() {
        let data = b"12:30:00\0 ".to_vec();
        let mut cursor = Cursor::new(data);
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        assert_eq!(fields.read_string(10).unwrap(), "12:30:00");
    }

    #[test]
    fn test_seek_and_position() {
        let mut cursor = Cursor::new(vec![0u8, 1, 2, 3, 4]);
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        fields.seek(3).unwrap();
        assert_eq!(fields.read_u8().unwrap(), 3);
        assert_eq!(fields.position().unwrap(), 4);
    }

    #[test]
    fn test_short_read_is_io_error() {
        let mut cursor = Cursor::new(vec![1u8]);
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        match fields.read_i32() {
            Err(SdtError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
