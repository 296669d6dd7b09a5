//! Bitcoin-style CompactSize (a.k.a. VarInt) encoding.
//!
//! Every length prefix used by the extended transaction format -- script
//! lengths, witness item lengths, segOP payload length, TLV record lengths
//! -- goes through this codec. A single implementation that silently
//! accepts a non-canonical encoding in one node and rejects it in another
//! is a consensus split, so decoding is strict: only the shortest legal
//! encoding for a value is accepted.

use crate::{BitcoinDeserialize, BitcoinSerialize, SerializationError};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read};

/// A canonically-encoded unsigned integer in `[0, 2^64)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompactSize(u64);

impl CompactSize {
    pub fn new() -> CompactSize {
        CompactSize(0)
    }

    pub fn from(value: usize) -> CompactSize {
        CompactSize(value as u64)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The number of bytes `value` would occupy under the shortest legal
    /// encoding, without actually encoding it.
    pub fn size(value: usize) -> usize {
        if value < 253 {
            1
        } else if value < 0x1_0000 {
            3
        } else if value < 0x1_0000_0000 {
            5
        } else {
            9
        }
    }
}

impl Default for CompactSize {
    fn default() -> Self {
        Self::new()
    }
}

impl BitcoinSerialize for CompactSize {
    fn bitcoin_serialize<W>(&self, mut target: W) -> Result<(), io::Error>
    where
        W: io::Write,
    {
        if self.0 < 253 {
            target.write_all(&[self.0 as u8])
        } else if self.0 <= u16::MAX as u64 {
            target.write_all(&[0xfd])?;
            target.write_u16::<LittleEndian>(self.0 as u16)
        } else if self.0 <= u32::MAX as u64 {
            target.write_all(&[0xfe])?;
            target.write_u32::<LittleEndian>(self.0 as u32)
        } else {
            target.write_all(&[0xff])?;
            target.write_u64::<LittleEndian>(self.0)
        }
    }
}

impl CompactSize {
    /// Finish decoding a `CompactSize` whose first byte has already been
    /// consumed from the stream (the transaction deserializer needs this:
    /// it must peek one byte to distinguish a witness marker from an input
    /// count before it knows which CompactSize, if any, follows).
    pub fn bitcoin_deserialize_with_prefix<R: io::Read>(
        prefix: u8,
        target: R,
    ) -> Result<CompactSize, SerializationError> {
        decode_after_prefix(prefix, target)
    }
}

impl BitcoinDeserialize for CompactSize {
    fn bitcoin_deserialize<R: io::Read>(mut target: R) -> Result<CompactSize, SerializationError> {
        let mut prefix = [0u8; 1];
        read_exact_or_truncated(&mut target, &mut prefix)?;
        decode_after_prefix(prefix[0], target)
    }
}

fn decode_after_prefix<R: io::Read>(
    prefix: u8,
    mut target: R,
) -> Result<CompactSize, SerializationError> {
    match prefix {
        0xfd => {
            let mut buf = [0u8; 2];
            read_exact_or_truncated(&mut target, &mut buf)?;
            let value = (&buf[..]).read_u16::<LittleEndian>().unwrap() as u64;
            if value < 253 {
                return Err(SerializationError::NonCanonical);
            }
            Ok(CompactSize(value))
        }
        0xfe => {
            let mut buf = [0u8; 4];
            read_exact_or_truncated(&mut target, &mut buf)?;
            let value = (&buf[..]).read_u32::<LittleEndian>().unwrap() as u64;
            if value <= u16::MAX as u64 {
                return Err(SerializationError::NonCanonical);
            }
            Ok(CompactSize(value))
        }
        0xff => {
            let mut buf = [0u8; 8];
            read_exact_or_truncated(&mut target, &mut buf)?;
            let value = (&buf[..]).read_u64::<LittleEndian>().unwrap();
            if value <= u32::MAX as u64 {
                return Err(SerializationError::NonCanonical);
            }
            Ok(CompactSize(value))
        }
        first => Ok(CompactSize(first as u64)),
    }
}

/// `Read::read_exact`, but a short buffer is reported as
/// [`SerializationError::Truncated`] rather than a generic io error, since
/// spec-level callers distinguish "not enough bytes" from other parse
/// failures.
fn read_exact_or_truncated<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
) -> Result<(), SerializationError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            SerializationError::Truncated
        } else {
            SerializationError::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(n: u64) {
        let encoded = CompactSize::from(n as usize)
            .bitcoin_serialize_to_vec()
            .unwrap();
        assert_eq!(encoded.len(), CompactSize::size(n as usize));
        let decoded = CompactSize::bitcoin_deserialize(Cursor::new(&encoded[..])).unwrap();
        assert_eq!(decoded.value(), n);
    }

    #[test]
    fn boundary_values_roundtrip() {
        for n in [
            0,
            1,
            252,
            253,
            65_535,
            65_536,
            (u32::MAX - 1) as u64,
            u32::MAX as u64,
            u32::MAX as u64 + 1,
            u64::MAX,
        ] {
            roundtrip(n);
        }
    }

    #[test]
    fn non_canonical_u16_prefix_is_rejected() {
        // 0xFD 0x10 0x00 decodes to 16, which fits in a single byte.
        let bytes = [0xfd, 0x10, 0x00];
        let err = CompactSize::bitcoin_deserialize(Cursor::new(&bytes[..])).unwrap_err();
        assert!(matches!(err, SerializationError::NonCanonical));
    }

    #[test]
    fn non_canonical_u32_prefix_is_rejected() {
        let bytes = [0xfe, 0xff, 0xff, 0x00, 0x00]; // 0xFFFF fits in 0xFD form
        let err = CompactSize::bitcoin_deserialize(Cursor::new(&bytes[..])).unwrap_err();
        assert!(matches!(err, SerializationError::NonCanonical));
    }

    #[test]
    fn non_canonical_u64_prefix_is_rejected() {
        let mut bytes = vec![0xff];
        bytes.extend_from_slice(&(u32::MAX as u64).to_le_bytes());
        let err = CompactSize::bitcoin_deserialize(Cursor::new(&bytes[..])).unwrap_err();
        assert!(matches!(err, SerializationError::NonCanonical));
    }

    #[test]
    fn truncated_prefix_is_rejected() {
        let bytes = [0xfd, 0x01];
        let err = CompactSize::bitcoin_deserialize(Cursor::new(&bytes[..])).unwrap_err();
        assert!(matches!(err, SerializationError::Truncated));
    }

    #[test]
    fn empty_input_is_truncated() {
        let bytes: [u8; 0] = [];
        let err = CompactSize::bitcoin_deserialize(Cursor::new(&bytes[..])).unwrap_err();
        assert!(matches!(err, SerializationError::Truncated));
    }
}
