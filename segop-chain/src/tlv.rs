//! Validator for the type-length-value encoding carried inside a segOP
//! payload's `data` field.
//!
//! A well-formed sequence is a concatenation of records, each
//! `type: u8 ‖ length: CompactSize ‖ value: length bytes`, with no leading
//! or trailing slack: the cursor must consume the slice exactly. This
//! module does not interpret `type` or `value` -- every type byte is
//! accepted, and payload content meaning is entirely out of scope here.

use crate::compact_size::CompactSize;
use crate::serialization::BitcoinDeserialize;
use std::io::Cursor;

/// Returns `true` iff `data` is a well-formed TLV sequence: zero or more
/// `(type, length, value)` records with no trailing bytes and no overrun.
/// A non-canonical CompactSize length anywhere in the sequence fails the
/// whole slice, as does a length that runs past the end of `data`.
pub fn is_valid_tlv(data: &[u8]) -> bool {
    let mut cursor = Cursor::new(data);
    let total_len = data.len() as u64;

    loop {
        if cursor.position() == total_len {
            return true;
        }

        // A lone type byte with nothing after it is a truncated record.
        if u8::bitcoin_deserialize(&mut cursor).is_err() {
            return false;
        }

        let len = match CompactSize::bitcoin_deserialize(&mut cursor) {
            Ok(len) => len.value(),
            Err(_) => return false,
        };

        let remaining = total_len - cursor.position();
        if len > remaining {
            return false;
        }
        cursor.set_position(cursor.position() + len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slice_is_valid() {
        assert!(is_valid_tlv(&[]));
    }

    #[test]
    fn single_short_record_is_valid() {
        let data = [0x01, 0x05, b'h', b'e', b'l', b'l', b'o'];
        assert!(is_valid_tlv(&data));
    }

    #[test]
    fn truncated_value_is_invalid() {
        let data = [0x01, 0x05, b'h', b'i'];
        assert!(!is_valid_tlv(&data));
    }

    #[test]
    fn trailing_byte_is_invalid() {
        let mut data = vec![0x01, 0x00]; // zero-length record
        data.push(0xff); // trailing garbage, no type/length to pair with it
        assert!(!is_valid_tlv(&data));
    }

    #[test]
    fn non_canonical_length_is_invalid() {
        // length 2 encoded with a 3-byte (0xFD) prefix instead of 1 byte.
        let data = [0x01, 0xfd, 0x02, 0x00, b'a', b'b'];
        assert!(!is_valid_tlv(&data));
    }

    #[test]
    fn lone_type_byte_is_invalid() {
        assert!(!is_valid_tlv(&[0x01]));
    }

    #[test]
    fn multiple_records_roundtrip_emission() {
        let mut data = Vec::new();
        data.extend_from_slice(&[0x01, 0x02, b'a', b'b']);
        data.extend_from_slice(&[0x02, 0x00]);
        data.extend_from_slice(&[0x03, 0x03, b'x', b'y', b'z']);
        assert!(is_valid_tlv(&data));
    }
}
