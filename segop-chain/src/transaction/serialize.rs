//! The two wire serialization profiles defined in §4.D, and the
//! transaction (de)serialization logic built on top of them.

use std::io::{self, Read};

use crate::{
    compact_size::CompactSize,
    serialization::{BitcoinDeserialize, BitcoinSerialize, SerializationError},
    transparent::{read_witness_stack, write_witness_stack, Input, Output},
};

use super::{Payload, Transaction};

/// The maximum size of a transaction (excluding the witness section) that
/// this crate will attempt to decode, guarding against unbounded
/// allocation from a hostile input.
pub const MAX_TX_SIZE: u64 = 1_000_000;

/// Marker byte (ASCII 'S') preceding the segOP section within the
/// extended-with-witness profile.
const SEGOP_SECTION_MARKER: u8 = 0x53;

/// Which of the two wire profiles §4.D defines a serializer targets.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TxOutProfile {
    /// `version ‖ vin_count ‖ vin[] ‖ vout_count ‖ vout[] ‖ lock_time`. No
    /// witness data, no extended payload.
    NoWitness,
    /// The non-witness profile plus an optional witness section and an
    /// optional segOP section, gated by the flag byte. Degenerates to the
    /// non-witness profile byte-for-byte when neither section applies.
    WithWitness,
}

impl Transaction {
    fn flag_byte(&self) -> u8 {
        (self.has_witness() as u8) | ((self.payload.is_present() as u8) << 1)
    }

    pub fn serialize_profile<W: io::Write>(
        &self,
        mut writer: W,
        profile: TxOutProfile,
    ) -> Result<(), io::Error> {
        self.version.bitcoin_serialize(&mut writer)?;

        let flag = match profile {
            TxOutProfile::NoWitness => 0,
            TxOutProfile::WithWitness => self.flag_byte(),
        };

        if flag != 0 {
            writer.write_all(&[0x00, flag])?;
        }

        CompactSize::from(self.inputs.len()).bitcoin_serialize(&mut writer)?;
        for input in &self.inputs {
            input.bitcoin_serialize(&mut writer)?;
        }

        CompactSize::from(self.outputs.len()).bitcoin_serialize(&mut writer)?;
        for output in &self.outputs {
            output.bitcoin_serialize(&mut writer)?;
        }

        if flag & 0b01 != 0 {
            for input in &self.inputs {
                write_witness_stack(&input.witness_stack, &mut writer)?;
            }
        }

        if flag & 0b10 != 0 {
            writer.write_all(&[SEGOP_SECTION_MARKER, self.payload.version])?;
            CompactSize::from(self.payload.data.len()).bitcoin_serialize(&mut writer)?;
            writer.write_all(&self.payload.data)?;
        }

        self.lock_time.bitcoin_serialize(&mut writer)?;
        Ok(())
    }

    pub fn serialize_profile_to_vec(
        &self,
        profile: TxOutProfile,
    ) -> Result<Vec<u8>, io::Error> {
        let mut data = Vec::new();
        self.serialize_profile(&mut data, profile)?;
        Ok(data)
    }
}

impl BitcoinSerialize for Transaction {
    /// Emits the persisted on-disk profile (§6): extended when witness or
    /// payload data is present, legacy otherwise.
    fn bitcoin_serialize<W: io::Write>(&self, writer: W) -> Result<(), io::Error> {
        self.serialize_profile(writer, self.persisted_profile())
    }
}

impl BitcoinDeserialize for Transaction {
    /// Accepts both the legacy and the extended-with-witness serialization,
    /// distinguishing them by the marker byte trick: a legacy transaction's
    /// `vin_count` is never `0x00` followed by a nonzero flag, since `vin`
    /// is required to be non-empty.
    fn bitcoin_deserialize<R: io::Read>(src: R) -> Result<Self, SerializationError> {
        let mut src = src.take(MAX_TX_SIZE);

        let version = u32::bitcoin_deserialize(&mut src)?;

        let first = u8::bitcoin_deserialize(&mut src)?;

        let (inputs, outputs, flag): (Vec<Input>, Vec<Output>, u8) = if first == 0 {
            let flag = u8::bitcoin_deserialize(&mut src)?;
            if flag == 0 {
                return Err(SerializationError::Parse(
                    "witness marker present with a zero flag byte",
                ));
            }
            let inputs = <Vec<Input>>::bitcoin_deserialize(&mut src)?;
            let outputs = <Vec<Output>>::bitcoin_deserialize(&mut src)?;
            (inputs, outputs, flag)
        } else {
            let vin_count =
                CompactSize::bitcoin_deserialize_with_prefix(first, &mut src)?.value() as usize;
            let mut inputs = Vec::with_capacity(std::cmp::min(vin_count, 1024));
            for _ in 0..vin_count {
                inputs.push(Input::bitcoin_deserialize(&mut src)?);
            }
            let outputs = <Vec<Output>>::bitcoin_deserialize(&mut src)?;
            (inputs, outputs, 0)
        };

        let mut inputs = inputs;

        if flag & 0b01 != 0 {
            for input in inputs.iter_mut() {
                input.witness_stack = read_witness_stack(&mut src)?;
            }
        }

        let payload = if flag & 0b10 != 0 {
            let marker = u8::bitcoin_deserialize(&mut src)?;
            if marker != SEGOP_SECTION_MARKER {
                return Err(SerializationError::Parse(
                    "segOP section marker mismatch",
                ));
            }
            let payload_version = u8::bitcoin_deserialize(&mut src)?;
            let len = CompactSize::bitcoin_deserialize(&mut src)?.value();
            if len > src.limit() {
                return Err(SerializationError::Truncated);
            }
            let mut data = vec![0u8; len as usize];
            src.read_exact(&mut data)?;
            Payload::present(payload_version, data)
        } else {
            Payload::null()
        };

        let lock_time = u32::bitcoin_deserialize(&mut src)?;

        Ok(Transaction::new(version, inputs, outputs, lock_time, payload))
    }
}
