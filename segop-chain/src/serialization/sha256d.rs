//! Double-SHA256 (`SHA256d`) accumulator, implemented as an `io::Write` sink
//! so it can be fed directly by `BitcoinSerialize` impls without an
//! intermediate buffer.

use sha2::{Digest, Sha256};
use std::io;

#[derive(Default)]
pub struct Writer(Sha256);

impl Writer {
    /// Finish the running hash and double it, producing the `SHA256d`
    /// digest legacy/witness transaction identifiers are built from.
    pub fn finish(self) -> [u8; 32] {
        let first = self.0.finalize();
        let second = Sha256::digest(&first);
        let mut out = [0u8; 32];
        out.copy_from_slice(&second);
        out
    }
}

impl io::Write for Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One-shot `SHA256d` over a complete byte slice, used by the tagged-hash
/// construction and anywhere a `Writer` would be overkill.
pub fn hash(data: &[u8]) -> [u8; 32] {
    let mut w = Writer::default();
    io::Write::write_all(&mut w, data).expect("writing to an in-memory hasher is infallible");
    w.finish()
}
