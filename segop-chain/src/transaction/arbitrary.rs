use proptest::{arbitrary::any, collection::vec, prelude::*};

use crate::transparent::{Input, Output};

use super::{Payload, Transaction};

impl Arbitrary for Transaction {
    type Parameters = ();

    /// Generates a structurally well-formed transaction: non-empty
    /// `inputs`/`outputs`, since the wire format's marker-byte trick
    /// (§4.D) relies on `vin` never being empty to distinguish a legacy
    /// transaction from an extended one.
    fn arbitrary_with(_args: ()) -> Self::Strategy {
        (
            any::<u32>(),
            vec(any::<Input>(), 1..5),
            vec(any::<Output>(), 1..5),
            any::<u32>(),
            any::<Payload>(),
        )
            .prop_map(|(version, inputs, outputs, lock_time, payload)| {
                Transaction::new(version, inputs, outputs, lock_time, payload)
            })
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}
