//! CBOR encoding of record envelopes.
//!
//! One encoding for every entity kind: the envelope serializes as a CBOR
//! map with stable field names, so the guard can decode the owning org out
//! of raw bytes without knowing the domain-field shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::record::Record;
use crate::types::OrgId;

/// Encode a record to CBOR bytes.
pub fn encode_record<F: Serialize>(record: &Record<F>) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    ciborium::into_writer(record, &mut buf).map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Decode a record from CBOR bytes.
pub fn decode_record<F: DeserializeOwned>(bytes: &[u8]) -> Result<Record<F>, CodecError> {
    ciborium::from_reader(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}

/// Partial view of the envelope: only what the guard needs.
#[derive(Deserialize)]
struct OwnerEnvelope {
    owner_org: OrgId,
}

/// Decode only the owning org from encoded record bytes.
///
/// Domain fields are skipped entirely, so this works for every entity kind.
pub fn decode_owner(bytes: &[u8]) -> Result<OrgId, CodecError> {
    let envelope: OwnerEnvelope =
        ciborium::from_reader(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
    Ok(envelope.owner_org)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        color: String,
        size: u32,
    }

    fn sample() -> Record<Widget> {
        Record::new(
            "w1",
            OrgId::from("OrgA"),
            Widget {
                color: "blue".into(),
                size: 5,
            },
        )
    }

    #[test]
    fn test_record_roundtrip() {
        let record = sample();
        let bytes = encode_record(&record).unwrap();
        let decoded: Record<Widget> = decode_record(&bytes).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn test_decode_owner_skips_domain_fields() {
        let bytes = encode_record(&sample()).unwrap();
        let owner = decode_owner(&bytes).unwrap();
        assert_eq!(owner, OrgId::from("OrgA"));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_record::<Widget>(b"not cbor at all").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_decode_wrong_shape_fails() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Other {
            hash: Vec<u8>,
        }
        let bytes = encode_record(&sample()).unwrap();
        assert!(decode_record::<Other>(&bytes).is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_roundtrip_any_fields(
                id in "[a-z0-9]{1,16}",
                org in "[A-Za-z]{1,12}",
                color in "\\PC*",
                size in any::<u32>(),
            ) {
                let record = Record::new(id, OrgId::from(org), Widget { color, size });
                let bytes = encode_record(&record).unwrap();
                let decoded: Record<Widget> = decode_record(&bytes).unwrap();
                prop_assert_eq!(record, decoded);
            }

            #[test]
            fn prop_owner_recoverable_without_shape(
                org in "[A-Za-z]{1,12}",
                size in any::<u32>(),
            ) {
                let record = Record::new(
                    "w1",
                    OrgId::from(org.as_str()),
                    Widget { color: "red".into(), size },
                );
                let bytes = encode_record(&record).unwrap();
                prop_assert_eq!(decode_owner(&bytes).unwrap(), OrgId::from(org));
            }
        }
    }
}
