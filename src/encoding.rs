//! The self-describing key/value envelope that backs both log entries and
//! data objects, plus the uuid generator used to name data objects.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CResult;

/// Encodes a value as the JSON envelope used for both log entries and data
/// object blobs.
pub fn encode<T: Serialize>(value: &T) -> CResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Decodes bytes previously produced by [`encode`].
///
/// Unknown action tags are fatal by construction: `Action` is an externally
/// tagged enum, so `serde_json` itself rejects an object key that names
/// neither known variant, and that error surfaces here as
/// [`crate::error::Error::Serialization`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> CResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Generates a version-4-style (random) uuid, formatted as the canonical
/// 8-4-4-4-12 hyphenated hex string.
///
/// Rather than add a dedicated `uuid` crate dependency for this single
/// call site, data object names are produced directly from `rand`.
/// Collisions are treated as fatal by the caller (see `flush_rows`); any
/// collision-resistant identifier of equivalent entropy would do just as
/// well.
pub fn uuid_v4() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);

    // Set the version (4) and variant (RFC 4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}{}{}{}-{}{}-{}{}-{}{}-{}{}{}{}{}{}",
        hex[0], hex[1], hex[2], hex[3], hex[4], hex[5], hex[6], hex[7], hex[8], hex[9], hex[10],
        hex[11], hex[12], hex[13], hex[14], hex[15],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_derive::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Demo {
        name: String,
        age: i16,
    }

    #[test]
    fn round_trips() {
        let demo = Demo { name: "Joey".to_string(), age: 42 };
        let bytes = encode(&demo).unwrap();
        let decoded: Demo = decode(&bytes).unwrap();
        assert_eq!(demo, decoded);
    }

    #[test]
    fn uuid_v4_looks_like_a_uuid() {
        let id = uuid_v4();
        assert_eq!(id.len(), 36);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.iter().map(|p| p.len()).collect::<Vec<_>>(), vec![8, 4, 4, 4, 12]);
        assert_eq!(&id[14..15], "4");
    }

    #[test]
    fn uuid_v4_is_not_trivially_repeated() {
        let a = uuid_v4();
        let b = uuid_v4();
        assert_ne!(a, b);
    }
}
