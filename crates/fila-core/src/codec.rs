//! Binary <-> text-safe payload conversion.
//!
//! The host cannot carry raw bytes. Binary writes send the base64 body of a
//! data URL; binary reads return plain base64.

use crate::error::{FilaError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const OCTET_MIME: &str = "application/octet-binary";

/// Render bytes as a `data:<mime>;base64,<body>` URL.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Everything after the first comma of a data URL.
pub fn data_url_payload(data_url: &str) -> &str {
    match data_url.find(',') {
        Some(i) => &data_url[i + 1..],
        None => data_url,
    }
}

/// Encode bytes into the host's binary payload.
pub fn encode(bytes: &[u8]) -> String {
    data_url_payload(&to_data_url(bytes, OCTET_MIME)).to_string()
}

/// Decode a host binary payload. Inverts [`encode`].
pub fn decode(payload: &str) -> Result<Vec<u8>> {
    let trimmed = payload.trim_end_matches(['\r', '\n']);
    STANDARD
        .decode(trimmed)
        .map_err(|e| FilaError::InvalidPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_encode_known_bytes() {
        assert_eq!(encode(&[0, 255, 128]), "AP+A");
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"hi"), "aGk=");
    }

    #[test]
    fn test_decode_known_payload() {
        assert_eq!(decode("AP+A").unwrap(), vec![0, 255, 128]);
    }

    #[test]
    fn test_data_url_shape() {
        let url = to_data_url(b"hi", OCTET_MIME);
        assert_eq!(url, "data:application/octet-binary;base64,aGk=");
        assert_eq!(data_url_payload(&url), "aGk=");
    }

    #[test]
    fn test_payload_without_comma_is_whole() {
        assert_eq!(data_url_payload("aGk="), "aGk=");
    }

    #[test]
    fn test_round_trip_random() {
        let mut rng = rand::thread_rng();
        for len in [1usize, 2, 3, 57, 1024, 4099] {
            let mut buf = vec![0u8; len];
            rng.fill_bytes(&mut buf);
            assert_eq!(decode(&encode(&buf)).unwrap(), buf);
        }
    }

    #[test]
    fn test_round_trip_all_byte_values() {
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(decode(&encode(&all)).unwrap(), all);
    }

    #[test]
    fn test_decode_tolerates_trailing_newline() {
        assert_eq!(decode("aGk=\n").unwrap(), b"hi");
    }

    #[test]
    fn test_decode_invalid() {
        assert!(matches!(decode("@@@"), Err(FilaError::InvalidPayload(_))));
    }
}
