use anyhow::{Result, anyhow};

pub fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| anyhow!("Serialization failed: {}", e))
}

pub fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
    bincode::deserialize(data).map_err(|e| anyhow!("Deserialization failed: {}", e))
}

/// Hex rendering of a 32 byte hash, for logs and command output.
pub fn to_hex(bytes: &[u8; 32]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn from_hex(value: &str) -> Result<[u8; 32]> {
    let value = value.trim_start_matches("0x");
    if value.len() != 64 {
        return Err(anyhow!("Expected 64 hex characters, got {}", value.len()));
    }

    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&value[i * 2..i * 2 + 2], 16)
            .map_err(|e| anyhow!("Invalid hex '{}': {}", value, e))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        let bytes = [0xab; 32];
        let hex = to_hex(&bytes);
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("abab"));
        assert_eq!(from_hex(&hex).unwrap(), bytes);
        assert_eq!(from_hex(&format!("0x{}", hex)).unwrap(), bytes);
        assert!(from_hex("abc").is_err());
        assert!(from_hex(&"zz".repeat(32)).is_err());
    }
}
