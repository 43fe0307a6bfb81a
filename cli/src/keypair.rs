use solana_sdk::signature::Keypair;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};
use std::fs;

pub fn create_keypair(path: &Path) -> Result<Keypair> {
    let keypair = Keypair::new();
    let bytes = keypair.to_bytes().to_vec();
    let json = serde_json::to_string(&bytes)
        .map_err(|e| anyhow!("Failed to serialize keypair to JSON: {}", e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Failed to create {}: {}", parent.display(), e))?;
    }
    fs::write(path, json)
        .map_err(|e| anyhow!("Failed to write keypair file {}: {}", path.display(), e))?;
    Ok(keypair)
}

pub fn load_keypair(path: &Path) -> Result<Keypair> {
    let data = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read keypair file {}: {}", path.display(), e))?;
    let bytes: Vec<u8> = serde_json::from_str(&data)
        .map_err(|e| anyhow!("Failed to parse keypair JSON: {}", e))?;
    Keypair::from_bytes(&bytes)
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))
}

/// The keypair path given on the command line, or the default Solana keypair location.
pub fn get_keypair_path(keypair_path: Option<PathBuf>) -> Result<PathBuf> {
    match keypair_path {
        Some(path) => Ok(path),
        None => dirs::home_dir()
            .map(|home| home.join(".config/solana/id.json"))
            .ok_or_else(|| anyhow!("Could not find home directory")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signer::Signer;

    #[test]
    fn test_keypair_file() {
        let path = std::env::temp_dir()
            .join(format!("mor-keypair-{}", std::process::id()))
            .join("id.json");

        let created = create_keypair(&path).unwrap();
        let loaded = load_keypair(&path).unwrap();
        assert_eq!(created.pubkey(), loaded.pubkey());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/validator.json");
        assert_eq!(get_keypair_path(Some(path.clone())).unwrap(), path);
    }
}
