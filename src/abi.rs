//! Loading and validation of the on-disk ABI documents.
//!
//! The actual call encoding lives in the typed bindings in [`crate::contracts`];
//! the JSON documents are external data that startup validates against those
//! bindings. A missing file, malformed JSON, or a document that no longer
//! describes a method this tool invokes is a fatal startup error.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// File name of the prediction-market ABI document under the ABI directory.
pub const MARKET_ABI_FILE: &str = "prediction_market.json";
/// File name of the ERC20 ABI document under the ABI directory.
pub const ERC20_ABI_FILE: &str = "erc20.json";

/// Methods the tool invokes on the market contract.
pub const MARKET_METHODS: &[&str] = &["buy", "sell", "claimWinnings", "getUserMarketShares"];
/// Methods the tool invokes on the payment token.
pub const ERC20_METHODS: &[&str] =
    &["decimals", "symbol", "name", "allowance", "approve", "balanceOf"];

/// A contract ABI document: a JSON object with an `abi` array field.
#[derive(Debug, Deserialize)]
pub struct AbiDocument {
    pub abi: Vec<AbiEntry>,
}

/// One entry of an ABI array. Only the fields needed for validation are kept.
#[derive(Debug, Deserialize)]
pub struct AbiEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl AbiDocument {
    /// Whether the document declares a function with the given name.
    pub fn has_function(&self, name: &str) -> bool {
        self.abi.iter().any(|entry| {
            entry.kind.as_deref() == Some("function") && entry.name.as_deref() == Some(name)
        })
    }
}

/// Load one ABI document and check it declares every required method.
pub fn load_abi(path: &Path, required: &[&str]) -> Result<AbiDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read ABI document {}", path.display()))?;
    let doc: AbiDocument = serde_json::from_str(&raw)
        .with_context(|| format!("malformed ABI document {}", path.display()))?;

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|method| !doc.has_function(method))
        .collect();
    if !missing.is_empty() {
        bail!(
            "ABI document {} is missing required functions: {}",
            path.display(),
            missing.join(", ")
        );
    }

    Ok(doc)
}

/// Validate both ABI documents under the configured directory.
pub fn verify_abi_documents(abi_dir: &Path) -> Result<()> {
    load_abi(&abi_dir.join(MARKET_ABI_FILE), MARKET_METHODS)?;
    load_abi(&abi_dir.join(ERC20_ABI_FILE), ERC20_METHODS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("abi-test-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_abi_accepts_complete_document() {
        let path = write_temp(
            "complete.json",
            r#"{"abi":[
                {"type":"function","name":"decimals"},
                {"type":"function","name":"symbol"},
                {"type":"event","name":"Transfer"}
            ]}"#,
        );
        let doc = load_abi(&path, &["decimals", "symbol"]).unwrap();
        assert!(doc.has_function("decimals"));
        assert!(!doc.has_function("Transfer"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_abi_rejects_missing_file() {
        let path = std::env::temp_dir().join("abi-test-does-not-exist.json");
        let err = load_abi(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_load_abi_rejects_malformed_json() {
        let path = write_temp("malformed.json", "not json at all");
        let err = load_abi(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("malformed"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_abi_rejects_missing_methods() {
        let path = write_temp(
            "missing.json",
            r#"{"abi":[{"type":"function","name":"decimals"}]}"#,
        );
        let err = load_abi(&path, &["decimals", "approve", "allowance"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("approve"));
        assert!(msg.contains("allowance"));
        assert!(!msg.contains("decimals,"));
        fs::remove_file(path).ok();
    }
}
