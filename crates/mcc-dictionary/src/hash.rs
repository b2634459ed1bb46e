#![deny(unsafe_code)]

use sha2::Digest;

use mcc_model::DictionaryEntry;

/// Content fingerprint of an ordered entry list.
///
/// Two fetches that return the same rows in the same order produce the same
/// fingerprint, which lets a reload report whether anything changed.
pub fn fingerprint_entries(entries: &[DictionaryEntry]) -> String {
    let mut hasher = sha2::Sha256::new();
    for entry in entries {
        hasher.update(entry.id.to_le_bytes());
        for field in [entry.code(), entry.name(), entry.exclusion_raw()] {
            // Separator byte keeps ("ab", "c") distinct from ("a", "bc").
            hasher.update(field.unwrap_or_default().as_bytes());
            hasher.update([0x1f]);
        }
        hasher.update(entry.mcc_type.as_str().as_bytes());
        hasher.update([0x1e]);
    }
    hex::encode(hasher.finalize())
}
