/// Derives the value stored by a hashing put: a hash over the previous value followed by the new
/// value, rendered in decimal. Chaining these builds a verifiable append-only history per key.
pub fn combine_hash(previous_value: &str, value: &str) -> String {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(previous_value.as_bytes());
    hasher.update(value.as_bytes());
    hasher.finalize().to_string()
}
