use sha3::{Digest, Sha3_224};
use ulid::Ulid;

/// Stable id for a recipe imported from `url`, so importing the same page
/// twice lands on the same entry.
pub fn recipe_id_for_url(url: &str) -> String {
    let mut hasher = Sha3_224::default();
    hasher.update(url.trim());

    let digest = hasher.finalize();
    let hex = digest[..4]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>();

    format!("r_{hex}")
}

pub fn new_recipe_id() -> String {
    format!("r_{}", Ulid::new().to_string().to_lowercase())
}
