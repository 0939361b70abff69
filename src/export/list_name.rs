//! Choice-list identifiers

use crate::error::{FormError, FormResult};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Runs of anything but ASCII letters and digits, underscores included
static NON_ALPHANUMERIC: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new("[^A-Za-z0-9]+"));

/// Source of the random suffix appended to every list identifier
pub trait ListNameSource {
    fn suffix_bytes(&mut self) -> [u8; 8];
}

/// Suffixes drawn from v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomListNames;

impl ListNameSource for RandomListNames {
    fn suffix_bytes(&mut self) -> [u8; 8] {
        let bytes = Uuid::new_v4().into_bytes();
        let mut suffix = [0u8; 8];
        for (i, byte) in suffix.iter_mut().enumerate() {
            *byte = bytes[i] ^ bytes[i + 8];
        }
        suffix
    }
}

/// Reproducible suffixes from a fixed seed (splitmix64)
#[derive(Debug, Clone)]
pub struct SeededListNames {
    state: u64,
}

impl SeededListNames {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl ListNameSource for SeededListNames {
    fn suffix_bytes(&mut self) -> [u8; 8] {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (z ^ (z >> 31)).to_be_bytes()
    }
}

impl<S: ListNameSource + ?Sized> ListNameSource for &mut S {
    fn suffix_bytes(&mut self) -> [u8; 8] {
        (**self).suffix_bytes()
    }
}

/// `<question>_<base64url(suffix)>` with every non-alphanumeric run collapsed to `_`
pub fn list_name(question_name: &str, suffix: [u8; 8]) -> FormResult<String> {
    let pattern = match &*NON_ALPHANUMERIC {
        Ok(pattern) => pattern,
        Err(e) => return Err(FormError::Export(format!("Regex error: {}", e))),
    };
    let raw = format!("{}_{}", question_name, URL_SAFE.encode(suffix));
    Ok(pattern.replace_all(&raw, "_").into_owned())
}
