use rand::{rngs::OsRng, RngCore};
use std::fmt::Write;
use url::Url;

const TOKEN_BYTES: usize = 32;

pub struct SharedLink {
    pub token: String,
    pub url: String,
}

/// 256 bits from the OS CSPRNG, lowercase hex.
pub fn generate_share_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);

    bytes.iter().fold(String::with_capacity(TOKEN_BYTES * 2), |mut out, byte| {
        let _ = write!(out, "{:02x}", byte);
        out
    })
}

/// `<base>/trip/<token>`. The base may carry a path prefix.
pub fn share_url(base: &str, token: &str) -> Result<String, url::ParseError> {
    let mut base = Url::parse(base)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(&format!("trip/{}", token))?.to_string())
}
