//! Gravatar default avatars.
//!
//! Gravatar keys images on the MD5 hex digest of the trimmed, lower-cased
//! email address, so the same member gets the same placeholder everywhere.

use md5::{Digest, Md5};

/// Gravatar URL settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravatarOptions {
    /// Avatar endpoint without trailing slash.
    pub base_url: String,
    /// Image shown when the address has no Gravatar (`d` parameter).
    pub default_image: String,
    /// Maximum content rating (`r` parameter).
    pub rating: String,
}

impl Default for GravatarOptions {
    fn default() -> Self {
        Self {
            base_url: "https://www.gravatar.com/avatar".to_owned(),
            default_image: "identicon".to_owned(),
            rating: "pg".to_owned(),
        }
    }
}

impl GravatarOptions {
    /// Build the Gravatar URL for `identity_key` at `size` pixels.
    pub(crate) fn image_url(&self, identity_key: &str, size: u32) -> String {
        let hash = hex::encode(Md5::digest(
            identity_key.trim().to_lowercase().as_bytes(),
        ));
        format!(
            "{}/{hash}?s={size}&d={}&r={}",
            self.base_url.trim_end_matches('/'),
            self.default_image,
            self.rating
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // md5("myemailaddress@example.com")
        let url = GravatarOptions::default().image_url("MyEmailAddress@example.com ", 80);

        assert_eq!(
            url,
            "https://www.gravatar.com/avatar/0bc83cb571cd1c50ba6f3e8a78ef1346?s=80&d=identicon&r=pg"
        );
    }

    #[test]
    fn test_custom_options() {
        let options = GravatarOptions {
            base_url: "https://secure.gravatar.com/avatar/".to_owned(),
            default_image: "mp".to_owned(),
            rating: "g".to_owned(),
        };

        let url = options.image_url("a@b.c", 32);

        assert!(url.starts_with("https://secure.gravatar.com/avatar/"));
        assert!(url.ends_with("?s=32&d=mp&r=g"));
    }
}
