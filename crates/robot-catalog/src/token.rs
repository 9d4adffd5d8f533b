//! Short random tokens and avatar URL synthesis.
//!
//! Avatars are served by an image service that renders a robot for any path
//! segment, so a short random token is enough to give each new robot its own
//! face. Tokens are not checked for uniqueness; two robots may share one.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use url::Url;

use crate::error::AvatarError;

/// Avatar service used when no base is configured.
pub const DEFAULT_AVATAR_BASE: &str = "https://robohash.org/";

/// Number of characters in a generated token.
pub const TOKEN_LENGTH: usize = 11;

/// Radix of the token alphabet (`0-9a-z`).
const TOKEN_RADIX: u32 = 36;

/// Source of short alphanumeric tokens.
pub trait TokenSource {
    /// Returns a fresh token. No uniqueness guarantee is made.
    fn short_token(&mut self) -> String;
}

impl<F> TokenSource for F
where
    F: FnMut() -> String,
{
    fn short_token(&mut self) -> String {
        self()
    }
}

/// Token source drawing lowercase base-36 characters from a `ChaCha8` RNG.
///
/// # Example
///
/// ```
/// use robot_catalog::{RandomTokenSource, TokenSource, TOKEN_LENGTH};
///
/// let mut first = RandomTokenSource::seeded(7);
/// let mut second = RandomTokenSource::seeded(7);
///
/// let token = first.short_token();
/// assert_eq!(token.len(), TOKEN_LENGTH);
/// assert_eq!(token, second.short_token());
/// ```
#[derive(Debug, Clone)]
pub struct RandomTokenSource {
    rng: ChaCha8Rng,
}

impl RandomTokenSource {
    /// Seeds the RNG from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Seeds the RNG deterministically, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl TokenSource for RandomTokenSource {
    fn short_token(&mut self) -> String {
        (0..TOKEN_LENGTH)
            .map(|_| {
                let digit = self.rng.random_range(0..TOKEN_RADIX);
                char::from_digit(digit, TOKEN_RADIX).unwrap_or('0')
            })
            .collect()
    }
}

/// Builds avatar URLs by appending a token to a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFactory {
    base: Url,
}

impl AvatarFactory {
    /// Parses `base`, ensuring its path ends in `/` so tokens are appended
    /// rather than replacing the last segment.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError`] if `base` is not a URL or cannot carry a path.
    pub fn new(base: &str) -> Result<Self, AvatarError> {
        let mut url = Url::parse(base).map_err(|e| AvatarError::InvalidBase {
            value: base.to_owned(),
            message: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(AvatarError::CannotBeBase {
                value: base.to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self { base: url })
    }

    /// Returns the normalised base URL.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the avatar URL for `token`.
    ///
    /// The token always becomes a single, percent-encoded path segment after
    /// the base path, so `/`, `?` and `#` cannot escape it.
    ///
    /// # Errors
    ///
    /// Returns [`AvatarError::InvalidToken`] if the token is empty or a dot
    /// segment.
    pub fn avatar_for(&self, token: &str) -> Result<Url, AvatarError> {
        if matches!(token, "" | "." | "..") {
            return Err(AvatarError::InvalidToken {
                token: token.to_owned(),
                message: "token must be a non-empty, non-dot path segment".to_owned(),
            });
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| AvatarError::CannotBeBase {
                value: self.base.to_string(),
            })?
            .pop_if_empty()
            .push(token);
        Ok(url)
    }
}

impl Default for AvatarFactory {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_AVATAR_BASE)
                .unwrap_or_else(|error| panic!("default avatar base is invalid: {error}")),
        }
    }
}
