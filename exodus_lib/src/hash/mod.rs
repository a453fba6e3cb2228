use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};

mod error;
pub use error::Error;

pub type Salt = [u8; SALT_LENGTH];
pub type DerivedKey = [u8; KEY_LENGTH];

pub const SALT_LENGTH: usize = 16;
pub const KEY_LENGTH: usize = 32;

// ASP.NET Identity v2 blob: version byte, then salt, then derived key
const BLOB_LENGTH: usize = 1 + SALT_LENGTH + KEY_LENGTH;

// Fixed by the legacy hasher, not configurable
const ITERATIONS: u32 = 1000;

/// Salt and derived key recovered from an Identity v2 password hash blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyHash {
    pub salt: Salt,
    pub key: DerivedKey,
}

impl LegacyHash {
    /// Parses the fixed 50 byte Identity v2 layout.
    ///
    /// Bytes past the derived key are ignored, matching the looseness of
    /// the legacy format.
    pub fn parse(blob: &[u8]) -> Result<Self, Error> {
        match blob.first() {
            None => return Err(Error::TooShort(0)),
            Some(0) => (),
            Some(&version) => return Err(Error::UnsupportedVersion(version)),
        }

        if blob.len() < BLOB_LENGTH {
            return Err(Error::TooShort(blob.len()));
        }

        let mut salt = Salt::default();
        let mut key = DerivedKey::default();

        salt.copy_from_slice(&blob[1..=SALT_LENGTH]);
        key.copy_from_slice(&blob[SALT_LENGTH + 1..BLOB_LENGTH]);

        Ok(Self { salt, key })
    }

    /// PHC string understood by Auth0's custom password hash import.
    #[must_use]
    pub fn to_phc_string(&self) -> String {
        let salt = STANDARD_NO_PAD.encode(self.salt);
        let key = STANDARD_NO_PAD.encode(self.key);

        format!("$pbkdf2-sha1$i={ITERATIONS},l={KEY_LENGTH}${salt}${key}")
    }
}

/// Converts a base64 encoded Identity v2 password hash into a PHC string.
pub fn reformat(legacy: &str) -> Result<String, Error> {
    let blob = STANDARD.decode(legacy)?;

    let hash = LegacyHash::parse(&blob)?;

    Ok(hash.to_phc_string())
}

#[cfg(test)]
mod test {
    use super::*;

    fn blob(version: u8, salt_byte: u8, key_byte: u8) -> Vec<u8> {
        let mut blob = vec![version];
        blob.extend([salt_byte; SALT_LENGTH]);
        blob.extend([key_byte; KEY_LENGTH]);
        blob
    }

    fn encode(blob: &[u8]) -> String {
        STANDARD.encode(blob)
    }

    #[test]
    fn test_reformat_known_blob() -> Result<(), Error> {
        let phc = reformat(&encode(&blob(0, 0x01, 0x02)))?;

        assert_eq!(
            phc,
            "$pbkdf2-sha1$i=1000,l=32$AQEBAQEBAQEBAQEBAQEBAQ$AgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAgI"
        );

        Ok(())
    }

    #[test]
    fn test_output_has_no_padding() -> Result<(), Error> {
        let phc = reformat(&encode(&blob(0, 0xFF, 0xFF)))?;

        assert!(!phc.contains('='));
        assert!(phc.starts_with("$pbkdf2-sha1$i=1000,l=32$"));

        let valid = |c: char| c.is_ascii_alphanumeric() || c == '+' || c == '/';
        let mut segments = phc.split('$').skip(3);
        assert!(segments.next().is_some_and(|s| s.chars().all(valid)));
        assert!(segments.next().is_some_and(|s| s.chars().all(valid)));
        assert!(segments.next().is_none());

        Ok(())
    }

    #[test]
    fn test_segments_round_trip() -> Result<(), Error> {
        let phc = reformat(&encode(&blob(0, 0x01, 0x02)))?;

        let segments = phc.split('$').collect::<Vec<_>>();
        let salt = STANDARD_NO_PAD.decode(segments[3]).map_err(Error::Base64)?;
        let key = STANDARD_NO_PAD.decode(segments[4]).map_err(Error::Base64)?;

        assert_eq!(salt, [0x01; SALT_LENGTH]);
        assert_eq!(key, [0x02; KEY_LENGTH]);

        Ok(())
    }

    #[test]
    fn test_trailing_bytes_are_ignored() -> Result<(), Error> {
        let exact = reformat(&encode(&blob(0, 0x03, 0x04)))?;

        let mut longer = blob(0, 0x03, 0x04);
        longer.extend([0xAB; 7]);

        assert_eq!(reformat(&encode(&longer))?, exact);

        Ok(())
    }

    #[test]
    fn test_reformat_is_deterministic() -> Result<(), Error> {
        let input = encode(&blob(0, 0x10, 0x20));

        assert_eq!(reformat(&input)?, reformat(&input)?);

        Ok(())
    }

    #[test]
    fn test_identity_v3_is_unsupported() {
        let result = reformat(&encode(&blob(1, 0x01, 0x02)));

        assert!(matches!(result, Err(Error::UnsupportedVersion(1))));
    }

    #[test]
    fn test_any_other_version_is_unsupported() {
        let result = reformat(&encode(&blob(0x7F, 0x01, 0x02)));

        assert!(matches!(result, Err(Error::UnsupportedVersion(0x7F))));
    }

    #[test]
    fn test_short_blob_is_rejected() {
        let result = reformat(&encode(&[0, 1, 2, 3, 4]));

        assert!(matches!(result, Err(Error::TooShort(5))));
    }

    #[test]
    fn test_empty_blob_is_rejected() {
        assert!(matches!(reformat(""), Err(Error::TooShort(0))));
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        assert!(matches!(reformat("not base64!!"), Err(Error::Base64(_))));
    }
}
