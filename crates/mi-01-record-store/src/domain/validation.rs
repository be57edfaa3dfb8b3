//! # Write Validation
//!
//! Size limits checked before a write reaches storage. Lengths are UTF-8
//! byte lengths. Checks run in a fixed order (CID, tag count, each tag) so a
//! write that breaks several limits always reports the first one.

use crate::domain::errors::MemoryError;

/// Maximum CID length in bytes.
pub const MAX_CID_LEN: usize = 100;

/// Maximum number of tags per record.
pub const MAX_TAGS: usize = 20;

/// Maximum length of a single tag in bytes.
pub const MAX_TAG_LEN: usize = 50;

/// Check a write against the record size limits.
pub fn validate_write(cid: &str, tags: &[String]) -> Result<(), MemoryError> {
    if cid.len() > MAX_CID_LEN {
        return Err(MemoryError::CidTooLong {
            len: cid.len(),
            max: MAX_CID_LEN,
        });
    }

    if tags.len() > MAX_TAGS {
        return Err(MemoryError::TooManyTags {
            count: tags.len(),
            max: MAX_TAGS,
        });
    }

    if let Some((index, tag)) = tags.iter().enumerate().find(|(_, t)| t.len() > MAX_TAG_LEN) {
        return Err(MemoryError::TagTooLong {
            index,
            len: tag.len(),
            max: MAX_TAG_LEN,
        });
    }

    Ok(())
}
