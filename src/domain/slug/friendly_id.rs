// src/domain/slug/friendly_id.rs
use crate::domain::slug::value_objects::SlugSequence;

pub const DEFAULT_SEQUENCE_SEPARATOR: &str = "--";

/// A friendly identifier split back into its name and sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendlyId {
    pub name: String,
    pub sequence: SlugSequence,
}

/// Split `text` on the last `separator` that is followed only by digits.
///
/// Anything that does not end in `<separator><positive integer>` is taken as a
/// bare name with sequence 1.
pub fn parse_friendly_id(text: &str, separator: &str) -> FriendlyId {
    let bare = || FriendlyId {
        name: text.to_string(),
        sequence: SlugSequence::FIRST,
    };

    if separator.is_empty() {
        return bare();
    }

    let Some((name, suffix)) = text.rsplit_once(separator) else {
        return bare();
    };

    if name.is_empty() || suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return bare();
    }

    match suffix.parse::<i32>().ok().map(SlugSequence::new) {
        Some(Ok(sequence)) => FriendlyId {
            name: name.to_string(),
            sequence,
        },
        _ => bare(),
    }
}
