use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

use super::platform::MEDIA_URL_PREFIX;

/// One servable file, addressed by its URL path (`/videos/<filename>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MediaEntry {
    path: String,
    #[serde(skip)]
    extension: Option<String>,
}

impl MediaEntry {
    pub fn from_file_name(name: &str) -> Self {
        Self {
            path: format!("{}{}", MEDIA_URL_PREFIX, name),
            extension: extension_of(name),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lowercased extension including the leading `.`, if the name has one.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }
}

/// Suffix of `name` from its last `.`, lowercased. A name like `.mp4` has
/// extension `.mp4`.
pub fn extension_of(name: &str) -> Option<String> {
    let idx = name.rfind('.')?;
    let ext = &name[idx..];
    if ext.len() == 1 {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Normalise a user-supplied extension token to `.ext` lowercase.
/// Accepts `mp4`, `.mp4`, ` MP4 `; blank tokens yield `None`.
pub fn normalize_extension(token: &str) -> Option<String> {
    let token = token.trim();
    let bare = token.strip_prefix('.').unwrap_or(token);
    if bare.is_empty() {
        return None;
    }
    Some(format!(".{}", bare.to_lowercase()))
}

/// The shuffled, frozen set of entries for one server run.
#[derive(Debug, Clone)]
pub struct MediaList {
    entries: Arc<[MediaEntry]>,
}

impl MediaList {
    /// Shuffle `entries` once with `rng` and freeze the resulting order.
    pub fn shuffled<R: Rng + ?Sized>(mut entries: Vec<MediaEntry>, rng: &mut R) -> Self {
        entries.shuffle(rng);
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
