//! Tag registry.
//!
//! The registry is an immutable lookup table from numeric tag ID to the
//! descriptors that define it. The same ID is often defined by several
//! directory types (0x0001 is `GPSLatitudeRef` in the GPS IFD and
//! `InteropIndex` in the Interop IFD), which is what makes tag lookups
//! across directories ambiguous.
//!
//! Registries are plain values shared through `Arc`, so metadata built
//! against different registries never interferes.

use std::collections::HashMap;

use super::tags::{TagInfo, STANDARD_TAGS};

/// Immutable table of tag descriptors.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    by_tag: HashMap<u16, Vec<TagInfo>>,
}

impl TagRegistry {
    /// Create a registry from a list of descriptors.
    ///
    /// Definition order is kept per tag ID; the first definition of an ID is
    /// its fallback when no directory-specific definition matches.
    pub fn new(tags: impl IntoIterator<Item = TagInfo>) -> Self {
        let mut by_tag: HashMap<u16, Vec<TagInfo>> = HashMap::new();
        for info in tags {
            by_tag.entry(info.tag).or_default().push(info);
        }
        Self { by_tag }
    }

    /// Registry preloaded with the well-known TIFF/EXIF/GPS/Interop tags.
    pub fn standard() -> Self {
        Self::new(STANDARD_TAGS.iter().copied())
    }

    /// All descriptors for a tag ID, in definition order.
    pub fn lookup(&self, tag: u16) -> &[TagInfo] {
        self.by_tag.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct directory affinities that define `tag`.
    ///
    /// Returns 0 for IDs the registry does not know.
    pub fn tags_matching(&self, tag: u16) -> usize {
        let mut seen = Vec::new();
        for info in self.lookup(tag) {
            if !seen.contains(&info.directory) {
                seen.push(info.directory);
            }
        }
        seen.len()
    }

    /// Descriptor for a field with ID `tag` found in a directory of
    /// `directory_type`.
    ///
    /// Prefers the definition declared for that directory, then the first
    /// definition of the ID, then a synthesized unknown descriptor.
    pub fn resolve(&self, directory_type: i32, tag: u16) -> TagInfo {
        let candidates = self.lookup(tag);
        candidates
            .iter()
            .find(|info| info.directory.directory_type() == directory_type)
            .or_else(|| candidates.first())
            .copied()
            .unwrap_or_else(|| TagInfo::unknown(tag))
    }

    /// Number of distinct tag IDs in the registry.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Whether the registry defines no tags.
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}
