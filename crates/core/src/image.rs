//! Image reference resolution for product writes.
//!
//! A product write either carries a freshly uploaded asset or it does not.
//! These functions decide which asset the stored record ends up pointing at,
//! and which previously referenced asset (if any) stops being referenced.
//! Both are pure; callers read the existing reference from the record store
//! before calling them.

use crate::AssetName;

/// Choose the image a product should reference after a write.
///
/// A new upload always wins. Without one the existing reference is kept
/// unchanged, which may itself be absent. An update never clears an image
/// just because no file was submitted.
///
/// ```
/// use shop_catalog_core::{AssetName, resolve_image};
///
/// let old = AssetName::parse("a.png").ok();
/// let new = AssetName::parse("b.png").ok();
///
/// assert_eq!(resolve_image(new.clone(), old.clone()), new);
/// assert_eq!(resolve_image(None, old.clone()), old);
/// assert_eq!(resolve_image(None, None), None);
/// ```
#[must_use]
pub fn resolve_image(
    uploaded: Option<AssetName>,
    existing: Option<AssetName>,
) -> Option<AssetName> {
    uploaded.or(existing)
}

/// The previously referenced asset that a write leaves unreferenced.
///
/// Returns `existing` only when the resolved reference points somewhere else.
/// Re-uploading under the same name, or keeping the existing image, yields
/// `None`.
#[must_use]
pub fn superseded_image(
    existing: Option<&AssetName>,
    resolved: Option<&AssetName>,
) -> Option<AssetName> {
    match (existing, resolved) {
        (Some(old), Some(new)) if old == new => None,
        (Some(old), _) => Some(old.clone()),
        (None, _) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn name(s: &str) -> AssetName {
        AssetName::parse(s).unwrap()
    }

    #[test]
    fn test_upload_wins_over_existing() {
        assert_eq!(
            resolve_image(Some(name("new.png")), Some(name("old.png"))),
            Some(name("new.png"))
        );
    }

    #[test]
    fn test_upload_fills_empty_slot() {
        assert_eq!(
            resolve_image(Some(name("new.png")), None),
            Some(name("new.png"))
        );
    }

    #[test]
    fn test_existing_kept_without_upload() {
        assert_eq!(resolve_image(None, Some(name("a.png"))), Some(name("a.png")));
    }

    #[test]
    fn test_absent_stays_absent() {
        assert_eq!(resolve_image(None, None), None);
    }

    #[test]
    fn test_superseded_when_replaced() {
        let old = name("old.png");
        let new = name("new.png");
        assert_eq!(superseded_image(Some(&old), Some(&new)), Some(old));
    }

    #[test]
    fn test_not_superseded_when_kept() {
        let old = name("old.png");
        assert_eq!(superseded_image(Some(&old), Some(&old)), None);
    }

    #[test]
    fn test_nothing_superseded_without_existing() {
        assert_eq!(superseded_image(None, Some(&name("new.png"))), None);
        assert_eq!(superseded_image(None, None), None);
    }
}
