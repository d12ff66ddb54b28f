//! Style registry for deduplication
//!
//! Documents typically have many cells sharing the same style. The
//! registry interns style definitions so each unique definition is stored
//! (and later emitted) exactly once; cells reference styles by handle.
//! Handles come from a session-scoped counter owned by the registry, so
//! independent parallel builds never collide.

use super::{BorderEdge, BorderLineStyle, BorderStyle, Color, HorizontalAlignment, Style};
use crate::error::{Error, Result};
use ahash::AHashMap;

/// Opaque handle to an interned style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleHandle(pub u32);

/// Key for style lookup (hash of the canonical definition)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StyleKey(u64);

impl StyleKey {
    fn from_style(style: &Style) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = ahash::AHasher::default();
        style.hash(&mut hasher);
        StyleKey(hasher.finish())
    }
}

#[derive(Debug)]
struct Entry {
    style: Style,
    name: Option<String>,
}

/// Session-scoped interning pool for style definitions
///
/// Guarantees:
/// - interning two structurally equal definitions returns the same handle
/// - interning two different definitions never returns aliased handles
///
/// A small fixed set of built-in named styles (`Default`, `Header`,
/// `Total`, `Warning`, `Success`) is pre-registered on construction;
/// handle 0 is always the default style.
#[derive(Debug)]
pub struct StyleRegistry {
    entries: Vec<Entry>,
    index_map: AHashMap<StyleKey, u32>,
    names: AHashMap<String, u32>,
}

impl StyleRegistry {
    /// The built-in named styles every session starts with
    pub fn builtin_styles() -> Vec<(&'static str, Style)> {
        vec![
            ("Default", Style::default()),
            (
                "Header",
                Style::new()
                    .bold(true)
                    .fill_color(Color::rgb(0xd9, 0xd9, 0xd9))
                    .horizontal_alignment(HorizontalAlignment::Center)
                    .border(BorderStyle::new().with_bottom(BorderLineStyle::Thin, Color::BLACK)),
            ),
            (
                "Total",
                Style {
                    border: BorderStyle {
                        top: Some(BorderEdge::medium()),
                        ..BorderStyle::default()
                    },
                    ..Style::new().bold(true)
                },
            ),
            (
                "Warning",
                Style::new()
                    .fill_color(Color::rgb(0xf4, 0xcc, 0xcc))
                    .font_color(Color::rgb(0x99, 0x00, 0x00)),
            ),
            (
                "Success",
                Style::new()
                    .fill_color(Color::rgb(0xd9, 0xea, 0xd3))
                    .font_color(Color::rgb(0x38, 0x76, 0x1d)),
            ),
        ]
    }

    /// Create a new registry with the built-in styles pre-registered
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(64),
            index_map: AHashMap::with_capacity(64),
            names: AHashMap::with_capacity(8),
        };

        for (name, style) in Self::builtin_styles() {
            registry
                .register_named(name, style)
                .expect("built-in styles are distinct");
        }

        registry
    }

    /// Intern a style, returning its handle
    ///
    /// If a structurally equal style was interned before, its handle is
    /// returned; otherwise the style is stored under a new handle.
    pub fn intern(&mut self, style: &Style) -> StyleHandle {
        let key = StyleKey::from_style(style);

        if let Some(&idx) = self.index_map.get(&key) {
            // Verify it's actually the same (hash collision check)
            if self.entries[idx as usize].style == *style {
                return StyleHandle(idx);
            }
        }

        let idx = self.entries.len() as u32;
        self.index_map.insert(key, idx);
        self.entries.push(Entry {
            style: style.clone(),
            name: None,
        });
        StyleHandle(idx)
    }

    /// Register a named style
    ///
    /// Re-registering a name with a structurally equal definition returns
    /// the existing handle; a different definition is a
    /// [`Error::StyleConflict`]. Built-in names follow the same rule.
    pub fn register_named(&mut self, name: &str, style: Style) -> Result<StyleHandle> {
        if name.is_empty() {
            return Err(Error::InvalidName("empty style name".into()));
        }

        let lower = name.to_lowercase();
        if let Some(&idx) = self.names.get(&lower) {
            if self.entries[idx as usize].style == style {
                return Ok(StyleHandle(idx));
            }
            return Err(Error::StyleConflict { name: name.into() });
        }

        let handle = self.intern(&style);
        let entry = &mut self.entries[handle.0 as usize];
        if entry.name.is_none() {
            entry.name = Some(name.to_string());
        }
        self.names.insert(lower, handle.0);
        Ok(handle)
    }

    /// Get a style by handle
    pub fn get(&self, handle: StyleHandle) -> Option<&Style> {
        self.entries.get(handle.0 as usize).map(|e| &e.style)
    }

    /// The name attached to a handle, if the style was registered by name
    pub fn name_of(&self, handle: StyleHandle) -> Option<&str> {
        self.entries
            .get(handle.0 as usize)
            .and_then(|e| e.name.as_deref())
    }

    /// Look up a registered style by name (case-insensitive)
    pub fn handle_for_name(&self, name: &str) -> Option<StyleHandle> {
        self.names.get(&name.to_lowercase()).map(|&i| StyleHandle(i))
    }

    /// The default style (handle 0)
    pub fn default_style(&self) -> &Style {
        &self.entries[0].style
    }

    /// Number of interned styles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry holds only the built-ins
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= Self::builtin_styles().len()
    }

    /// Iterate over all styles in handle order
    pub fn iter(&self) -> impl Iterator<Item = (StyleHandle, Option<&str>, &Style)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (StyleHandle(i as u32), e.name.as_deref(), &e.style))
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::NumberFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtins_preregistered() {
        let registry = StyleRegistry::new();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.handle_for_name("Default"), Some(StyleHandle(0)));
        assert!(registry.handle_for_name("header").is_some());
        assert!(registry.handle_for_name("total").is_some());
        assert!(registry.handle_for_name("warning").is_some());
        assert!(registry.handle_for_name("success").is_some());
    }

    #[test]
    fn test_deduplication() {
        let mut registry = StyleRegistry::new();

        let style1 = Style::new().bold(true).font_size(14.0);
        let style2 = Style::new().bold(true).font_size(14.0); // Same as style1
        let style3 = Style::new().italic(true); // Different

        let h1 = registry.intern(&style1);
        let h2 = registry.intern(&style2);
        let h3 = registry.intern(&style3);

        assert_eq!(h1, h2); // Same style, same handle
        assert_ne!(h1, h3); // Different style, different handle
        assert_eq!(registry.len(), 7); // builtins + 2 custom
    }

    #[test]
    fn test_intern_matches_builtin() {
        let mut registry = StyleRegistry::new();
        let header = registry.handle_for_name("Header").unwrap();

        // Interning a definition equal to a built-in reuses its handle
        let (_, header_def) = StyleRegistry::builtin_styles().remove(1);
        assert_eq!(registry.intern(&header_def), header);
    }

    #[test]
    fn test_many_interns_one_entry() {
        let mut registry = StyleRegistry::new();
        let before = registry.len();

        let currency = Style::new().number_format(NumberFormat::currency("EUR"));
        let first = registry.intern(&currency);
        for _ in 0..499 {
            assert_eq!(registry.intern(&currency), first);
        }

        assert_eq!(registry.len(), before + 1);
    }

    #[test]
    fn test_named_conflict() {
        let mut registry = StyleRegistry::new();

        // Equal definition: fine, same handle
        let default = registry
            .register_named("Default", Style::default())
            .unwrap();
        assert_eq!(default, StyleHandle(0));

        // Incompatible definition for a built-in name: rejected
        let err = registry
            .register_named("Header", Style::new().italic(true))
            .unwrap_err();
        assert!(matches!(err, Error::StyleConflict { .. }));
    }

    #[test]
    fn test_named_custom() {
        let mut registry = StyleRegistry::new();

        let accent = Style::new().fill_color(Color::rgb(0, 0x66, 0xcc));
        let handle = registry.register_named("Accent", accent.clone()).unwrap();
        assert_eq!(registry.name_of(handle), Some("Accent"));
        assert_eq!(registry.handle_for_name("ACCENT"), Some(handle));

        // Interning the same definition structurally resolves to the named entry
        assert_eq!(registry.intern(&accent), handle);
    }
}
