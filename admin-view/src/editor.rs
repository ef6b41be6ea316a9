//! Rich-text editor configuration and markup cleaning.
//!
//! The editor widget exchanges a single string of markup with the form. The
//! toolbar is declared here as data so the hosting page can configure the
//! widget, and the same declaration drives [`EditorConfig::clean_markup`],
//! which sanitizes submitted markup before it is written to the store.

use ammonia::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Toolbar controls offered by the content editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarItem {
    Header,
    Font,
    OrderedList,
    BulletList,
    Bold,
    Italic,
    Underline,
    Link,
    Image,
    Align,
    Clean,
}

/// Configuration of the editor widget.
///
/// `image_resize` enables the resize handles on embedded images and, on the
/// storage side, permits explicit `width`/`height` on `img` tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub toolbar: Vec<ToolbarItem>,
    pub image_resize: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            toolbar: vec![
                ToolbarItem::Header,
                ToolbarItem::Font,
                ToolbarItem::OrderedList,
                ToolbarItem::BulletList,
                ToolbarItem::Bold,
                ToolbarItem::Italic,
                ToolbarItem::Underline,
                ToolbarItem::Link,
                ToolbarItem::Image,
                ToolbarItem::Align,
                ToolbarItem::Clean,
            ],
            image_resize: true,
        }
    }
}

impl EditorConfig {
    fn has(&self, item: ToolbarItem) -> bool {
        self.toolbar.contains(&item)
    }

    /// Sanitize editor markup before it is written to the store.
    ///
    /// The allowed tag set follows the toolbar: a control that is not on the
    /// toolbar cannot have produced its markup, so that markup is stripped.
    /// Text content of stripped tags is preserved.
    pub fn clean_markup(&self, markup: &str) -> String {
        let mut tags: HashSet<&str> = ["p", "br"].into_iter().collect();

        if self.has(ToolbarItem::Header) {
            tags.extend(["h1", "h2"]);
        }
        if self.has(ToolbarItem::Font) {
            tags.insert("span");
        }
        if self.has(ToolbarItem::OrderedList) {
            tags.extend(["ol", "li"]);
        }
        if self.has(ToolbarItem::BulletList) {
            tags.extend(["ul", "li"]);
        }
        if self.has(ToolbarItem::Bold) {
            tags.extend(["strong", "b"]);
        }
        if self.has(ToolbarItem::Italic) {
            tags.extend(["em", "i"]);
        }
        if self.has(ToolbarItem::Underline) {
            tags.insert("u");
        }
        if self.has(ToolbarItem::Link) {
            tags.insert("a");
        }
        if self.has(ToolbarItem::Image) {
            tags.insert("img");
        }

        let mut builder = Builder::default();
        builder.tags(tags);

        if self.has(ToolbarItem::Align) {
            // Alignment is carried as editor classes on block elements.
            builder.add_allowed_classes(
                "p",
                ["ql-align-center", "ql-align-right", "ql-align-justify"],
            );
        }
        if self.has(ToolbarItem::Font) {
            builder.add_allowed_classes("span", ["ql-font-serif", "ql-font-monospace"]);
        }
        if !self.image_resize {
            builder.rm_tag_attributes("img", ["width", "height"]);
        }

        builder.clean(markup).to_string()
    }
}
