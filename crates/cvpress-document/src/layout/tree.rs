// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout tree — a serialisable snapshot of a rendered, styled document.
//
// Node rectangles are absolute screen coordinates in CSS pixels, exactly as a
// renderer reports them. The tree's scroll size is the full content extent and
// may be larger than the root's visible rectangle.

use cvpress_core::Rect;
use cvpress_core::error::Result;
use serde::{Deserialize, Serialize};

/// What a node draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Container; paints only its background.
    Block,
    /// A run of text.
    Text { content: String },
    /// A hyperlink with its visible text.
    Link { href: String, content: String },
    /// A solid horizontal or vertical rule.
    Rule,
}

/// Presentation properties of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    /// CSS font-family list. Empty means inherited.
    pub font_family: String,
    /// CSS font-size value ("12px"). `None` means inherited.
    pub font_size: Option<String>,
    pub bold: bool,
    /// Foreground colour (RGB).
    pub color: [u8; 3],
    /// Fill colour (RGB), if any.
    pub background: Option<[u8; 3]>,
    /// On-screen zoom applied to the subtree, anchored at the top-left corner.
    pub scale: f64,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            font_family: String::new(),
            font_size: None,
            bold: false,
            color: [0, 0, 0],
            background: None,
            scale: 1.0,
        }
    }
}

/// One node of the layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub kind: NodeKind,
    pub rect: Rect,
    #[serde(default)]
    pub style: NodeStyle,
    /// Marker used to locate special nodes (e.g. the preview root).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    fn with_kind(kind: NodeKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            style: NodeStyle::default(),
            role: None,
            children: Vec::new(),
        }
    }

    pub fn block(rect: Rect) -> Self {
        Self::with_kind(NodeKind::Block, rect)
    }

    pub fn text(rect: Rect, content: impl Into<String>) -> Self {
        Self::with_kind(
            NodeKind::Text {
                content: content.into(),
            },
            rect,
        )
    }

    pub fn link(rect: Rect, href: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_kind(
            NodeKind::Link {
                href: href.into(),
                content: content.into(),
            },
            rect,
        )
    }

    pub fn rule(rect: Rect) -> Self {
        Self::with_kind(NodeKind::Rule, rect)
    }

    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn push(&mut self, child: LayoutNode) {
        self.children.push(child);
    }

    /// Visible text of a text or link node; empty for everything else.
    pub fn text_content(&self) -> &str {
        match &self.kind {
            NodeKind::Text { content } | NodeKind::Link { content, .. } => content,
            NodeKind::Block | NodeKind::Rule => "",
        }
    }

    /// Depth-first, pre-order walk passing each node with its effective
    /// (inherited) CSS font size.
    pub fn walk<'a, F>(&'a self, inherited_font_size: Option<&'a str>, visit: &mut F)
    where
        F: FnMut(&'a LayoutNode, Option<&'a str>),
    {
        let font_size = self.style.font_size.as_deref().or(inherited_font_size);
        visit(self, font_size);
        for child in &self.children {
            child.walk(font_size, visit);
        }
    }

    /// First node in pre-order whose role equals `role`.
    pub fn find_role_mut(&mut self, role: &str) -> Option<&mut LayoutNode> {
        if self.role.as_deref() == Some(role) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_role_mut(role))
    }
}

/// A link element as a renderer reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveElement {
    pub href: String,
    /// Absolute screen rectangle.
    pub rect: Rect,
    /// Effective CSS font size, if the renderer resolved one.
    pub font_size: Option<String>,
    pub text: String,
}

/// Anything that can enumerate its hyperlink regions with geometry.
///
/// Region extraction only depends on this capability, so it can run against a
/// live renderer or a synthetic list.
pub trait LayoutSource {
    /// Absolute screen rectangle of the layout's own root.
    fn container_rect(&self) -> Rect;

    /// Full scrollable content size in CSS pixels (width, height).
    fn content_size(&self) -> (u32, u32);

    /// Every hyperlink element, in document order.
    fn interactive_elements(&self) -> Vec<InteractiveElement>;
}

/// Snapshot of a rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTree {
    pub root: LayoutNode,
    /// Full content width, independent of any scroll viewport.
    pub scroll_width: u32,
    /// Full content height, independent of any scroll viewport.
    pub scroll_height: u32,
}

impl LayoutTree {
    pub fn new(root: LayoutNode, scroll_width: u32, scroll_height: u32) -> Self {
        Self {
            root,
            scroll_width,
            scroll_height,
        }
    }

    /// Parse a snapshot serialised as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when there is no area to capture.
    pub fn is_empty(&self) -> bool {
        self.scroll_width == 0 || self.scroll_height == 0
    }
}

impl LayoutSource for LayoutTree {
    fn container_rect(&self) -> Rect {
        self.root.rect
    }

    fn content_size(&self) -> (u32, u32) {
        (self.scroll_width, self.scroll_height)
    }

    fn interactive_elements(&self) -> Vec<InteractiveElement> {
        let mut elements = Vec::new();
        self.root.walk(None, &mut |node, font_size| {
            if let NodeKind::Link { href, content } = &node.kind {
                elements.push(InteractiveElement {
                    href: href.clone(),
                    rect: node.rect,
                    font_size: font_size.map(str::to_owned),
                    text: content.clone(),
                });
            }
        });
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> LayoutTree {
        let mut root = LayoutNode::block(Rect::new(100.0, 50.0, 794.0, 1123.0))
            .with_role("resume-preview")
            .with_style(NodeStyle {
                font_size: Some("12px".into()),
                ..NodeStyle::default()
            });
        let mut header = LayoutNode::block(Rect::new(150.0, 90.0, 694.0, 40.0));
        header.push(LayoutNode::link(
            Rect::new(400.0, 110.0, 48.0, 15.6),
            "https://linkedin.com/in/jordan",
            "LinkedIn",
        ));
        root.push(header);
        root.push(LayoutNode::link(
            Rect::new(700.0, 300.0, 40.0, 18.2),
            "https://github.com/jordan/atlas",
            "(GitHub)",
        )
        .with_style(NodeStyle {
            font_size: Some("14px".into()),
            ..NodeStyle::default()
        }));
        LayoutTree::new(root, 794, 1123)
    }

    #[test]
    fn interactive_elements_in_document_order() {
        let elements = sample_tree().interactive_elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text, "LinkedIn");
        assert_eq!(elements[1].href, "https://github.com/jordan/atlas");
    }

    #[test]
    fn font_size_is_inherited_unless_overridden() {
        let elements = sample_tree().interactive_elements();
        assert_eq!(elements[0].font_size.as_deref(), Some("12px"));
        assert_eq!(elements[1].font_size.as_deref(), Some("14px"));
    }

    #[test]
    fn find_role_locates_nested_marker() {
        let mut tree = sample_tree();
        let mut wrapper = LayoutNode::block(Rect::default());
        wrapper.push(tree.root.clone());
        tree.root = wrapper;
        let found = tree.root.find_role_mut("resume-preview");
        assert!(found.is_some());
        assert!(tree.root.find_role_mut("missing").is_none());
    }

    #[test]
    fn json_snapshot_round_trips() {
        let tree = sample_tree();
        let json = tree.to_json().unwrap();
        assert!(json.contains("\"type\": \"link\""));
        assert_eq!(LayoutTree::from_json(&json).unwrap(), tree);
    }

    #[test]
    fn zero_height_tree_is_empty() {
        let tree = LayoutTree::new(LayoutNode::block(Rect::default()), 794, 0);
        assert!(tree.is_empty());
    }
}
