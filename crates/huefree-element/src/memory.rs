//! Arena-backed [`ElementTree`] held entirely in memory.
//!
//! Computed and written styles share one ordered property list per node:
//! writing a property overwrites it in place, or appends it if new.

use huefree_core::{ColorMatrixFilter, PixelBuffer};

use crate::{ElementError, ElementTree, LoadNotifier, LoadSignal};

/// Index of a node in a [`MemoryTree`].
///
/// Only meaningful for the tree that handed it out. Every accessor indexes
/// the arena directly and panics on an id from a larger foreign tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Element { tag: String },
    Text,
}

#[derive(Debug)]
struct MemoryImage {
    /// `None` when the pixels are not readable (e.g. cross-origin).
    pixels: Option<PixelBuffer>,
    /// Current encoded source, replaced on every pixel write.
    src: String,
    load: LoadNotifier,
}

#[derive(Debug)]
struct MemoryNode {
    kind: NodeKind,
    styles: Vec<(String, String)>,
    children: Vec<NodeId>,
    image: Option<MemoryImage>,
}

/// An in-memory element tree.
#[derive(Debug)]
pub struct MemoryTree {
    nodes: Vec<MemoryNode>,
    filters: Vec<ColorMatrixFilter>,
}

impl MemoryTree {
    /// A tree with a single root element.
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![MemoryNode {
                kind: NodeKind::Element {
                    tag: root_tag.to_owned(),
                },
                styles: Vec::new(),
                children: Vec::new(),
                image: None,
            }],
            filters: Vec::new(),
        }
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                tag: tag.to_owned(),
            },
            None,
        )
    }

    /// Append a text node under `parent`. Text nodes carry no styles.
    pub fn append_text(&mut self, parent: NodeId) -> NodeId {
        self.push(parent, NodeKind::Text, None)
    }

    /// Append an `img` element whose pixels are readable.
    ///
    /// The image starts out loaded unless `load` says otherwise.
    pub fn append_image(
        &mut self,
        parent: NodeId,
        pixels: PixelBuffer,
        load: LoadNotifier,
    ) -> Result<NodeId, ElementError> {
        let src = pixels.to_data_url()?;
        let image = MemoryImage {
            pixels: Some(pixels),
            src,
            load,
        };
        Ok(self.push(parent, Self::img(), Some(image)))
    }

    /// Append an `img` element whose pixels cannot be read.
    pub fn append_opaque_image(
        &mut self,
        parent: NodeId,
        src: &str,
        load: LoadNotifier,
    ) -> NodeId {
        let image = MemoryImage {
            pixels: None,
            src: src.to_owned(),
            load,
        };
        self.push(parent, Self::img(), Some(image))
    }

    /// Set a computed style property.
    pub fn set_computed_style(&mut self, node: NodeId, property: &str, value: &str) {
        let styles = &mut self.nodes[node.0].styles;
        match styles.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value.to_owned(),
            None => styles.push((property.to_owned(), value.to_owned())),
        }
    }

    /// Current value of a style property.
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes[node.0]
            .styles
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Tag name of an element.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Text => None,
        }
    }

    /// Encoded source of an image.
    pub fn image_src(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].image.as_ref().map(|i| i.src.as_str())
    }

    /// Load notifier of an image.
    pub fn load_notifier(&self, node: NodeId) -> Option<LoadNotifier> {
        self.nodes[node.0].image.as_ref().map(|i| i.load.clone())
    }

    /// Installed filters, in installation order.
    pub fn filters(&self) -> &[ColorMatrixFilter] {
        &self.filters
    }

    fn img() -> NodeKind {
        NodeKind::Element {
            tag: "img".to_owned(),
        }
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind, image: Option<MemoryImage>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            kind,
            styles: Vec::new(),
            children: Vec::new(),
            image,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn image(&self, node: NodeId) -> Result<&MemoryImage, ElementError> {
        self.nodes[node.0]
            .image
            .as_ref()
            .ok_or_else(|| ElementError::NotAnImage(format!("{node:?}")))
    }
}

impl ElementTree for MemoryTree {
    type Node = NodeId;

    fn is_element(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Element { .. })
    }

    fn is_image(&self, node: NodeId) -> bool {
        self.nodes[node.0].image.is_some()
    }

    fn computed_styles(&self, node: NodeId) -> Vec<(String, String)> {
        self.nodes[node.0].styles.clone()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.set_computed_style(node, property, value);
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn is_loaded(&self, node: NodeId) -> bool {
        self.nodes[node.0]
            .image
            .as_ref()
            .is_none_or(|i| i.load.is_loaded())
    }

    fn subscribe_loaded(&self, node: NodeId) -> LoadSignal {
        match &self.nodes[node.0].image {
            Some(i) => i.load.subscribe(),
            None => LoadNotifier::loaded().subscribe(),
        }
    }

    fn read_pixels(&self, node: NodeId) -> Result<PixelBuffer, ElementError> {
        self.image(node)?
            .pixels
            .clone()
            .ok_or_else(|| ElementError::PixelAccess(format!("{node:?}")))
    }

    fn write_pixels(&mut self, node: NodeId, pixels: &PixelBuffer) -> Result<(), ElementError> {
        self.image(node)?;
        let src = pixels.to_data_url()?;
        if let Some(image) = self.nodes[node.0].image.as_mut() {
            image.pixels = Some(pixels.clone());
            image.src = src;
        }
        Ok(())
    }

    fn has_filter(&self, id: &str) -> bool {
        self.filters.iter().any(|f| f.id() == id)
    }

    fn install_filter(&mut self, filter: &ColorMatrixFilter) {
        self.filters.push(filter.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> PixelBuffer {
        PixelBuffer::new(1, 1, vec![[10, 20, 30, 255]]).unwrap()
    }

    #[test]
    fn test_structure() {
        let mut tree = MemoryTree::new("body");
        let div = tree.append_element(tree.root(), "div");
        let text = tree.append_text(div);
        assert_eq!(tree.children(tree.root()), [div]);
        assert_eq!(tree.children(div), [text]);
        assert!(tree.is_element(div));
        assert!(!tree.is_element(text));
        assert_eq!(tree.tag(div), Some("div"));
        assert_eq!(tree.tag(text), None);
    }

    #[test]
    fn test_styles_keep_order_and_overwrite() {
        let mut tree = MemoryTree::new("body");
        let root = tree.root();
        tree.set_computed_style(root, "color", "rgb(0, 0, 0)");
        tree.set_computed_style(root, "display", "block");
        tree.set_style(root, "color", "rgb(1, 1, 1)");
        assert_eq!(
            tree.computed_styles(root),
            [
                ("color".to_owned(), "rgb(1, 1, 1)".to_owned()),
                ("display".to_owned(), "block".to_owned()),
            ]
        );
    }

    #[test]
    fn test_image_pixels_roundtrip_through_src() {
        let mut tree = MemoryTree::new("body");
        let img = tree
            .append_image(tree.root(), pixel(), LoadNotifier::loaded())
            .unwrap();
        assert!(tree.is_image(img));
        assert!(tree.is_loaded(img));

        let mut px = tree.read_pixels(img).unwrap();
        px.pixels[0] = [1, 2, 3, 4];
        tree.write_pixels(img, &px).unwrap();
        let src = tree.image_src(img).unwrap();
        assert_eq!(PixelBuffer::from_data_url(src).unwrap(), px);
    }

    #[test]
    fn test_opaque_image_refuses_pixel_access() {
        let mut tree = MemoryTree::new("body");
        let img = tree.append_opaque_image(
            tree.root(),
            "https://elsewhere.example/a.png",
            LoadNotifier::loaded(),
        );
        assert!(matches!(tree.read_pixels(img), Err(ElementError::PixelAccess(_))));
        assert!(matches!(
            tree.read_pixels(tree.root()),
            Err(ElementError::NotAnImage(_))
        ));
    }

    #[test]
    #[should_panic]
    fn test_foreign_node_id_panics() {
        let mut big = MemoryTree::new("body");
        big.append_element(big.root(), "div");
        let foreign = big.append_element(big.root(), "div");
        let small = MemoryTree::new("body");
        small.is_element(foreign);
    }

    #[test]
    fn test_pending_image() {
        let mut tree = MemoryTree::new("body");
        let img = tree
            .append_image(tree.root(), pixel(), LoadNotifier::pending())
            .unwrap();
        assert!(!tree.is_loaded(img));
        tree.load_notifier(img).unwrap().notify_loaded();
        assert!(tree.is_loaded(img));
    }
}
