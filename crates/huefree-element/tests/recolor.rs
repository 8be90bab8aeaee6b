//! Element recoloring against the in-memory tree.
//!
//! Run with: `cargo test -p huefree-element`

use std::sync::Arc;

use huefree_core::{
    ColorMatrixFilter, ColorTuple, CustomVisionSet, PixelBuffer, VisionDefinition, VisionMatrix,
    VisionPipeline, parse_color,
};
use huefree_element::{
    ElementRecolorer, ElementTree, ImageOutcome, LoadNotifier, MemoryTree, NodeId,
};
use parking_lot::Mutex;

fn red_pixels() -> PixelBuffer {
    PixelBuffer::new(2, 1, vec![[200, 0, 0, 255], [200, 0, 0, 128]]).unwrap()
}

/// Custom set with a map that swaps red and blue.
fn swap_set() -> CustomVisionSet {
    let mut set = CustomVisionSet::new(["swap"]);
    set.vision_mut("swap").unwrap().set_map(|t| {
        let mut out = t.clone();
        out[0] = t[2];
        out[2] = t[0];
        out
    });
    set
}

#[tokio::test]
async fn test_element_styles_are_recolored() {
    let mut tree = MemoryTree::new("div");
    let root = tree.root();
    tree.set_computed_style(root, "border-top", "1px solid rgb(255, 0, 0)");
    tree.set_computed_style(root, "display", "block");
    tree.set_computed_style(root, "color", "rgba(0, 128, 0, 0.5)");

    let recolorer = ElementRecolorer::builtin();
    let report = recolorer
        .apply_vision(&mut tree, root, "achromatopsia")
        .await
        .unwrap();

    assert_eq!(report.properties, 2);
    assert_eq!(report.image, ImageOutcome::NotImage);
    assert_eq!(tree.style(root, "display"), Some("block"));

    let border = tree.style(root, "border-top").unwrap();
    assert!(border.starts_with("1px solid rgb("), "{border}");
    let gray = parse_color(border).unwrap();
    assert!((gray[0] - gray[1]).abs() < 1e-6 && (gray[1] - gray[2]).abs() < 1e-6);

    let color = parse_color(tree.style(root, "color").unwrap()).unwrap();
    assert_eq!(color.alpha(), Some(0.5));
}

#[tokio::test]
async fn test_unknown_vision_leaves_tree_alone() {
    let mut tree = MemoryTree::new("div");
    let root = tree.root();
    tree.set_computed_style(root, "color", "rgb(1, 2, 3)");

    let recolorer = ElementRecolorer::builtin();
    assert!(recolorer.apply_vision(&mut tree, root, "nope").await.is_none());
    assert!(recolorer.apply_vision_recursive(&mut tree, root, "nope").await.is_none());
    assert_eq!(tree.style(root, "color"), Some("rgb(1, 2, 3)"));
}

#[tokio::test]
async fn test_recursive_is_breadth_first() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let mut set = CustomVisionSet::default();
    set.define(
        "record",
        VisionDefinition::from_map(move |t| {
            log.lock().push(t[0]);
            t.clone()
        }),
    );

    let mut tree = MemoryTree::new("body");
    let root = tree.root();
    let a = tree.append_element(root, "section");
    let b = tree.append_element(root, "section");
    let a_child = tree.append_element(a, "p");
    tree.append_text(a_child);
    for (node, red) in [(root, 1), (a, 2), (b, 3), (a_child, 4)] {
        tree.set_computed_style(node, "color", &format!("rgb({red}, 0, 0)"));
    }

    let recolorer = ElementRecolorer::new(&set);
    let report = recolorer
        .apply_vision_recursive(&mut tree, root, "record")
        .await
        .unwrap();

    assert_eq!(report.elements, 4);
    assert_eq!(report.properties, 4);
    assert!(report.images.is_empty());
    assert_eq!(*seen.lock(), [1.0, 2.0, 3.0, 4.0]);
}

#[tokio::test]
async fn test_matrix_vision_filters_images() {
    let mut tree = MemoryTree::new("body");
    let root = tree.root();
    let first = tree
        .append_image(root, red_pixels(), LoadNotifier::loaded())
        .unwrap();
    let second = tree
        .append_image(root, red_pixels(), LoadNotifier::loaded())
        .unwrap();
    let src_before = tree.image_src(first).unwrap().to_owned();

    let recolorer = ElementRecolorer::builtin();
    let report = recolorer
        .apply_vision_recursive(&mut tree, root, "deuteranopia")
        .await
        .unwrap();

    let expected = VisionPipeline::builtin().filter_for("deuteranopia").unwrap();
    let filtered = ImageOutcome::Filtered {
        filter_id: expected.id().to_owned(),
    };
    assert_eq!(report.images, [filtered.clone(), filtered]);
    assert_eq!(tree.filters(), [expected.clone()]);
    assert!(tree.filters()[0].to_svg().contains("feColorMatrix"));
    for img in [first, second] {
        assert_eq!(tree.style(img, "filter"), Some(expected.css_reference().as_str()));
    }
    assert_eq!(tree.image_src(first), Some(src_before.as_str()));
}

const LUMINANCE: [[f64; 3]; 3] = [[0.2126, 0.7152, 0.0722]; 3];

/// The filter an image references, looked up among the installed ones.
fn installed_filter(tree: &MemoryTree, img: NodeId) -> &ColorMatrixFilter {
    let reference = tree.style(img, "filter").unwrap();
    tree.filters()
        .iter()
        .find(|f| f.css_reference() == reference)
        .unwrap()
}

#[tokio::test]
async fn test_similar_names_get_their_own_filters() {
    let mut set = CustomVisionSet::default();
    set.define("my vision", VisionDefinition::from_matrix(VisionMatrix::identity()));
    set.define("my_vision", VisionDefinition::from_matrix(LUMINANCE));

    let mut tree = MemoryTree::new("body");
    let root = tree.root();
    let a = tree
        .append_image(root, red_pixels(), LoadNotifier::loaded())
        .unwrap();
    let b = tree
        .append_image(root, red_pixels(), LoadNotifier::loaded())
        .unwrap();

    let recolorer = ElementRecolorer::new(&set);
    let ra = recolorer.apply_vision(&mut tree, a, "my vision").await.unwrap();
    let rb = recolorer.apply_vision(&mut tree, b, "my_vision").await.unwrap();

    assert_ne!(ra.image, rb.image);
    assert_eq!(tree.filters().len(), 2);
    assert_eq!(
        installed_filter(&tree, a).values(),
        ColorMatrixFilter::new("my vision", &VisionMatrix::identity()).values()
    );
    assert_eq!(
        installed_filter(&tree, b).values(),
        ColorMatrixFilter::new("my_vision", &VisionMatrix(LUMINANCE)).values()
    );
}

#[tokio::test]
async fn test_redefined_builtin_name_installs_its_own_filter() {
    let mut custom = CustomVisionSet::default();
    custom.define("protanopia", VisionDefinition::from_matrix(VisionMatrix::identity()));

    let mut tree = MemoryTree::new("body");
    let root = tree.root();
    let a = tree
        .append_image(root, red_pixels(), LoadNotifier::loaded())
        .unwrap();
    let b = tree
        .append_image(root, red_pixels(), LoadNotifier::loaded())
        .unwrap();

    ElementRecolorer::builtin()
        .apply_vision(&mut tree, a, "protanopia")
        .await
        .unwrap();
    ElementRecolorer::new(&custom)
        .apply_vision(&mut tree, b, "protanopia")
        .await
        .unwrap();

    assert_eq!(tree.filters().len(), 2);
    assert_ne!(tree.style(a, "filter"), tree.style(b, "filter"));
    assert_eq!(
        installed_filter(&tree, b).values(),
        "1 0 0 0 0 0 1 0 0 0 0 0 1 0 0 0 0 0 1 0"
    );
    assert_eq!(
        installed_filter(&tree, a),
        &VisionPipeline::builtin().filter_for("protanopia").unwrap()
    );
}

#[tokio::test]
async fn test_map_vision_rewrites_pixels() {
    let set = swap_set();
    let mut tree = MemoryTree::new("body");
    let img = tree
        .append_image(tree.root(), red_pixels(), LoadNotifier::loaded())
        .unwrap();
    tree.set_computed_style(img, "border-color", "rgb(10, 20, 30)");

    let recolorer = ElementRecolorer::new(&set);
    let report = recolorer.apply_vision(&mut tree, img, "swap").await.unwrap();

    assert_eq!(report.image, ImageOutcome::Recolored { distinct_colors: 2 });
    assert_eq!(report.properties, 1);
    assert_eq!(tree.style(img, "border-color"), Some("rgb(30, 20, 10)"));

    let px = tree.read_pixels(img).unwrap();
    assert_eq!(px.pixels, [[0, 0, 200, 255], [0, 0, 200, 128]]);
    let decoded = PixelBuffer::from_data_url(tree.image_src(img).unwrap()).unwrap();
    assert_eq!(decoded, px);
    assert!(tree.filters().is_empty());
}

#[tokio::test]
async fn test_unreadable_image_fails_but_styles_still_apply() {
    let set = swap_set();
    let mut tree = MemoryTree::new("body");
    let img = tree.append_opaque_image(
        tree.root(),
        "https://elsewhere.example/cat.png",
        LoadNotifier::loaded(),
    );
    tree.set_computed_style(img, "outline-color", "rgb(1, 2, 3)");

    let recolorer = ElementRecolorer::new(&set);
    let report = recolorer.apply_vision(&mut tree, img, "swap").await.unwrap();

    assert_eq!(report.image, ImageOutcome::Failed);
    assert_eq!(tree.style(img, "outline-color"), Some("rgb(3, 2, 1)"));
    assert_eq!(tree.image_src(img), Some("https://elsewhere.example/cat.png"));
}

#[tokio::test]
async fn test_waits_for_pending_image() {
    let set = swap_set();
    let mut tree = MemoryTree::new("body");
    let img = tree
        .append_image(tree.root(), red_pixels(), LoadNotifier::pending())
        .unwrap();
    let notifier = tree.load_notifier(img).unwrap();

    let recolorer = ElementRecolorer::new(&set);
    let (report, _) = tokio::join!(recolorer.apply_vision(&mut tree, img, "swap"), async {
        tokio::task::yield_now().await;
        notifier.notify_loaded();
    });

    let report = report.unwrap();
    assert!(matches!(report.image, ImageOutcome::Recolored { .. }));
    assert_eq!(tree.read_pixels(img).unwrap().pixels[0], [0, 0, 200, 255]);
}

#[tokio::test]
async fn test_never_loaded_image_never_completes() {
    let mut tree = MemoryTree::new("body");
    let img = tree
        .append_image(tree.root(), red_pixels(), LoadNotifier::pending())
        .unwrap();

    let recolorer = ElementRecolorer::builtin();
    tokio::select! {
        biased;
        _ = recolorer.apply_vision(&mut tree, img, "protanopia") => {
            panic!("recolored an image that never loaded")
        }
        _ = tokio::task::yield_now() => {}
    }
    assert!(tree.style(img, "filter").is_none());
}

#[tokio::test]
async fn test_text_targets() {
    let recolorer = ElementRecolorer::builtin();
    assert_eq!(
        recolorer.apply_text("none", "tritanopia").as_deref(),
        Some("none")
    );
    let out = recolorer.apply_text("rgb(0, 0, 0)", "tritanopia").unwrap();
    assert_eq!(parse_color(&out), Some(ColorTuple::rgb(0.0, 0.0, 0.0)));
}

#[test]
fn test_node_ids_are_copyable_handles() {
    let mut tree = MemoryTree::new("body");
    let a: NodeId = tree.append_element(tree.root(), "div");
    let b = a;
    assert_eq!(a, b);
    assert!(tree.is_element(b));
}
