//! Built-in vision table.
//!
//! Matrices operate on linear sRGB. Dichromacies and anomalous
//! trichromacies follow Machado, Oliveira & Fernandes (2009) at severity 1.0
//! and 0.6 respectively; achromatopsia projects onto Rec.709 luminance and
//! achromatomaly is a 60% blend of it with the identity.
//!
//! # Reference
//! Machado et al., "A Physiologically-based Model for Simulation of Color
//! Vision Deficiency", IEEE TVCG 15(6), 2009

use std::sync::LazyLock;

use super::{VisionDefinition, VisionSource};

const PROTANOPIA: [[f64; 3]; 3] = [
    [0.152286, 1.052583, -0.204868],
    [0.114503, 0.786281, 0.099216],
    [-0.003882, -0.048116, 1.051998],
];

const PROTANOMALY: [[f64; 3]; 3] = [
    [0.385450, 0.769005, -0.154455],
    [0.100526, 0.829802, 0.069673],
    [-0.007442, -0.022190, 1.029632],
];

const DEUTERANOPIA: [[f64; 3]; 3] = [
    [0.367322, 0.860646, -0.227968],
    [0.280085, 0.672501, 0.047413],
    [-0.011820, 0.042940, 0.968881],
];

const DEUTERANOMALY: [[f64; 3]; 3] = [
    [0.547494, 0.607765, -0.155259],
    [0.181692, 0.781742, 0.036566],
    [-0.010410, 0.027275, 0.983136],
];

const TRITANOPIA: [[f64; 3]; 3] = [
    [1.255528, -0.076749, -0.178779],
    [-0.078411, 0.930809, 0.147602],
    [0.004733, 0.691367, 0.303900],
];

const TRITANOMALY: [[f64; 3]; 3] = [
    [1.104996, -0.046633, -0.058363],
    [-0.032137, 0.971635, 0.060503],
    [0.001336, 0.317922, 0.680742],
];

const ACHROMATOPSIA: [[f64; 3]; 3] = [
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
];

const ACHROMATOMALY: [[f64; 3]; 3] = [
    [0.52756, 0.42912, 0.04332],
    [0.12756, 0.82912, 0.04332],
    [0.12756, 0.42912, 0.44332],
];

/// Name, description, matrix.
const TABLE: [(&str, &str, [[f64; 3]; 3]); 8] = [
    (
        "protanopia",
        "Red-blind: no functioning long-wavelength (L) cones.",
        PROTANOPIA,
    ),
    (
        "protanomaly",
        "Red-weak: shifted sensitivity of the L cones.",
        PROTANOMALY,
    ),
    (
        "deuteranopia",
        "Green-blind: no functioning medium-wavelength (M) cones.",
        DEUTERANOPIA,
    ),
    (
        "deuteranomaly",
        "Green-weak: shifted sensitivity of the M cones. The most common form.",
        DEUTERANOMALY,
    ),
    (
        "tritanopia",
        "Blue-blind: no functioning short-wavelength (S) cones.",
        TRITANOPIA,
    ),
    (
        "tritanomaly",
        "Blue-weak: shifted sensitivity of the S cones.",
        TRITANOMALY,
    ),
    (
        "achromatopsia",
        "Complete color blindness: only luminance is perceived.",
        ACHROMATOPSIA,
    ),
    (
        "achromatomaly",
        "Partial color blindness: strongly reduced saturation.",
        ACHROMATOMALY,
    ),
];

static BUILTIN: LazyLock<BuiltinVisions> = LazyLock::new(|| BuiltinVisions {
    entries: TABLE
        .iter()
        .map(|&(name, description, matrix)| {
            (
                name,
                VisionDefinition::from_matrix(matrix).with_description(description),
            )
        })
        .collect(),
});

/// The read-only, process-wide table of built-in visions.
#[derive(Debug)]
pub struct BuiltinVisions {
    entries: Vec<(&'static str, VisionDefinition)>,
}

/// The built-in table. Constructed on first use; safe to share across threads.
pub fn builtin_visions() -> &'static BuiltinVisions {
    &BUILTIN
}

impl VisionSource for BuiltinVisions {
    fn vision(&self, name: &str) -> Option<&VisionDefinition> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| d)
    }

    fn vision_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }
}
