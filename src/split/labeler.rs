//! Per-window class presence labeling.
//!
//! For each clip window and each class in the class set, a class is
//! present when at least one annotation of that class overlaps the window
//! by at least `min_label_length` seconds (any positive overlap when the
//! threshold is zero). Pure over its inputs; labeling the same window
//! twice yields the same vector.

use std::collections::BTreeSet;

use crate::annotations::Annotation;

use super::ClipWindow;

/// Ordered set of class labels defining the label table columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
    classes: BTreeSet<String>,
}

impl ClassSet {
    /// Class set of all labels observed across the given annotations.
    pub fn from_annotations<'a>(annotations: impl IntoIterator<Item = &'a Annotation>) -> Self {
        Self {
            classes: annotations
                .into_iter()
                .map(|a| a.label.clone())
                .collect(),
        }
    }

    /// Class set from a user-supplied list; labels are lowercased.
    pub fn from_labels(labels: impl IntoIterator<Item = String>) -> Self {
        Self {
            classes: labels.into_iter().map(|l| l.to_lowercase()).collect(),
        }
    }

    /// Iterate classes in column order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Whether the set contains a class.
    pub fn contains(&self, label: &str) -> bool {
        self.classes.contains(label)
    }
}

/// Binary presence vector for one window, in class-set column order.
///
/// Annotations whose class is outside the class set are ignored; they
/// never block emission of the window itself.
pub fn label_window(
    window: &ClipWindow,
    annotations: &[Annotation],
    classes: &ClassSet,
    min_label_length: f64,
) -> Vec<bool> {
    classes
        .iter()
        .map(|class| {
            annotations
                .iter()
                .filter(|a| a.label == class)
                .any(|a| {
                    let overlap = a.overlap_with(window.start, window.end);
                    if min_label_length > 0.0 {
                        overlap >= min_label_length
                    } else {
                        overlap > 0.0
                    }
                })
        })
        .collect()
}
