//! Viewport sampling seam
//!
//! The engine never touches a rendering surface directly. A host (DOM bridge,
//! GPU toolkit, terminal, or [`crate::sim::UniformStrip`]) implements
//! [`ViewportSampler`] and forwards the surface's scroll events to
//! [`InfiniteCarousel::on_scroll`](super::InfiniteCarousel::on_scroll).

use super::types::ItemGeometry;

/// How the host should decide that an item is "visible".
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityCriteria {
    /// Ascending ratios at which visibility changes are observed. Samplers
    /// backed by an intersection observer should use this as its threshold list.
    pub thresholds: Vec<f32>,
    /// An item counts as visible only when its ratio is strictly above this.
    pub min_ratio: f32,
}

impl VisibilityCriteria {
    /// Number of thresholds at or below `ratio`.
    pub fn bucket(&self, ratio: f32) -> usize {
        self.thresholds.iter().filter(|t| ratio >= **t).count()
    }

    pub fn qualifies(&self, ratio: f32) -> bool {
        ratio > self.min_ratio
    }
}

/// One rendered instance intersecting the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleItem {
    pub absolute_index: usize,
    /// Left edge in strip coordinates.
    pub left: f32,
    /// Visible fraction of the item's width, in `(0, 1]`.
    pub ratio: f32,
}

pub trait ViewportSampler {
    /// Current scroll offset from the start of the buffered sequence.
    fn scroll_offset(&self) -> f32;

    /// Largest reachable scroll offset.
    fn max_scroll_offset(&self) -> f32;

    /// Move the viewport instantly. Hosts report the resulting scroll event
    /// back through `on_scroll` like any other.
    fn set_scroll_offset(&mut self, offset: f32);

    /// Geometry of a rendered instance, or `None` when it is not laid out yet.
    fn measure(&self, absolute_index: usize) -> Option<ItemGeometry>;

    /// Instances currently intersecting the viewport.
    fn visible_items(&self, criteria: &VisibilityCriteria) -> Vec<VisibleItem>;

    /// Called after the buffered sequence is rebuilt with `len` instances.
    fn on_buffer_rebuilt(&mut self, _len: usize) {}
}

/// Leftmost item whose visible ratio qualifies under `criteria`.
pub fn leftmost_visible(items: &[VisibleItem], criteria: &VisibilityCriteria) -> Option<usize> {
    items
        .iter()
        .filter(|item| criteria.qualifies(item.ratio))
        .min_by(|a, b| a.left.total_cmp(&b.left))
        .map(|item| item.absolute_index)
}

/// Observation signature: changes whenever an item enters or leaves the
/// viewport, crosses a threshold, or changes qualification.
pub fn visibility_signature(
    items: &[VisibleItem],
    criteria: &VisibilityCriteria,
) -> Vec<(usize, usize, bool)> {
    let mut signature: Vec<_> = items
        .iter()
        .filter(|item| item.ratio > 0.0)
        .map(|item| {
            (
                item.absolute_index,
                criteria.bucket(item.ratio),
                criteria.qualifies(item.ratio),
            )
        })
        .collect();
    signature.sort_unstable();
    signature
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(min_ratio: f32) -> VisibilityCriteria {
        VisibilityCriteria {
            thresholds: vec![0.3, 0.5, 0.7, 1.0],
            min_ratio,
        }
    }

    fn item(absolute_index: usize, left: f32, ratio: f32) -> VisibleItem {
        VisibleItem {
            absolute_index,
            left,
            ratio,
        }
    }

    #[test]
    fn leftmost_skips_barely_visible_items() {
        let items = [
            item(13, 648.0, 1.0),
            item(12, 324.0, 0.2),
            item(14, 972.0, 0.9),
        ];
        assert_eq!(leftmost_visible(&items, &criteria(0.3)), Some(13));
        assert_eq!(leftmost_visible(&items, &criteria(0.1)), Some(12));
        assert_eq!(leftmost_visible(&items, &criteria(1.0)), None);
    }

    #[test]
    fn signature_tracks_threshold_crossings() {
        let c = criteria(0.3);
        let before = visibility_signature(&[item(3, 0.0, 0.55)], &c);
        let within = visibility_signature(&[item(3, 0.0, 0.65)], &c);
        let crossed = visibility_signature(&[item(3, 0.0, 0.75)], &c);
        assert_eq!(before, within);
        assert_ne!(within, crossed);
    }

    #[test]
    fn signature_tracks_qualification_between_thresholds() {
        let c = VisibilityCriteria {
            thresholds: vec![0.5, 1.0],
            min_ratio: 0.3,
        };
        let a = visibility_signature(&[item(3, 0.0, 0.45)], &c);
        let b = visibility_signature(&[item(3, 0.0, 0.25)], &c);
        assert_ne!(a, b);
    }
}
