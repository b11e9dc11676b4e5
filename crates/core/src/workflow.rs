//! Composition strategy selection for outfit rendering.
//!
//! The generation model enforces a hard cap on input images per call. When
//! an outfit's item images fit under the cap, the render happens in a single
//! call (body + headshot + item images). When they exceed it, a staged
//! pipeline first synthesizes one intermediate "on mannequin" image from all
//! item images, then composes {body, mannequin, headshot} in a final call.
//! The staged path trades one extra model call for an unbounded item count.

/// How an outfit render should be composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionStrategy {
    /// Single model call: body, headshot, and all item images together.
    Direct,
    /// Two model calls: mannequin synthesis from item images, then the
    /// final composite of body, mannequin image, and headshot.
    Staged,
}

/// Pick the composition strategy for an outfit render.
///
/// Staged iff `item_image_count > model_input_ceiling`. The ceiling counts
/// only item images; the body and headshot slots are accounted for by the
/// caller when configuring it.
pub fn select_workflow(item_image_count: usize, model_input_ceiling: usize) -> CompositionStrategy {
    if item_image_count > model_input_ceiling {
        CompositionStrategy::Staged
    } else {
        CompositionStrategy::Direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_two() {
        assert_eq!(select_workflow(1, 2), CompositionStrategy::Direct);
        assert_eq!(select_workflow(2, 2), CompositionStrategy::Direct);
        assert_eq!(select_workflow(3, 2), CompositionStrategy::Staged);
        assert_eq!(select_workflow(12, 2), CompositionStrategy::Staged);
    }

    #[test]
    fn ceiling_seven() {
        for count in 1..=7 {
            assert_eq!(select_workflow(count, 7), CompositionStrategy::Direct);
        }
        assert_eq!(select_workflow(8, 7), CompositionStrategy::Staged);
        assert_eq!(select_workflow(40, 7), CompositionStrategy::Staged);
    }

    #[test]
    fn zero_images_is_direct() {
        assert_eq!(select_workflow(0, 7), CompositionStrategy::Direct);
    }

    #[test]
    fn exact_ceiling_is_direct() {
        assert_eq!(select_workflow(7, 7), CompositionStrategy::Direct);
    }
}
