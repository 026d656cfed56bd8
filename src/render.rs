//! Layered rendering of the frame history.
//!
//! Each frame occupies one slot in a vertical column: a heading band with a
//! label, the scaled image, and the two overlay outlines on top of it.
//! Layout is computed as plain geometry so it can be tested without a
//! window; painting applies the slots to an egui painter.

use egui::{
    Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, TextureHandle,
    pos2, vec2,
};

use crate::config::RectSpec;
use crate::constants::view;

/// Geometry and label for one frame slot in the composited column.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSlot {
    pub heading_band: Rect,
    pub label: String,
    pub label_pos: Pos2,
    pub image_rect: Rect,
    pub red_outline: Rect,
    pub green_outline: Rect,
}

/// Canvas height needed for `count` frames.
pub fn column_height(count: usize, image_height: u32) -> f32 {
    count as f32 * (view::HEADING_HEIGHT + image_height) as f32
}

/// Stack `count` frame slots top to bottom, newest first.
pub fn layout_frames(
    count: usize,
    image_size: (u32, u32),
    red: RectSpec,
    green: RectSpec,
) -> Vec<FrameSlot> {
    let (width, height) = (image_size.0 as f32, image_size.1 as f32);
    let heading_height = view::HEADING_HEIGHT as f32;

    let mut slots = Vec::with_capacity(count);
    let mut y = 0.0;
    for i in 0..count {
        let heading_band = Rect::from_min_size(pos2(0.0, y), vec2(width, heading_height));
        let mut label = format!("{}", i + 1);
        if i == 0 {
            label.push_str(" - Newest");
        } else if i + 1 == count {
            label.push_str(" - Latest");
        }
        let label_pos = pos2(view::HEADING_PADDING_LEFT, heading_band.center().y);

        y += heading_height;
        let image_rect = Rect::from_min_size(pos2(0.0, y), vec2(width, height));
        // Outline corners are taken verbatim; reversed corners stay reversed
        // instead of being normalized away.
        let red_outline = outline_rect(&red, y);
        let green_outline = outline_rect(&green, y);
        y += height;

        slots.push(FrameSlot {
            heading_band,
            label,
            label_pos,
            image_rect,
            red_outline,
            green_outline,
        });
    }
    slots
}

fn outline_rect(spec: &RectSpec, image_top: f32) -> Rect {
    Rect::from_min_size(
        pos2(spec.x1 as f32, image_top + spec.y1 as f32),
        vec2(spec.width() as f32, spec.height() as f32),
    )
}

/// Paint the composited column. `textures` holds one uploaded texture per
/// history frame, in the same newest-first order as the slots.
pub fn paint(painter: &Painter, slots: &[FrameSlot], textures: &[TextureHandle]) {
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    for (slot, texture) in slots.iter().zip(textures) {
        painter.rect_filled(slot.heading_band, CornerRadius::ZERO, Color32::LIGHT_GRAY);
        painter.text(
            slot.label_pos,
            Align2::LEFT_CENTER,
            &slot.label,
            FontId::proportional(view::HEADING_FONT_SIZE),
            Color32::BLACK,
        );
        painter.image(texture.id(), slot.image_rect, uv, Color32::WHITE);
        painter.rect_stroke(
            slot.red_outline,
            CornerRadius::ZERO,
            Stroke::new(view::RECT_STROKE_WIDTH, Color32::RED),
            StrokeKind::Middle,
        );
        painter.rect_stroke(
            slot.green_outline,
            CornerRadius::ZERO,
            Stroke::new(view::RECT_STROKE_WIDTH, Color32::GREEN),
            StrokeKind::Middle,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: RectSpec = RectSpec { x1: 0, y1: 0, x2: 50, y2: 50 };
    const GREEN: RectSpec = RectSpec { x1: 60, y1: 0, x2: 110, y2: 50 };

    #[test]
    fn test_single_frame_is_labelled_newest() {
        // With one frame both label rules match; the first one wins.
        let slots = layout_frames(1, (200, 100), RED, GREEN);
        assert_eq!(slots[0].label, "1 - Newest");
    }

    #[test]
    fn test_two_frame_labels() {
        let slots = layout_frames(2, (200, 100), RED, GREEN);
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["1 - Newest", "2 - Latest"]);
    }

    #[test]
    fn test_three_frame_labels() {
        let slots = layout_frames(3, (200, 100), RED, GREEN);
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["1 - Newest", "2", "3 - Latest"]);
    }

    #[test]
    fn test_vertical_stacking() {
        let slots = layout_frames(3, (200, 100), RED, GREEN);
        for (i, slot) in slots.iter().enumerate() {
            let top = i as f32 * 124.0;
            assert_eq!(slot.heading_band.min, pos2(0.0, top));
            assert_eq!(slot.heading_band.max, pos2(200.0, top + 24.0));
            assert_eq!(slot.image_rect.min, pos2(0.0, top + 24.0));
            assert_eq!(slot.image_rect.max, pos2(200.0, top + 124.0));
        }
        assert_eq!(column_height(3, 100), 372.0);
    }

    #[test]
    fn test_outlines_follow_their_image_slot() {
        let slots = layout_frames(2, (200, 100), RED, GREEN);
        // Second slot: image top at 124 + 24
        assert_eq!(slots[1].red_outline.min, pos2(0.0, 148.0));
        assert_eq!(slots[1].red_outline.max, pos2(50.0, 198.0));
        assert_eq!(slots[1].green_outline.min, pos2(60.0, 148.0));
        assert_eq!(slots[1].green_outline.max, pos2(110.0, 198.0));
    }

    #[test]
    fn test_label_position_inside_heading_band() {
        let slots = layout_frames(1, (200, 100), RED, GREEN);
        assert_eq!(slots[0].label_pos, pos2(10.0, 12.0));
    }

    #[test]
    fn test_degenerate_rect_is_not_normalized() {
        let reversed = RectSpec { x1: 50, y1: 50, x2: 0, y2: 0 };
        let slots = layout_frames(1, (200, 100), reversed, GREEN);
        let outline = slots[0].red_outline;
        assert_eq!(outline.min, pos2(50.0, 74.0));
        assert_eq!(outline.max, pos2(0.0, 24.0));
        assert!(outline.max.x < outline.min.x);
    }

    #[test]
    fn test_empty_history_produces_no_slots() {
        assert!(layout_frames(0, (200, 100), RED, GREEN).is_empty());
        assert_eq!(column_height(0, 100), 0.0);
    }
}
