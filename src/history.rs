//! Bounded most-recent-first frame history.

use std::collections::VecDeque;

use image::RgbaImage;

/// One decoded frame, already scaled to the configured display size.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbaImage,
}

/// Fixed-capacity sequence of frames with the newest at the front.
///
/// Accepting a frame shifts every existing entry one position older; the
/// entry that falls off the back is evicted. `len` never exceeds `capacity`.
#[derive(Debug)]
pub struct FrameHistory {
    frames: VecDeque<Frame>,
    capacity: usize,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push_front(&mut self, frame: Frame) {
        self.frames.push_front(frame);
        self.frames.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames in display order, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    // 1x1 frame whose red channel identifies it in assertions
    fn frame(shade: u8) -> Frame {
        Frame {
            image: RgbaImage::from_pixel(1, 1, Rgba([shade, 0, 0, 255])),
        }
    }

    fn shades(history: &FrameHistory) -> Vec<u8> {
        history.iter().map(|f| f.image.get_pixel(0, 0)[0]).collect()
    }

    #[test]
    fn test_len_is_bounded_by_capacity() {
        let mut history = FrameHistory::new(3);
        for n in 0..6u8 {
            assert_eq!(history.len(), usize::from(n).min(3));
            history.push_front(frame(n));
        }
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_newest_frame_is_at_the_front() {
        let mut history = FrameHistory::new(3);
        history.push_front(frame(1));
        history.push_front(frame(2));
        assert_eq!(shades(&history), vec![2, 1]);
    }

    #[test]
    fn test_oldest_frame_is_evicted_beyond_capacity() {
        let mut history = FrameHistory::new(3);
        for n in 1..=4 {
            history.push_front(frame(n));
        }
        assert_eq!(shades(&history), vec![4, 3, 2]);
    }

    #[test]
    fn test_empty_history() {
        let history = FrameHistory::new(3);
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 3);
        assert_eq!(shades(&history), Vec::<u8>::new());
    }
}
