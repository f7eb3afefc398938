use crate::core::{Level, Vec2};

impl Level {
    /// Solved when no box is left off a target.
    pub fn is_won(&self) -> bool {
        self.boxes.iter().all(|b| b.on_target)
    }

    pub fn box_index_at(&self, position: Vec2) -> Option<usize> {
        self.boxes.iter().position(|b| b.position == position)
    }

    pub fn has_box_at(&self, position: Vec2) -> bool {
        self.box_index_at(position).is_some()
    }

    pub fn count_boxes_on_targets(&self) -> usize {
        self.boxes.iter().filter(|b| b.on_target).count()
    }
}
