//! Three-level time history for the leapfrog scheme
//!
//! Three owned buffers hold the levels `t-1`, `t` and `t+1`. Roles rotate
//! through a head index instead of copying data between slots:
//!
//! ```text
//! head -> oldest (t-1)   head+1 -> current (t)   head+2 -> newest (t+1)
//! ```
//!
//! After an update, [`TimeLevels::rotate`] makes the old current level the
//! oldest and the freshly computed level the current one; the old oldest
//! buffer is recycled as the next scratch level.

use super::fields::FieldData;

/// Rotating oldest / current / newest field buffers
#[derive(Debug, Clone)]
pub struct TimeLevels {
    slots: [FieldData; 3],
    head: usize,
}

impl TimeLevels {
    /// Allocate three zero-filled levels
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            slots: [
                FieldData::new(width, height),
                FieldData::new(width, height),
                FieldData::new(width, height),
            ],
            head: 0,
        }
    }

    /// Level `t-1`
    #[must_use]
    pub fn oldest(&self) -> &FieldData {
        &self.slots[self.head]
    }

    /// Level `t`, the most recently completed step
    #[must_use]
    pub fn current(&self) -> &FieldData {
        &self.slots[(self.head + 1) % 3]
    }

    /// Mutable access to levels `t-1` and `t`, used to seed initial conditions
    pub fn history_mut(&mut self) -> (&mut FieldData, &mut FieldData) {
        let (oldest, current, _) = self.split_mut();
        (oldest, current)
    }

    /// Borrow all three roles at once as `(oldest, current, newest)`
    pub fn split_mut(&mut self) -> (&mut FieldData, &mut FieldData, &mut FieldData) {
        let [s0, s1, s2] = &mut self.slots;
        match self.head {
            0 => (s0, s1, s2),
            1 => (s1, s2, s0),
            _ => (s2, s0, s1),
        }
    }

    /// Promote newest -> current -> oldest
    pub fn rotate(&mut self) {
        self.head = (self.head + 1) % 3;
    }

    /// Zero every level and restore the initial role assignment
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.fill(0.0);
        }
        self.head = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_promotes_levels() {
        let mut levels = TimeLevels::new(3, 3);
        {
            let (oldest, current, newest) = levels.split_mut();
            oldest.fill(1.0);
            current.fill(2.0);
            newest.fill(3.0);
        }

        levels.rotate();
        assert_eq!(levels.oldest().get(1, 1), 2.0);
        assert_eq!(levels.current().get(1, 1), 3.0);

        // Old oldest buffer is recycled as the scratch level
        let (_, _, newest) = levels.split_mut();
        assert_eq!(newest.get(1, 1), 1.0);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut levels = TimeLevels::new(2, 2);
        levels.history_mut().1.fill(5.0);
        for _ in 0..3 {
            levels.rotate();
        }
        assert_eq!(levels.current().get(0, 0), 5.0);
        assert_eq!(levels.oldest().get(0, 0), 0.0);
    }

    #[test]
    fn test_clear_resets_head() {
        let mut levels = TimeLevels::new(2, 2);
        levels.history_mut().1.fill(5.0);
        levels.rotate();
        levels.clear();
        assert_eq!(levels.current().get(1, 0), 0.0);
        assert_eq!(levels.oldest().get(1, 0), 0.0);
    }
}
