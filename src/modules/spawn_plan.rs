//! Staggered world creation.
//!
//! A queue of pending creations, each due at a tick. The frame driver
//! drains whatever is due at the start of every tick, so chip `i` appears
//! `spawn_delay * i` seconds after startup and never before chip `i - 1`.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSpawn {
    pub index: usize,
    /// Tick count at which the world becomes due
    pub due_tick: u32,
}

#[derive(Debug, Clone, Default)]
pub struct SpawnPlan {
    pending: VecDeque<PendingSpawn>,
}

impl SpawnPlan {
    /// Plan `count` spawns, `delay` seconds apart, on a clock of `tick_rate` Hz.
    pub fn staggered(count: usize, delay: f32, tick_rate: u32) -> Self {
        let delay_ticks = (delay * tick_rate as f32).round() as u32;
        let pending = (0..count)
            .map(|index| PendingSpawn {
                index,
                due_tick: delay_ticks.saturating_mul(index as u32),
            })
            .collect();
        Self { pending }
    }

    /// Pop every spawn due at or before `tick`, in index order.
    pub fn drain_due(&mut self, tick: u32) -> Vec<PendingSpawn> {
        let mut due = Vec::new();
        while let Some(next) = self.pending.front() {
            if next.due_tick > tick {
                break;
            }
            if let Some(spawn) = self.pending.pop_front() {
                due.push(spawn);
            }
        }
        due
    }

    #[cfg(test)]
    pub(crate) fn remaining(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_ticks_are_spaced() {
        let plan = SpawnPlan::staggered(9, 0.2, 60);
        let ticks: Vec<u32> = plan.pending.iter().map(|s| s.due_tick).collect();
        assert_eq!(ticks, vec![0, 12, 24, 36, 48, 60, 72, 84, 96]);
    }

    #[test]
    fn test_drain_in_order() {
        let mut plan = SpawnPlan::staggered(9, 0.2, 60);
        assert_eq!(plan.drain_due(0).len(), 1);
        assert!(plan.drain_due(11).is_empty());
        let due = plan.drain_due(12);
        assert_eq!(due, vec![PendingSpawn { index: 1, due_tick: 12 }]);

        // A late drain catches up on everything overdue
        let due = plan.drain_due(40);
        assert_eq!(due.iter().map(|s| s.index).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(plan.remaining(), 5);
    }

    #[test]
    fn test_huge_delay_saturates() {
        let mut plan = SpawnPlan::staggered(9, 1.0e8, 60);
        assert_eq!(plan.drain_due(0).len(), 1);
        assert!(plan.pending.iter().all(|s| s.due_tick == u32::MAX));
        assert_eq!(plan.remaining(), 8);
    }

    #[test]
    fn test_zero_delay_spawns_everything_at_once() {
        let mut plan = SpawnPlan::staggered(4, 0.0, 60);
        assert_eq!(plan.drain_due(0).len(), 4);
        assert!(plan.is_empty());
    }
}
