//! Tick-driven task scheduling
//!
//! Timers run on the scene clock, which only moves when the controller calls
//! `advance` at the start of a tick. A task armed during a tick therefore
//! fires on a later tick, never the one that armed it.

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Work the controller performs when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    SpawnHazard,
    GameOver,
}

/// Shortest repeat interval accepted, keeps a zero interval from spinning
const MIN_INTERVAL_MS: f64 = 1.0;

#[derive(Debug, Clone)]
struct Entry {
    id: TaskId,
    task: Task,
    due: f64,
    interval: Option<f64>,
}

/// Millisecond clock plus pending timers
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: f64,
    entries: Vec<Entry>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene clock in milliseconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Run `task` once, `delay_ms` from now
    pub fn schedule_once(&mut self, delay_ms: f64, task: Task) -> TaskId {
        self.insert(delay_ms.max(0.0), None, task)
    }

    /// Run `task` every `interval_ms`, first firing one interval from now
    pub fn schedule_repeating(&mut self, interval_ms: f64, task: Task) -> TaskId {
        let interval = interval_ms.max(MIN_INTERVAL_MS);
        self.insert(interval, Some(interval), task)
    }

    fn insert(&mut self, delay: f64, interval: Option<f64>, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            task,
            due: self.now + delay,
            interval,
        });
        id
    }

    /// Drop a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the clock forward and collect every task that came due, in due
    /// order (ties by arming order). Repeating tasks yield once per elapsed
    /// period.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<(TaskId, Task)> {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.now += delta_ms;
        }

        let mut fired = Vec::new();
        loop {
            let next = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.due <= self.now)
                .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
                .map(|(i, _)| i);

            let Some(index) = next else { break };

            let Entry { id, task, interval, .. } = self.entries[index];
            fired.push((id, task));
            match interval {
                Some(interval) => self.entries[index].due += interval,
                None => {
                    self.entries.swap_remove(index);
                }
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_fires_each_interval_not_at_zero() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(1500.0, Task::SpawnHazard);

        let mut fire_times = Vec::new();
        for _ in 0..50 {
            for _ in scheduler.advance(100.0) {
                fire_times.push(scheduler.now());
            }
        }
        assert_eq!(fire_times, vec![1500.0, 3000.0, 4500.0]);
    }

    #[test]
    fn test_long_frame_catches_up() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_repeating(1500.0, Task::SpawnHazard);

        assert_eq!(scheduler.advance(4600.0).len(), 3);
        assert_eq!(scheduler.advance(1300.0).len(), 0);
        assert_eq!(scheduler.advance(100.0).len(), 1);
    }

    #[test]
    fn test_once_never_fires_in_arming_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(16.0);
        let id = scheduler.schedule_once(0.0, Task::GameOver);

        // The next advance is the first chance to run
        assert_eq!(scheduler.advance(0.0), vec![(id, Task::GameOver)]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_once_respects_delay() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_once(10.0, Task::GameOver);

        assert!(scheduler.advance(6.0).is_empty());
        assert!(scheduler.is_scheduled(id));
        assert_eq!(scheduler.advance(6.0), vec![(id, Task::GameOver)]);
        assert!(!scheduler.is_scheduled(id));
    }

    #[test]
    fn test_cancel_stops_repeating_task() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule_repeating(1500.0, Task::SpawnHazard);

        assert_eq!(scheduler.advance(1500.0).len(), 1);
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.advance(10_000.0).is_empty());
    }

    #[test]
    fn test_due_order_with_ties_by_arming() {
        let mut scheduler = Scheduler::new();
        let spawn = scheduler.schedule_repeating(20.0, Task::SpawnHazard);
        let over = scheduler.schedule_once(10.0, Task::GameOver);
        let late = scheduler.schedule_once(20.0, Task::GameOver);

        let fired = scheduler.advance(25.0);
        assert_eq!(
            fired,
            vec![
                (over, Task::GameOver),
                (spawn, Task::SpawnHazard),
                (late, Task::GameOver),
            ]
        );
    }
}
