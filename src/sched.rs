//! Fixed-period task table.
//!
//! The timer facility calls [`Scheduler::due`] with a free-running tick
//! count (1 ms ticks on the target, a virtual clock in tests) and runs
//! whatever comes back.  Tasks are reported fastest first.  A task that
//! is polled late runs once and is rescheduled one period after the
//! current tick; missed periods are not replayed.

use heapless::Vec;

use crate::config::{
    CAN_RX_PERIOD_TICKS, DEBOUNCE_PERIOD_TICKS, HEARTBEAT_PERIOD_TICKS, PIN_WATCH_PERIOD_TICKS,
};

pub const TASK_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskId {
    /// Drain inbound CAN frames.
    CanRx,
    /// Debounce buttons, drain outbound CAN frames.
    Debounce,
    /// Refresh observed inputs, advance the menu timeout.
    PinWatch,
    /// Queue a heartbeat frame.
    Heartbeat,
}

impl TaskId {
    /// All tasks, fastest first.
    pub const ALL: [TaskId; TASK_COUNT] =
        [TaskId::CanRx, TaskId::Debounce, TaskId::PinWatch, TaskId::Heartbeat];

    /// Default period in ticks.
    pub const fn period(self) -> u32 {
        match self {
            TaskId::CanRx => CAN_RX_PERIOD_TICKS,
            TaskId::Debounce => DEBOUNCE_PERIOD_TICKS,
            TaskId::PinWatch => PIN_WATCH_PERIOD_TICKS,
            TaskId::Heartbeat => HEARTBEAT_PERIOD_TICKS,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    task: TaskId,
    period: u32,
    next_due: u32,
}

pub type DueTasks = Vec<TaskId, TASK_COUNT>;

pub struct Scheduler {
    slots: [Slot; TASK_COUNT],
}

impl Scheduler {
    /// Default periods; every task first fires one period after `start`.
    pub fn new(start: u32) -> Self {
        Self::with_periods(start, TaskId::ALL.map(|task| (task, task.period())))
    }

    /// Custom periods (ticks, clamped to at least 1).  Slots are ordered
    /// by period so [`Scheduler::due`] stays fastest first.
    pub fn with_periods(start: u32, periods: [(TaskId, u32); TASK_COUNT]) -> Self {
        let slots = periods.map(|(task, period)| {
            let period = period.max(1);
            Slot {
                task,
                period,
                next_due: start.wrapping_add(period),
            }
        });
        // stable sort by period (core has no stable slice sort in no_std)
        let mut order: [usize; TASK_COUNT] = core::array::from_fn(|i| i);
        order.sort_unstable_by_key(|&i| (slots[i].period, i));
        let slots = order.map(|i| slots[i]);
        Self { slots }
    }

    pub fn period(&self, task: TaskId) -> Option<u32> {
        self.slots.iter().find(|s| s.task == task).map(|s| s.period)
    }

    /// Tasks due at `now`, fastest first.  Each returned task is
    /// rescheduled for `now + period`.
    pub fn due(&mut self, now: u32) -> DueTasks {
        let mut due = DueTasks::new();
        for slot in self.slots.iter_mut() {
            // wrapping comparison: due if `now` is at or past `next_due`
            if (now.wrapping_sub(slot.next_due) as i32) >= 0 {
                slot.next_due = now.wrapping_add(slot.period);
                // one slot per task, capacity always suffices
                let _ = due.push(slot.task);
            }
        }
        due
    }
}
