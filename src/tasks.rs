//! Periodic task bodies.
//!
//! [`Tasks`] owns everything that only the periodic-task context touches
//! (button debouncers, the bus pump, the CAN driver, the input samplers)
//! and borrows the cross-context [`Shared`] state.  The timer facility
//! calls [`Tasks::run_due`] every tick.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::bus::{BusPump, CanBus};
use crate::input::{AnalogInputs, ButtonBank, DigitalInputs};
use crate::sched::{Scheduler, TaskId};
use crate::shared::Shared;

pub struct Tasks<'a, M: RawMutex, B, D, A> {
    shared: &'a Shared<M>,
    buttons: ButtonBank,
    pump: BusPump,
    bus: B,
    digital: D,
    analog: A,
}

impl<'a, M, B, D, A> Tasks<'a, M, B, D, A>
where
    M: RawMutex,
    B: CanBus,
    D: DigitalInputs,
    A: AnalogInputs,
{
    pub fn new(
        shared: &'a Shared<M>,
        buttons: ButtonBank,
        pump: BusPump,
        bus: B,
        digital: D,
        analog: A,
    ) -> Self {
        Self {
            shared,
            buttons,
            pump,
            bus,
            digital,
            analog,
        }
    }

    /// Run every task that is due at `now`, fastest first.
    pub fn run_due(&mut self, scheduler: &mut Scheduler, now: u32) {
        for task in scheduler.due(now) {
            self.run(task);
        }
    }

    /// Run one invocation of `task`.
    pub fn run(&mut self, task: TaskId) {
        match task {
            TaskId::CanRx => {
                self.pump.drain_rx(&mut self.bus);
            }
            TaskId::Debounce => {
                self.buttons
                    .sample_into(&mut self.digital, self.shared.events());
                self.pump.drain_tx(&mut self.bus);
            }
            TaskId::PinWatch => {
                let analog = &mut self.analog;
                self.shared.with(|nav| {
                    nav.refresh_observed(analog);
                    nav.tick_inactivity();
                });
            }
            TaskId::Heartbeat => {
                if !self.pump.heartbeat() {
                    debug!("Heartbeat dropped ({} queued)", self.pump.queued());
                }
            }
        }
    }

    pub fn pump(&self) -> &BusPump {
        &self.pump
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn digital_mut(&mut self) -> &mut D {
        &mut self.digital
    }

    pub fn analog_mut(&mut self) -> &mut A {
        &mut self.analog
    }
}
