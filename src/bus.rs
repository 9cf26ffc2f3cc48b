//! CAN heartbeat and queue pumping.
//!
//! The CAN controller is an external collaborator reached through the
//! non-blocking [`CanBus`] trait.  [`BusPump`] owns a small outbound
//! queue: the heartbeat task pushes into it, the debounce task drains it
//! into the driver.  Both drain directions stop after
//! `CAN_MAX_DRAIN_PER_CALL` polls so a chatty bus cannot stretch a task
//! invocation without bound.

use heapless::Deque;

use crate::config::{CAN_MAX_DRAIN_PER_CALL, CAN_TX_QUEUE_DEPTH, HEARTBEAT_CAN_ID};
use crate::error::Error;

/// Highest 11-bit standard identifier.
pub const MAX_STANDARD_ID: u16 = 0x7FF;

/// Classic CAN data frame with a standard identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CanFrame {
    id: u16,
    len: u8,
    data: [u8; 8],
}

impl CanFrame {
    pub fn new(id: u16, payload: &[u8]) -> Result<Self, Error> {
        if id > MAX_STANDARD_ID {
            return Err(Error::InvalidCanId(id));
        }
        if payload.len() > 8 {
            return Err(Error::FrameTooLong);
        }
        let mut data = [0u8; 8];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            len: payload.len() as u8,
            data,
        })
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }
}

/// Non-blocking CAN driver interface.
pub trait CanBus {
    /// Hand one frame to the controller.  `false` means no mailbox was
    /// free; the caller keeps the frame.
    fn send(&mut self, frame: &CanFrame) -> bool;

    /// Next received frame, if any.
    fn try_receive(&mut self) -> Option<CanFrame>;
}

/// Running counters, for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusStats {
    pub sent: u32,
    pub received: u32,
    pub heartbeats: u32,
    /// Frames dropped because the outbound queue was full.
    pub dropped: u32,
    /// Drain calls that stopped at the per-call bound before seeing
    /// their source run dry.
    pub bounded_drains: u32,
}

/// Result of one drain call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainReport {
    pub frames: usize,
    /// `true` if the call stopped at the bound without seeing its source
    /// run dry.  The outbound queue can be inspected, so for `drain_tx`
    /// this means frames are still queued.  The driver cannot be peeked,
    /// so for `drain_rx` it means more frames may be waiting.
    pub bounded: bool,
}

pub struct BusPump {
    tx: Deque<CanFrame, CAN_TX_QUEUE_DEPTH>,
    max_drain: usize,
    sequence: u8,
    last_received: Option<CanFrame>,
    stats: BusStats,
}

impl BusPump {
    pub fn new(max_drain: usize) -> Self {
        Self {
            tx: Deque::new(),
            max_drain: max_drain.max(1),
            sequence: 0,
            last_received: None,
            stats: BusStats::default(),
        }
    }

    pub fn stats(&self) -> BusStats {
        self.stats
    }

    pub fn queued(&self) -> usize {
        self.tx.len()
    }

    pub fn last_received(&self) -> Option<&CanFrame> {
        self.last_received.as_ref()
    }

    /// Queue a frame for transmission; dropped if the queue is full.
    pub fn enqueue(&mut self, frame: CanFrame) -> bool {
        match self.tx.push_back(frame) {
            Ok(()) => true,
            Err(_) => {
                self.stats.dropped = self.stats.dropped.wrapping_add(1);
                warn!("CAN: tx queue full, dropping frame {=u16:#x}", frame.id());
                false
            }
        }
    }

    /// Next heartbeat payload: rolling sequence byte, then ASCII `'1'..'7'`.
    fn heartbeat_frame(&mut self) -> CanFrame {
        let mut data = [0u8; 8];
        data[0] = b'0'.wrapping_add(self.sequence);
        for (i, byte) in data.iter_mut().enumerate().skip(1) {
            *byte = b'0' + i as u8;
        }
        self.sequence = self.sequence.wrapping_add(1);
        CanFrame {
            id: HEARTBEAT_CAN_ID & MAX_STANDARD_ID,
            len: 8,
            data,
        }
    }

    /// Queue one heartbeat.  Returns `false` if it was dropped.
    pub fn heartbeat(&mut self) -> bool {
        let frame = self.heartbeat_frame();
        let queued = self.enqueue(frame);
        if queued {
            self.stats.heartbeats = self.stats.heartbeats.wrapping_add(1);
        }
        queued
    }

    /// Move queued frames into the driver until the queue is empty, the
    /// driver refuses one, or the bound is reached.
    pub fn drain_tx<B: CanBus>(&mut self, bus: &mut B) -> DrainReport {
        let mut frames = 0;
        while frames < self.max_drain {
            let Some(frame) = self.tx.front() else {
                break;
            };
            if !bus.send(frame) {
                // mailboxes full, retry next invocation
                break;
            }
            self.tx.pop_front();
            frames += 1;
        }
        self.stats.sent = self.stats.sent.wrapping_add(frames as u32);

        let bounded = frames == self.max_drain && !self.tx.is_empty();
        if bounded {
            self.stats.bounded_drains = self.stats.bounded_drains.wrapping_add(1);
        }
        DrainReport { frames, bounded }
    }

    /// Pull received frames out of the driver until it is empty or the
    /// bound is reached.  A driver holding exactly the bound's worth of
    /// frames also reports `bounded`; the next call then finds it empty.
    pub fn drain_rx<B: CanBus>(&mut self, bus: &mut B) -> DrainReport {
        let mut frames = 0;
        while frames < self.max_drain {
            let Some(frame) = bus.try_receive() else {
                break;
            };
            trace!("CAN rx {=u16:#x} len {}", frame.id(), frame.data().len());
            self.last_received = Some(frame);
            frames += 1;
        }
        self.stats.received = self.stats.received.wrapping_add(frames as u32);

        let bounded = frames == self.max_drain;
        if bounded {
            self.stats.bounded_drains = self.stats.bounded_drains.wrapping_add(1);
            debug!("CAN: rx drain hit bound of {}", self.max_drain);
        }
        DrainReport { frames, bounded }
    }
}

impl Default for BusPump {
    fn default() -> Self {
        Self::new(CAN_MAX_DRAIN_PER_CALL)
    }
}
