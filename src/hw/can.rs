//! bxCAN driver adapter.

use dashcluster::bus::{CanBus, CanFrame};
use dashcluster::config::CAN_BITRATE;
use defmt::{info, warn};
use embassy_stm32::can::filter::Mask32;
use embassy_stm32::can::{Can, Fifo, Frame, Id, StandardId};

pub struct BxCan {
    can: Can<'static>,
}

impl BxCan {
    /// Accept every frame into FIFO 0, set the bitrate and join the bus.
    pub async fn start(mut can: Can<'static>) -> Self {
        can.modify_filters()
            .enable_bank(0, Fifo::Fifo0, Mask32::accept_all());
        can.set_bitrate(CAN_BITRATE);
        can.enable().await;
        info!("CAN: up at {} bit/s", CAN_BITRATE);
        Self { can }
    }
}

impl CanBus for BxCan {
    fn send(&mut self, frame: &CanFrame) -> bool {
        let hw_frame = StandardId::new(frame.id()).and_then(|id| Frame::new_data(id, frame.data()).ok());
        let Some(hw_frame) = hw_frame else {
            // not representable; count it as handled so the queue moves on
            warn!("CAN: dropping unencodable frame {=u16:#x}", frame.id());
            return true;
        };
        self.can.try_write(&hw_frame).is_ok()
    }

    fn try_receive(&mut self) -> Option<CanFrame> {
        loop {
            let envelope = self.can.try_read().ok()?;
            match envelope.frame.id() {
                Id::Standard(id) => return CanFrame::new(id.as_raw(), envelope.frame.data()).ok(),
                Id::Extended(_) => continue,
            }
        }
    }
}
