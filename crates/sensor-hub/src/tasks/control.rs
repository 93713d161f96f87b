use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::sensor::ChannelSelect;
use crate::{debug, ControlSignal};

/// The two external stimuli the control task reacts to.
pub struct ChannelControls<'a> {
    pub prev: &'a ControlSignal,
    pub next: &'a ControlSignal,
}

/// Channel-switching loop bound to one sensor instance.
///
/// Waits on both stimulus signals with no timeout and resumes on whichever
/// fires first; `select` polls the next-channel arm first, so when both
/// are pending in the same tick, next wins. The sensor mutex makes the
/// switch safe against an acquisition cycle in flight regardless of the
/// executor's preemption model.
pub async fn control_loop<M, S>(
    controls: ChannelControls<'_>,
    sensor: &Mutex<M, S>,
) -> !
where
    M: RawMutex,
    S: ChannelSelect,
{
    loop {
        match select(controls.next.wait(), controls.prev.wait()).await {
            Either::First(()) => {
                debug!("control: next channel");
                sensor.lock().await.next_channel();
            }
            Either::Second(()) => {
                debug!("control: prev channel");
                sensor.lock().await.prev_channel();
            }
        }
    }
}
