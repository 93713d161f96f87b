use embassy_time::{Duration, Ticker};

use crate::display::DisplayModel;
use crate::envelope::Envelope;
use crate::{info, EnvelopeReceiver, EnvelopeSender};

/// Posts the reserved refresh message to the display queue at a fixed
/// interval, interleaving with sensor envelopes by timing alone.
pub async fn refresh_loop(
    sink: EnvelopeSender<'_>,
    interval: Duration,
) -> ! {
    let mut ticker = Ticker::every(interval);
    loop {
        ticker.next().await;
        sink.send(Envelope::refresh()).await;
    }
}

/// Single consumer of the envelope queue and sole writer of the
/// presentation model.
///
/// A refresh discriminant re-renders the accumulated per-sensor values;
/// any other discriminant updates that sensor's slot, to be shown on the
/// next refresh.
pub async fn display_loop(
    inbox: EnvelopeReceiver<'_>,
    model: &mut DisplayModel,
) -> ! {
    loop {
        let envelope = inbox.receive().await;
        if envelope.is_refresh() {
            let frame = model.render();
            info!("{}", frame);
        } else {
            model.update(envelope);
        }
    }
}
