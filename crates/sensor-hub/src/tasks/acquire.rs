use core::convert::Infallible;

use bus_arbiter::BusArbiter;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::context::SensorContext;
use crate::envelope::Envelope;
use crate::error::AcquireError;
use crate::sensor::Sensor;
use crate::{debug, error, MAX_READINGS};

/// Shared acquisition procedure, called once per sensor instance.
///
/// Everything instance-specific lives in the context: which sensor, which
/// trigger, which destination queue. Each cycle takes the bus grant for
/// the minimum span covering poll+read, then posts any new readings as an
/// owned [`Envelope`] after the bus is released — posting may suspend on a
/// full queue and must not hold the bus. Finally the loop re-arms through
/// the trigger's single wait primitive.
///
/// Runs until a fatal configuration error surfaces; on the happy path it
/// never returns.
pub async fn acquisition_loop<M, MB, B, S>(
    ctx: &mut SensorContext<'_, M, S>,
    arbiter: &BusArbiter<MB, B>,
) -> Result<Infallible, AcquireError>
where
    M: RawMutex,
    MB: RawMutex,
    S: Sensor<B>,
{
    let sensor = ctx.sensor;
    loop {
        // Serialize bus access across all acquisition instances. No
        // timeout: every grant is released by RAII before this cycle ends.
        let reported = {
            let mut bus = arbiter.grant().await;
            let mut dev = sensor.lock().await;
            if dev.poll(&mut bus) {
                Some(dev.read(&mut bus, &mut ctx.scratch))
            } else {
                None
            }
            // Sensor lock and bus grant drop here.
        };

        if let Some(reported) = reported {
            let count = reported.min(MAX_READINGS);
            ctx.last_count = count;

            if reported > MAX_READINGS {
                // Descriptor/buffer size mismatch: truncate, flag, stop.
                ctx.overruns += 1;
                error!(
                    "{}: read reported {} readings, capacity {}",
                    ctx.info.name, reported, MAX_READINGS
                );
                return Err(AcquireError::overrun(reported));
            }

            let envelope =
                Envelope::from_readings(ctx.info, &ctx.scratch[..count]);
            debug!("{}: posting {} readings", ctx.info.name, count);
            // Queue-full policy: block rather than drop samples.
            ctx.sink.send(envelope).await;
        }

        ctx.trigger.wait().await;
    }
}
