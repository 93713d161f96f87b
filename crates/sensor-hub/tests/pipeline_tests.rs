use core::convert::Infallible;
use core::future::{pending, Future};

use embassy_futures::select::{select, select3, select4, Either, Either3, Either4};
use embassy_time::with_timeout;
use sensor_hub::prelude::*;

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

/// Fake shared peripheral bus.
#[derive(Debug, Default)]
struct TestBus;

type TestArbiter = BusArbiter<CriticalSectionRawMutex, TestBus>;
type SensorMutex<S> = Mutex<CriticalSectionRawMutex, S>;

async fn recv(
    channel: &EnvelopeChannel,
    ms: u64,
) -> Result<Envelope, embassy_time::TimeoutError> {
    with_timeout(Duration::from_millis(ms), channel.receive()).await
}

/// Run an acquisition loop and a stimulus script until `check` finishes.
async fn drive<T>(
    acquire: impl Future<Output = Result<Infallible, AcquireError>>,
    script: impl Future<Output = ()>,
    check: impl Future<Output = T>,
) -> T {
    match select3(acquire, script, check).await {
        Either3::First(res) => {
            panic!("acquisition stopped: {:?}", res.unwrap_err())
        }
        Either3::Second(()) => panic!("stimulus script ended early"),
        Either3::Third(out) => out,
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn zero_period_is_rejected_at_registration() {
    let channel = EnvelopeChannel::new();
    let gyro: SensorMutex<SimGyro> = Mutex::new(SimGyro::new());

    let result = SensorContext::new(
        "gyro",
        &gyro,
        Trigger::Periodic(Duration::from_millis(0)),
        channel.sender(),
    );
    assert!(matches!(result, Err(ConfigError::ZeroPeriod)));
}

#[test]
fn sensor_ids_increase_and_skip_the_refresh_id() {
    let channel = EnvelopeChannel::new();
    let gyro: SensorMutex<SimGyro> = Mutex::new(SimGyro::new());
    let trigger = Trigger::Periodic(Duration::from_millis(100));

    let first =
        SensorContext::new("a", &gyro, trigger, channel.sender()).unwrap();
    let second =
        SensorContext::new("b", &gyro, trigger, channel.sender()).unwrap();

    assert_ne!(first.info().id, REFRESH_ID);
    assert_ne!(second.info().id, REFRESH_ID);
    assert!(second.info().id > first.info().id);
}

// ---------------------------------------------------------------------------
// Trigger modes
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn polled_sensor_produces_without_external_signal() {
    let channel = EnvelopeChannel::new();
    let arbiter = TestArbiter::new(TestBus);
    let gyro: SensorMutex<SimGyro> = Mutex::new(SimGyro::new());

    let mut ctx = SensorContext::new(
        "gyro",
        &gyro,
        Trigger::Periodic(Duration::from_millis(10)),
        channel.sender(),
    )
    .unwrap();
    let id = ctx.info().id;

    let script = async {
        Timer::after_millis(5).await;
        gyro.lock().await.service(0.1, 0.2, 0.3);
        pending::<()>().await
    };
    let check = async {
        let env = recv(&channel, 500).await.expect("no envelope produced");
        assert_eq!(env.signal, id);
        assert_eq!(env.name.as_str(), "gyro");
        assert_eq!(env.count(), 3);
        assert_eq!(env.values.as_slice(), [0.1, 0.2, 0.3]);
    };
    drive(acquisition_loop(&mut ctx, &arbiter), script, check).await;
}

#[futures_test::test]
async fn event_sensor_stays_silent_without_stimulus() {
    let channel = EnvelopeChannel::new();
    let arbiter = TestArbiter::new(TestBus);
    let data_ready = DataReadySignal::new();
    let thermo: SensorMutex<SimThermo> =
        Mutex::new(SimThermo::new(&data_ready));

    let mut ctx = SensorContext::new(
        "tmp",
        &thermo,
        Trigger::Event(&data_ready),
        channel.sender(),
    )
    .unwrap();

    let check = async {
        // Stimulus withheld: no timeout-based rescheduling may happen.
        assert!(recv(&channel, 150).await.is_err());
    };
    drive(acquisition_loop(&mut ctx, &arbiter), pending(), check).await;
}

// ---------------------------------------------------------------------------
// Envelope integrity
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn queued_envelope_is_isolated_from_later_readings() {
    let channel = EnvelopeChannel::new();
    let arbiter = TestArbiter::new(TestBus);
    let data_ready = DataReadySignal::new();
    let thermo: SensorMutex<SimThermo> =
        Mutex::new(SimThermo::new(&data_ready));

    let mut ctx = SensorContext::new(
        "tmp",
        &thermo,
        Trigger::Event(&data_ready),
        channel.sender(),
    )
    .unwrap();
    let id = ctx.info().id;

    let script = async {
        thermo.lock().await.service(21.5);
        // Give the first envelope time to be built and queued, then
        // overwrite the sensor's data.
        Timer::after_millis(50).await;
        thermo.lock().await.service(99.9);
        pending::<()>().await
    };
    let check = async {
        let first = recv(&channel, 500).await.expect("first envelope");
        let second = recv(&channel, 500).await.expect("second envelope");

        // The queued copy must not see the later mutation.
        assert_eq!(first.signal, id);
        assert_eq!(first.name.as_str(), "tmp");
        assert_eq!(first.values.as_slice(), [21.5]);
        assert_eq!(second.values.as_slice(), [99.9]);
    };
    drive(acquisition_loop(&mut ctx, &arbiter), script, check).await;
}

#[futures_test::test]
async fn over_capacity_read_is_fatal() {
    struct Overreporter;

    impl ChannelSelect for Overreporter {
        fn next_channel(&mut self) {}
        fn prev_channel(&mut self) {}
    }

    impl<B> Sensor<B> for Overreporter {
        fn poll(&mut self, _bus: &mut B) -> bool {
            true
        }
        fn read(&mut self, _bus: &mut B, out: &mut [f32]) -> usize {
            out.fill(1.0);
            // Claims more readings than the buffer holds.
            out.len() + 3
        }
    }

    let channel = EnvelopeChannel::new();
    let arbiter = TestArbiter::new(TestBus);
    let bad: SensorMutex<Overreporter> = Mutex::new(Overreporter);

    let mut ctx = SensorContext::new(
        "bad",
        &bad,
        Trigger::Periodic(Duration::from_millis(10)),
        channel.sender(),
    )
    .unwrap();

    let err = acquisition_loop(&mut ctx, &arbiter).await.unwrap_err();
    assert_eq!(
        err,
        AcquireError::ReadOverrun {
            reported: MAX_READINGS + 3,
            capacity: MAX_READINGS
        }
    );
    assert_eq!(ctx.overruns(), 1);
    // Truncate-and-flag: nothing corrupt was posted.
    assert!(channel.try_receive().is_err());
}

// ---------------------------------------------------------------------------
// Channel control
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn channel_switches_interleave_safely_with_acquisition() {
    let channel = EnvelopeChannel::new();
    let arbiter = TestArbiter::new(TestBus);
    let data_ready = DataReadySignal::new();
    let thermo: SensorMutex<SimThermo> =
        Mutex::new(SimThermo::new(&data_ready));

    let next = ControlSignal::new();
    let prev = ControlSignal::new();

    let mut ctx = SensorContext::new(
        "tmp",
        &thermo,
        Trigger::Event(&data_ready),
        channel.sender(),
    )
    .unwrap();

    let script = async {
        thermo.lock().await.service(20.0);
        Timer::after_millis(30).await;

        next.signal(());
        Timer::after_millis(30).await;
        assert_eq!(thermo.lock().await.current_channel(), 1);

        thermo.lock().await.service(25.0);
        Timer::after_millis(30).await;

        // Both stimuli in the same tick: next is applied first, then
        // prev, leaving the channel where it was.
        next.signal(());
        prev.signal(());
        Timer::after_millis(30).await;
        assert_eq!(thermo.lock().await.current_channel(), 1);

        thermo.lock().await.service(26.0);
        pending::<()>().await
    };
    let check = async {
        let first = recv(&channel, 500).await.expect("first envelope");
        let second = recv(&channel, 500).await.expect("second envelope");
        let third = recv(&channel, 500).await.expect("third envelope");
        assert_eq!(first.values.as_slice(), [20.0]);
        assert_eq!(second.values.as_slice(), [25.0]);
        assert_eq!(third.values.as_slice(), [26.0]);
    };

    let controls = ChannelControls { prev: &prev, next: &next };
    match select4(
        acquisition_loop(&mut ctx, &arbiter),
        control_loop(controls, &thermo),
        script,
        check,
    )
    .await
    {
        Either4::First(res) => {
            panic!("acquisition stopped: {:?}", res.unwrap_err())
        }
        Either4::Second(_) => unreachable!("control loop never returns"),
        Either4::Third(()) => panic!("stimulus script ended early"),
        Either4::Fourth(()) => {}
    }
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn two_sensors_one_consumer_preserve_order_and_counts() {
    let channel = EnvelopeChannel::new();
    let arbiter = TestArbiter::new(TestBus);
    let data_ready = DataReadySignal::new();
    let thermo: SensorMutex<SimThermo> =
        Mutex::new(SimThermo::new(&data_ready));
    let gyro: SensorMutex<SimGyro> = Mutex::new(SimGyro::new());

    let mut thermo_ctx = SensorContext::new(
        "tmp",
        &thermo,
        Trigger::Event(&data_ready),
        channel.sender(),
    )
    .unwrap();
    let mut gyro_ctx = SensorContext::new(
        "gyro",
        &gyro,
        Trigger::Periodic(Duration::from_millis(15)),
        channel.sender(),
    )
    .unwrap();
    let thermo_id = thermo_ctx.info().id;
    let gyro_id = gyro_ctx.info().id;

    // Three event firings for the thermometer, two fresh samples for the
    // polled gyro.
    let script = async {
        Timer::after_millis(10).await;
        thermo.lock().await.service(20.0);
        Timer::after_millis(30).await;
        gyro.lock().await.service(0.1, 0.2, 0.3);
        Timer::after_millis(30).await;
        thermo.lock().await.service(21.0);
        Timer::after_millis(30).await;
        gyro.lock().await.service(0.4, 0.5, 0.6);
        Timer::after_millis(30).await;
        thermo.lock().await.service(22.0);
        pending::<()>().await
    };
    let check = async {
        let mut received = Vec::new();
        while let Ok(env) = recv(&channel, 300).await {
            received.push(env);
        }

        let thermo_values: Vec<_> = received
            .iter()
            .filter(|env| env.signal == thermo_id)
            .map(|env| env.values.as_slice().to_vec())
            .collect();
        let gyro_values: Vec<_> = received
            .iter()
            .filter(|env| env.signal == gyro_id)
            .map(|env| env.values.as_slice().to_vec())
            .collect();

        // Exact counts, and FIFO order within each sensor.
        assert_eq!(
            thermo_values,
            vec![vec![20.0], vec![21.0], vec![22.0]]
        );
        assert_eq!(
            gyro_values,
            vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]
        );
        for env in &received {
            let expected = if env.signal == thermo_id { "tmp" } else { "gyro" };
            assert_eq!(env.name.as_str(), expected);
        }
    };

    match select4(
        acquisition_loop(&mut thermo_ctx, &arbiter),
        acquisition_loop(&mut gyro_ctx, &arbiter),
        script,
        check,
    )
    .await
    {
        Either4::First(res) | Either4::Second(res) => {
            panic!("acquisition stopped: {:?}", res.unwrap_err())
        }
        Either4::Third(()) => panic!("stimulus script ended early"),
        Either4::Fourth(()) => {}
    }

    // Both loops went through many grant/release cycles; the ledger must
    // balance once neither holds the bus.
    assert!(!arbiter.is_held());
    assert_eq!(arbiter.grant_count(), arbiter.release_count());
}

// ---------------------------------------------------------------------------
// Display task
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn refresh_loop_posts_the_reserved_discriminant() {
    let channel = EnvelopeChannel::new();

    let check = async {
        let first = recv(&channel, 500).await.expect("first refresh");
        let second = recv(&channel, 500).await.expect("second refresh");
        assert!(first.is_refresh());
        assert!(second.is_refresh());
        assert_eq!(first.count(), 0);
    };
    match select(
        refresh_loop(channel.sender(), Duration::from_millis(20)),
        check,
    )
    .await
    {
        Either::First(_) => unreachable!("refresh loop never returns"),
        Either::Second(()) => {}
    }
}

#[futures_test::test]
async fn display_loop_folds_envelopes_and_renders_on_refresh() {
    let channel = EnvelopeChannel::new();
    let mut model = DisplayModel::new();

    let tmp = SensorInfo { name: "tmp", id: SensorId(101) };
    let gyro = SensorInfo { name: "gyro", id: SensorId(102) };

    let feed = async {
        let sender = channel.sender();
        sender.send(Envelope::from_readings(tmp, &[20.5])).await;
        sender
            .send(Envelope::from_readings(gyro, &[0.1, 0.2, 0.3]))
            .await;
        sender.send(Envelope::refresh()).await;
        // Let the display task drain the queue.
        Timer::after_millis(50).await;
    };
    let _ = select(display_loop(channel.receiver(), &mut model), feed).await;

    assert_eq!(model.sensor_count(), 2);
    assert_eq!(
        model.readout(SensorId(101)).unwrap().values(),
        [20.5]
    );
    assert_eq!(model.readout(SensorId(102)).unwrap().name(), "gyro");
}
