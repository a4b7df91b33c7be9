//! One wake cycle of the sensor node: sample, bring the radio up, send once,
//! wait briefly for the result, then sleep.
//!
//! Every path ends in exactly one call to [`DeepSleep::deep_sleep`]. Nothing
//! survives the cycle: the [`Transmitter`] is consumed by it, the same way
//! RAM is lost when the chip powers down.

use embassy_time::{with_timeout, Duration, Instant};
use log::{error, info, warn};
use protocol::SensorReading;
use rand_core::RngCore;

use crate::config::NodeConfig;
use crate::measurement::Sensor;
use crate::radio::{Radio, SendDone, SendStatus};
use crate::sleep::{sleep_duration, DeepSleep};

/// How the single transmission attempt of a cycle ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Completion callback reported success.
    Delivered,
    /// Completion callback reported failure.
    Failed,
    /// No completion callback within the send timeout.
    TimedOut,
    /// The radio could not be brought up or refused the peer; nothing was sent.
    RadioInitFailed,
    /// The radio refused to queue the datagram.
    SendRejected,
}

#[derive(Debug, Copy, Clone)]
pub struct CycleReport {
    pub reading: SensorReading,
    pub outcome: Outcome,
    pub sleep: Duration,
    /// Time from wake to the sleep request.
    pub awake: Duration,
}

pub struct Transmitter<'a, S, R> {
    config: NodeConfig,
    sensor: S,
    radio: R,
    done: &'a SendDone,
}

impl<'a, S: Sensor, R: Radio> Transmitter<'a, S, R> {
    pub fn new(config: NodeConfig, sensor: S, radio: R, done: &'a SendDone) -> Self {
        Self {
            config,
            sensor,
            radio,
            done,
        }
    }

    pub async fn wake_cycle<G, P>(mut self, rng: &mut G, power: &mut P) -> CycleReport
    where
        G: RngCore + ?Sized,
        P: DeepSleep + ?Sized,
    {
        let woke = Instant::now();

        // sample before the radio warms the board up
        let reading = self.sample();
        let outcome = self.transmit(&reading).await;

        let sleep = sleep_duration(self.config.sleep_base, self.config.max_jitter, rng);
        let awake = woke.elapsed();
        info!(
            "Up for {} ms ({:?}), going to sleep for {} secs...",
            awake.as_millis(),
            outcome,
            sleep.as_secs()
        );
        power.deep_sleep(sleep);

        CycleReport {
            reading,
            outcome,
            sleep,
            awake,
        }
    }

    fn sample(&mut self) -> SensorReading {
        let location_id = self.config.location_id;

        let reading = match self.sensor.read() {
            Ok(m) => SensorReading::new(location_id, m.temperature, m.humidity, m.pressure),
            Err(e) => {
                error!("sensor read failed: {:?}, sending invalid marker", e);
                return SensorReading::invalid(location_id);
            }
        };

        if !reading.is_valid() {
            warn!("sensor returned non-finite values: {:?}", reading);
        }
        info!(
            "location={}, temp={}, humidity={}, pressure={}",
            reading.location_id, reading.temperature, reading.humidity, reading.pressure
        );
        reading
    }

    async fn transmit(&mut self, reading: &SensorReading) -> Outcome {
        let NodeConfig {
            gateway, channel, ..
        } = self.config;

        info!("target mac: {}, channel: {}", gateway, channel);

        if let Err(e) = self.radio.init(channel) {
            error!("*** radio init failed: {:?}", e);
            return Outcome::RadioInitFailed;
        }
        if let Err(e) = self.radio.add_peer(gateway, channel) {
            error!("*** adding peer {} failed: {:?}", gateway, e);
            return Outcome::RadioInitFailed;
        }

        // the callback may fire before send returns
        self.done.reset();

        if let Err(e) = self.radio.send(gateway, &reading.to_bytes()) {
            warn!("send rejected: {:?}", e);
            return Outcome::SendRejected;
        }

        match with_timeout(self.config.send_timeout, self.done.wait()).await {
            Ok(status) => {
                info!("send_cb, send done, status = {:?}", status);
                match status {
                    SendStatus::Delivered => Outcome::Delivered,
                    SendStatus::Failed => Outcome::Failed,
                }
            }
            Err(_) => {
                warn!(
                    "no send callback within {} ms",
                    self.config.send_timeout.as_millis()
                );
                Outcome::TimedOut
            }
        }
    }
}
