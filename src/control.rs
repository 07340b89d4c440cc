/*
 * ESP32-C3 Proximity Indicator
 *
 * MIT license
 *
 * Copyright (c) 2021-2023 Michael Zill
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 *
 * Apache license, Version 2.0
 *
 * Copyright (c) 2021-2023 Michael Zill
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */
use crate::clock::Clock;
use crate::configuration::Settings;
use crate::distance;
use crate::indicator::{self, BlinkState, Tier};
use crate::report::{Reporter, StatusReport};
use crate::startup;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::*;
use std::io::Write;

/// Source of raw 12 bit distance samples.
pub trait ProximitySensor {
    type Error: Debug;

    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

/// The proximity indicator: one sensor, one LED and the status stream.
pub struct ProximityIndicator<S, L, W>
where
    S: ProximitySensor,
    L: OutputPin,
    W: Write,
{
    sensor: S,
    led: L,
    reporter: Reporter<W>,
    state: BlinkState,
}

impl<S, L, W> ProximityIndicator<S, L, W>
where
    S: ProximitySensor,
    L: OutputPin,
    W: Write,
{
    pub fn new(sensor: S, led: L, reporter: Reporter<W>) -> Self {
        ProximityIndicator {
            sensor,
            led,
            reporter,
            state: BlinkState::default(),
        }
    }

    /// Banner, LED self test and the settle delay before the first
    /// measurement.
    pub fn start<D: DelayNs>(&mut self, delay: &mut D, settings: &Settings) {
        self.reporter.banner();

        if let Err(err) = startup::self_test(
            &mut self.led,
            delay,
            settings.self_test_blinks,
            settings.self_test_period_ms,
        ) {
            warn!("LED self test failed: {:?}", err);
        }
        delay.delay_ms(startup::SETTLE_AFTER_SELF_TEST_MS);
    }

    /// One pass: sample, convert, clamp, drive the LED and report.
    pub fn step(&mut self, now_ms: u64) -> StatusReport {
        let raw = match self.sensor.read_raw() {
            Ok(raw) => raw,
            Err(err) => {
                warn!("sensor read failed: {:?}", err);
                0
            }
        };

        let reading = distance::estimate(raw);
        let tier = match indicator::indicate(
            &mut self.state,
            &mut self.led,
            reading.distance_cm,
            now_ms,
        ) {
            Ok(tier) => tier,
            Err(err) => {
                warn!("LED write failed: {:?}", err);
                Tier::from_distance(reading.distance_cm)
            }
        };

        trace!("LED on: {}", self.state.led_on());

        let report = StatusReport { reading, tier };
        self.reporter.report(&report);
        report
    }

    pub fn run<C, D>(&mut self, clock: &C, delay: &mut D, settings: &Settings) -> !
    where
        C: Clock,
        D: DelayNs,
    {
        info!("entering measurement loop, period {}ms", settings.loop_delay_ms);
        loop {
            self.step(clock.now_ms());
            delay.delay_ms(settings.loop_delay_ms);
        }
    }

    #[cfg(test)]
    pub(crate) fn blink_state(&self) -> BlinkState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn led(&self) -> &L {
        &self.led
    }

    #[cfg(test)]
    pub(crate) fn into_reporter(self) -> Reporter<W> {
        self.reporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::tests::{ManualClock, ManualDelay};
    use crate::distance::{MAX_DISTANCE_CM, MIN_DISTANCE_CM};
    use crate::indicator::tests::MockLed;
    use crate::report::BANNER;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct FixedSensor(Result<u16, ()>);

    impl ProximitySensor for FixedSensor {
        type Error = ();

        fn read_raw(&mut self) -> Result<u16, ()> {
            self.0
        }
    }

    struct BrokenLed;

    impl ErrorType for BrokenLed {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenLed {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    fn indicator_for(raw: Result<u16, ()>) -> ProximityIndicator<FixedSensor, MockLed, Vec<u8>> {
        ProximityIndicator::new(
            FixedSensor(raw),
            MockLed::default(),
            Reporter::new(Vec::new(), true),
        )
    }

    fn broken_indicator_for(raw: u16) -> ProximityIndicator<FixedSensor, BrokenLed, Vec<u8>> {
        ProximityIndicator::new(
            FixedSensor(Ok(raw)),
            BrokenLed,
            Reporter::new(Vec::new(), true),
        )
    }

    fn settings() -> Settings {
        Settings {
            loop_delay_ms: 100,
            host_wait_timeout_ms: 3000,
            self_test_blinks: 3,
            self_test_period_ms: 200,
        }
    }

    // Raw sample that lands on roughly 45cm
    fn raw_for_45cm() -> u16 {
        let voltage = (45.0_f32 / 27.728).powf(1.0 / -1.2045);
        (voltage / 3.3 * 4095.0).round() as u16
    }

    #[test]
    fn zero_sample_is_safe() {
        let mut indicator = indicator_for(Ok(0));
        let report = indicator.step(1_000);

        assert_eq!(report.reading.voltage, 0.0);
        assert_eq!(report.reading.distance_cm, MAX_DISTANCE_CM);
        assert_eq!(report.tier, Tier::Safe);
        assert!(indicator.led().on);
    }

    #[test]
    fn full_scale_sample_is_danger() {
        let mut indicator = indicator_for(Ok(4095));
        let report = indicator.step(1_000);

        assert_eq!(report.reading.distance_cm, MIN_DISTANCE_CM);
        assert_eq!(report.tier, Tier::Danger);
        assert_eq!(report.tier.blink_interval_ms(), Some(100));
        assert!(indicator.blink_state().led_on());
    }

    #[test]
    fn mid_range_sample_is_warning() {
        let mut indicator = indicator_for(Ok(raw_for_45cm()));
        let report = indicator.step(1_000);

        assert!((report.reading.distance_cm - 45.0).abs() < 0.5);
        assert_eq!(report.tier, Tier::Warning);
        assert_eq!(report.tier.blink_interval_ms(), Some(800));
    }

    #[test]
    fn failed_read_counts_as_zero() {
        let mut indicator = indicator_for(Err(()));
        let report = indicator.step(1_000);

        assert_eq!(report.reading.raw, 0);
        assert_eq!(report.tier, Tier::Safe);
    }

    #[test]
    fn every_step_reports_one_line() {
        let mut indicator = indicator_for(Ok(4095));
        for now in [1_000, 1_100, 1_200] {
            indicator.step(now);
        }

        let out = String::from_utf8(indicator.into_reporter().into_inner()).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().all(|line| line.ends_with("LED: Fast blink (DANGER)")));
    }

    #[test]
    fn start_runs_banner_and_self_test() {
        let clock = ManualClock::default();
        let mut delay = ManualDelay { clock: &clock };
        let mut indicator = indicator_for(Ok(0));
        let settings = settings();

        indicator.start(&mut delay, &settings);

        assert_eq!(indicator.led().toggles, 6);
        assert!(!indicator.led().on);
        assert_eq!(clock.now_ms(), 1200 + 1000);
        // self test does not touch the blink bookkeeping
        assert_eq!(indicator.blink_state(), BlinkState::default());

        let out = String::from_utf8(indicator.into_reporter().into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, BANNER.to_vec());
    }

    #[test]
    fn led_failure_keeps_loop_running() {
        for raw in [4095, 0] {
            let mut indicator = broken_indicator_for(raw);
            let report = indicator.step(1_000);
            let second = indicator.step(1_200);

            assert_eq!(report.tier, Tier::from_distance(report.reading.distance_cm));
            assert_eq!(second.tier, report.tier);
            assert_eq!(indicator.blink_state(), BlinkState::default());

            let out = String::from_utf8(indicator.into_reporter().into_inner()).unwrap();
            let lines: Vec<&str> = out.lines().collect();
            assert_eq!(lines.len(), 2);
            assert!(lines[0].ends_with(report.tier.label()));
        }
    }

    #[test]
    fn self_test_failure_still_starts() {
        let clock = ManualClock::default();
        let mut delay = ManualDelay { clock: &clock };
        let mut indicator = broken_indicator_for(0);

        indicator.start(&mut delay, &settings());

        // first write fails, only the settle delay runs
        assert_eq!(clock.now_ms(), 1000);

        let out = String::from_utf8(indicator.into_reporter().into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, BANNER.to_vec());
    }
}
