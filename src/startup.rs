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
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

// Polling period while waiting for the USB host [ms]
const HOST_POLL_INTERVAL_MS: u32 = 10;
/// Pause after the host check, lets the console attach [ms]
pub const SETTLE_AFTER_HOST_MS: u32 = 500;
/// Pause between the LED self test and the first measurement [ms]
pub const SETTLE_AFTER_SELF_TEST_MS: u32 = 1000;

/// Polls `ready` until it reports true or `timeout_ms` has passed on
/// `clock`. Returns whether the host showed up, a timeout is not an error.
pub fn wait_for_host<C, D>(
    clock: &C,
    delay: &mut D,
    timeout_ms: u64,
    mut ready: impl FnMut() -> bool,
) -> bool
where
    C: Clock,
    D: DelayNs,
{
    let start = clock.now_ms();
    loop {
        if ready() {
            return true;
        }
        if clock.now_ms().saturating_sub(start) >= timeout_ms {
            return false;
        }
        delay.delay_ms(HOST_POLL_INTERVAL_MS);
    }
}

/// Blinks the LED `blinks` times, `period_ms` on and `period_ms` off.
/// The LED is left off.
pub fn self_test<P, D>(
    led: &mut P,
    delay: &mut D,
    blinks: u32,
    period_ms: u32,
) -> Result<(), P::Error>
where
    P: OutputPin,
    D: DelayNs,
{
    for _ in 0..blinks {
        led.set_high()?;
        delay.delay_ms(period_ms);
        led.set_low()?;
        delay.delay_ms(period_ms);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::tests::{ManualClock, ManualDelay};
    use crate::indicator::tests::MockLed;
    use core::cell::Cell;

    #[test]
    fn host_ready_right_away() {
        let clock = ManualClock::default();
        let mut delay = ManualDelay { clock: &clock };

        assert!(wait_for_host(&clock, &mut delay, 3000, || true));
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn host_ready_after_a_while() {
        let clock = ManualClock::default();
        let polls = Cell::new(0);
        let mut delay = ManualDelay { clock: &clock };

        let ready = wait_for_host(&clock, &mut delay, 3000, || {
            polls.set(polls.get() + 1);
            polls.get() > 5
        });

        assert!(ready);
        assert_eq!(clock.now_ms(), 50);
    }

    #[test]
    fn host_wait_times_out() {
        let clock = ManualClock::default();
        let mut delay = ManualDelay { clock: &clock };

        assert!(!wait_for_host(&clock, &mut delay, 3000, || false));
        assert_eq!(clock.now_ms(), 3000);
    }

    #[test]
    fn self_test_blinks_and_ends_dark() {
        let clock = ManualClock::default();
        let mut delay = ManualDelay { clock: &clock };
        let mut led = MockLed::default();

        self_test(&mut led, &mut delay, 3, 200).unwrap();

        assert!(!led.on);
        assert_eq!(led.toggles, 6);
        assert_eq!(clock.now_ms(), 1200);
    }

    #[test]
    fn self_test_without_blinks() {
        let clock = ManualClock::default();
        let mut delay = ManualDelay { clock: &clock };
        let mut led = MockLed::default();

        self_test(&mut led, &mut delay, 0, 200).unwrap();

        assert_eq!(led.writes, 0);
    }
}
