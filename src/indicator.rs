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
use embedded_hal::digital::{OutputPin, PinState};

/// Distance band shown on the LED.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tier {
    Danger,
    Caution,
    Warning,
    Safe,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Blink {
    /// Invert the LED every `interval_ms`
    Toggle { interval_ms: u64 },
    /// Keep the LED on
    Steady,
}

#[derive(Copy, Clone, Debug)]
pub struct TierEntry {
    pub tier: Tier,
    /// Inclusive upper bound of the band [cm]
    pub upper_bound_cm: f32,
    pub blink: Blink,
    pub label: &'static str,
}

// Evaluated top to bottom, first match wins. Keep in `Tier` order.
pub const TIERS: [TierEntry; 4] = [
    TierEntry {
        tier: Tier::Danger,
        upper_bound_cm: 15.0,
        blink: Blink::Toggle { interval_ms: 100 },
        label: "Fast blink (DANGER)",
    },
    TierEntry {
        tier: Tier::Caution,
        upper_bound_cm: 30.0,
        blink: Blink::Toggle { interval_ms: 300 },
        label: "Medium blink (CAUTION)",
    },
    TierEntry {
        tier: Tier::Warning,
        upper_bound_cm: 50.0,
        blink: Blink::Toggle { interval_ms: 800 },
        label: "Slow blink (WARNING)",
    },
    TierEntry {
        tier: Tier::Safe,
        upper_bound_cm: f32::INFINITY,
        blink: Blink::Steady,
        label: "Steady on (SAFE)",
    },
];

impl Tier {
    pub fn from_distance(distance_cm: f32) -> Self {
        TIERS
            .iter()
            .find(|entry| distance_cm <= entry.upper_bound_cm)
            .map(|entry| entry.tier)
            .unwrap_or(Tier::Safe)
    }

    pub fn entry(self) -> &'static TierEntry {
        &TIERS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn blink_interval_ms(self) -> Option<u64> {
        match self.entry().blink {
            Blink::Toggle { interval_ms } => Some(interval_ms),
            Blink::Steady => None,
        }
    }
}

/// LED bookkeeping kept between loop iterations. `led_on` always holds
/// the level last written to the pin.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BlinkState {
    last_toggle_ms: u64,
    led_on: bool,
}

impl BlinkState {
    pub fn led_on(&self) -> bool {
        self.led_on
    }

    #[cfg(test)]
    pub(crate) fn last_toggle_ms(&self) -> u64 {
        self.last_toggle_ms
    }
}

/// Drives the LED for the tier that `distance_cm` falls into.
///
/// Blinking tiers invert the LED once their interval has passed since the
/// last toggle. The safe tier forces the LED on and leaves the toggle
/// timestamp alone, so falling back into a blinking tier waits for a full
/// interval from the last toggle. On a failed pin write the state is not
/// touched.
pub fn indicate<P: OutputPin>(
    state: &mut BlinkState,
    led: &mut P,
    distance_cm: f32,
    now_ms: u64,
) -> Result<Tier, P::Error> {
    let tier = Tier::from_distance(distance_cm);

    match tier.entry().blink {
        Blink::Toggle { interval_ms } => {
            if now_ms.saturating_sub(state.last_toggle_ms) >= interval_ms {
                let led_on = !state.led_on;
                led.set_state(PinState::from(led_on))?;
                state.led_on = led_on;
                state.last_toggle_ms = now_ms;
            }
        }
        Blink::Steady => {
            led.set_high()?;
            state.led_on = true;
        }
    }

    Ok(tier)
}
