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
// Sharp GP2Y0A21YK analog distance sensor read through the 12 bit ADC
// of the ESP32-C3. The sensor is rated for 10-80 cm, anything outside
// that window is reported as the nearest limit.

/// Highest value the 12 bit ADC can report
pub const ADC_MAX: u16 = 4095;
/// ADC reference voltage with 11dB attenuation [V]
pub const ADC_REF_VOLTAGE: f32 = 3.3;

// Empirical calibration curve: distance [cm] = 27.728 * voltage ^ -1.2045
const CURVE_FACTOR: f32 = 27.728;
const CURVE_EXPONENT: f32 = -1.2045;

/// Shortest distance the sensor can resolve [cm]
pub const MIN_DISTANCE_CM: f32 = 10.0;
/// Longest distance the sensor can resolve [cm]
pub const MAX_DISTANCE_CM: f32 = 80.0;

/// One processed sample of the distance sensor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reading {
    pub raw: u16,
    pub voltage: f32,
    pub distance_cm: f32,
}

#[inline(always)]
pub fn raw_to_voltage(raw: u16) -> f32 {
    raw.min(ADC_MAX) as f32 * (ADC_REF_VOLTAGE / ADC_MAX as f32)
}

/// Applies the sensor calibration curve. The curve has a pole at 0V,
/// a dead sensor or an empty field of view reads as far away.
pub fn voltage_to_distance(voltage: f32) -> f32 {
    if voltage <= 0.0 {
        return MAX_DISTANCE_CM;
    }
    CURVE_FACTOR * voltage.powf(CURVE_EXPONENT)
}

pub fn clamp_distance(distance: f32) -> f32 {
    if distance.is_nan() || distance > MAX_DISTANCE_CM {
        MAX_DISTANCE_CM
    } else if distance < MIN_DISTANCE_CM {
        MIN_DISTANCE_CM
    } else {
        distance
    }
}

/// Converts a raw ADC sample into a distance within the rated range.
pub fn estimate(raw: u16) -> Reading {
    let voltage = raw_to_voltage(raw);
    Reading {
        raw,
        voltage,
        distance_cm: clamp_distance(voltage_to_distance(voltage)),
    }
}
