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
use crate::errors::InitError;
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::*;
use esp_idf_hal::peripherals::Peripherals;

// Wiring of the ESP32-C3 SuperMini
pub struct SystemPeripherals {
    pub sensor: DistanceSensorPeripherals,
    pub led: AnyOutputPin,
}

impl SystemPeripherals {
    pub fn take() -> Result<Self, InitError> {
        let peripherals = Peripherals::take()?;

        Ok(SystemPeripherals {
            // GP2Y0A21YK analog output
            sensor: DistanceSensorPeripherals {
                adc: peripherals.adc1,
                pin: peripherals.pins.gpio1,
            },
            // on board LED
            led: peripherals.pins.gpio8.into(),
        })
    }
}

pub struct DistanceSensorPeripherals {
    pub adc: ADC1,
    pub pin: Gpio1,
}
