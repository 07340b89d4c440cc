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
use crate::peripherals::DistanceSensorPeripherals;
use esp_idf_hal::adc::config::Config;
use esp_idf_hal::adc::{attenuation, AdcChannelDriver, AdcDriver, ADC1};
use esp_idf_hal::gpio::Gpio1;
use esp_idf_sys::EspError;
use proximity_indicator::control::ProximitySensor;

/// GP2Y0A21YK on ADC1. 11dB attenuation covers the full 0-3.3V output
/// swing of the sensor.
pub struct Gp2y0a21Driver {
    adc: AdcDriver<'static, ADC1>,
    channel: AdcChannelDriver<'static, { attenuation::DB_11 }, Gpio1>,
}

impl Gp2y0a21Driver {
    pub fn new(peripherals: DistanceSensorPeripherals) -> Result<Gp2y0a21Driver, InitError> {
        Ok(Gp2y0a21Driver {
            adc: AdcDriver::new(peripherals.adc, &Config::new())?,
            channel: AdcChannelDriver::new(peripherals.pin)?,
        })
    }
}

impl ProximitySensor for Gp2y0a21Driver {
    type Error = EspError;

    fn read_raw(&mut self) -> Result<u16, EspError> {
        self.adc.read_raw(&mut self.channel)
    }
}
