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
// Build time settings, overridden through cfg.toml in the crate root
#[toml_cfg::toml_config]
pub struct Config {
    #[default(100)]
    loop_delay_ms: u32,
    #[default(3000)]
    host_wait_timeout_ms: u64,
    #[default(3)]
    self_test_blinks: u32,
    #[default(200)]
    self_test_period_ms: u32,
}

/// Timing of the indicator loop, taken from `CONFIG` on the device.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Delay between two measurements [ms]
    pub loop_delay_ms: u32,
    /// Maximum wait for the USB host after boot [ms]
    pub host_wait_timeout_ms: u64,
    /// Number of LED blinks at startup
    pub self_test_blinks: u32,
    /// On and off time of a self test blink [ms]
    pub self_test_period_ms: u32,
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            loop_delay_ms: self.loop_delay_ms,
            host_wait_timeout_ms: self.host_wait_timeout_ms,
            self_test_blinks: self.self_test_blinks,
            self_test_period_ms: self.self_test_period_ms,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        CONFIG.settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_settings() {
        let settings = Settings::default();
        assert_eq!(settings.loop_delay_ms, 100);
        assert_eq!(settings.host_wait_timeout_ms, 3000);
        assert_eq!(settings.self_test_blinks, 3);
        assert_eq!(settings.self_test_period_ms, 200);
    }
}
