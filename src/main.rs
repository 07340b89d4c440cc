cfg_if::cfg_if! {
    if #[cfg(target_os = "espidf")] {
        use esp_idf_hal::delay::FreeRtos;
        use esp_idf_hal::gpio::PinDriver;
        // If using the `binstart` feature of `esp-idf-sys`, always keep this module imported
        use esp_idf_sys as _;
        use log::*;
        use embedded_hal::delay::DelayNs;
        use proximity_indicator::clock::StdClock;
        use proximity_indicator::configuration::CONFIG;
        use proximity_indicator::control::ProximityIndicator;
        use proximity_indicator::report::Reporter;
        use proximity_indicator::startup;

        use crate::peripherals::SystemPeripherals;
        use crate::sensor::Gp2y0a21Driver;

        mod errors;
        mod peripherals;
        mod sensor;

        fn main() -> anyhow::Result<()> {
            esp_idf_sys::link_patches();
            esp_idf_svc::log::EspLogger::initialize_default();

            let settings = CONFIG.settings();
            let clock = StdClock::new();
            let mut delay = FreeRtos;

            let host_ready = startup::wait_for_host(
                &clock,
                &mut delay,
                settings.host_wait_timeout_ms,
                usb_host_connected,
            );
            if !host_ready {
                warn!(
                    "no USB host after {}ms, status output disabled",
                    settings.host_wait_timeout_ms
                );
            }
            delay.delay_ms(startup::SETTLE_AFTER_HOST_MS);

            let peripherals = SystemPeripherals::take()?;
            let sensor = Gp2y0a21Driver::new(peripherals.sensor)?;
            let led = PinDriver::output(peripherals.led)?;
            let reporter = Reporter::new(std::io::stdout(), host_ready);
            info!(
                "status output {}",
                if reporter.is_enabled() { "enabled" } else { "disabled" }
            );

            let mut indicator = ProximityIndicator::new(sensor, led, reporter);
            indicator.start(&mut delay, &settings);
            indicator.run(&clock, &mut delay, &settings)
        }

        fn usb_host_connected() -> bool {
            unsafe { esp_idf_sys::usb_serial_jtag_is_connected() }
        }
    } else {
        fn main() {
            eprintln!("proximity-indicator is firmware for the ESP32-C3");
            eprintln!("build it for the riscv32imc-esp-espidf target");
        }
    }
}
