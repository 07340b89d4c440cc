//! Proximity indicator for a Sharp GP2Y0A21YK infrared distance sensor.
//!
//! The sensor output is sampled by the ADC, converted into a distance and
//! shown on a single LED: the closer the object, the faster the LED blinks.
//! Beyond 50cm the LED stays on. Each measurement is also written as one
//! line of text to the console.

pub mod clock;
pub mod configuration;
pub mod control;
pub mod distance;
pub mod indicator;
pub mod report;
pub mod startup;
