use core::fmt;
use esp_idf_sys::EspError;

#[derive(Debug)]
pub enum InitError {
    EspError(EspError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EspError(e) => write!(f, "ESP-IDF driver setup failed: {}", e),
        }
    }
}

impl std::error::Error for InitError {}

impl From<EspError> for InitError {
    fn from(e: EspError) -> Self {
        Self::EspError(e)
    }
}
