pub mod address;
pub mod detector;
pub mod email;
pub mod entity;
pub mod local_terms;
pub mod phone;
pub mod postcode;
pub mod surname;
pub mod url;

pub use address::{AddressDetector, DEFAULT_STREET_TYPES};
pub use detector::{Detector, DetectorSet};
pub use email::EmailDetector;
pub use entity::EntityDetector;
pub use local_terms::LocalTermsDetector;
pub use phone::PhoneDetector;
pub use postcode::PostcodeDetector;
pub use surname::SurnameDetector;
pub use url::UrlDetector;
