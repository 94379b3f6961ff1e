//! Configuration for the registration pod.
//!
//! The host hands each pod a JSON document; it is parsed into
//! [`RegistrationPodConfig`], token placeholders are interpolated, and the
//! result is validated before any request is served.

mod interpolation;
mod io;
mod model;
mod validation;

pub use interpolation::interpolate_config;
pub use io::{CONFIG_PATH_ENV, config_from_value, default_config_path, load_config_from_path};
pub use model::{ConfigError, DEFAULT_TIMEOUT_SECS, RegistrationPodConfig, ServiceConfig};
pub use validation::{ValidationError, validate_config};
