//! # objconf
//!
//! Configuration and validation of objects from string properties.
//!
//! A configurable type exposes a static descriptor table listing its
//! configurable attributes, its setter operations, and the ancestor value it
//! embeds. Property names are resolved against that table:
//!
//! * a **setter operation** (a `&mut self` method taking one string) wins over
//!   any attribute of the same name;
//! * otherwise an **attribute** is assigned after coercing the string to the
//!   attribute's type (see [`coerce`]);
//! * in both passes the most-derived declaration shadows its ancestors.
//!
//! [`check`] then verifies that every required property holds a value,
//! applying declared defaults first.
//!
//! ## Example
//!
//! ```rust
//! use objconf::{Configurable, ConfigurationError, setters};
//!
//! #[derive(Debug, Default, Configurable)]
//! struct Transport {
//!     #[property(required = false, default = "30")]
//!     timeout: Option<u64>,
//! }
//!
//! #[derive(Debug, Default, Configurable)]
//! #[configurable(setters)]
//! struct Endpoint {
//!     #[configurable(parent)]
//!     transport: Transport,
//!     #[property]
//!     port: Option<u16>,
//!     host: String,
//! }
//!
//! #[setters]
//! impl Endpoint {
//!     #[setter(name = "address")]
//!     fn set_address(&mut self, raw: &str) -> Result<(), std::num::ParseIntError> {
//!         let (host, port) = raw.rsplit_once(':').unwrap_or((raw, "80"));
//!         self.host = host.to_owned();
//!         self.port = Some(port.parse()?);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), ConfigurationError> {
//! let mut endpoint = Endpoint::default();
//! objconf::set(&mut endpoint, "address", "example.org:8443")?;
//! objconf::check(&mut endpoint)?;
//!
//! assert_eq!(endpoint.host, "example.org");
//! assert_eq!(endpoint.port, Some(8443));
//! assert_eq!(endpoint.transport.timeout, Some(30));
//!
//! // Unknown names are logged and ignored.
//! objconf::set(&mut endpoint, "retries", "3")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`: a `TRACE` event before every value is
//! applied and a `WARN` event for unknown properties. Nothing is emitted
//! unless the application installs a subscriber.

pub mod binder;
pub mod coerce;
mod configurator;
mod describe;
pub mod descriptor;
mod error;
pub mod registry;
pub mod slot;

pub use configurator::{Configurator, UnknownProperty, check, configure, set, set_all};
pub use describe::{PropertyInfo, PropertyKind, describe};
pub use descriptor::{Configurable, DeclaredSetters, Property, TypeDescriptor};
pub use error::{AccessError, BoxError, CoercionError, ConfigurationError, Route, SlotError};
pub use objconf_derive::{Configurable, setters};

pub mod prelude {
    pub use crate::coerce::PropertyValue;
    pub use crate::configurator::{Configurator, UnknownProperty};
    pub use crate::descriptor::Configurable;
    pub use crate::error::ConfigurationError;
    pub use objconf_derive::{Configurable, setters};
}
