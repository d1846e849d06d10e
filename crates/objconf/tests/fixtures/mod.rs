#![allow(dead_code)]

use objconf::BoxError;
use objconf::coerce::{PropertyValue, from_str_route};
use objconf::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A listener with one required property and one defaulted property.
#[derive(Debug, Default, Configurable)]
pub struct Listener {
    #[property]
    pub port: Option<u16>,
    #[property(required = false, default = "30")]
    pub timeout: Option<u64>,
    #[property(required = false)]
    pub backlog: Option<u32>,
}

/// Setter operations sharing names with attributes.
#[derive(Debug, Default, Configurable)]
#[configurable(setters)]
pub struct Router {
    #[property(required = false)]
    pub prefix: Option<String>,
    pub routes: Vec<String>,
    pub prefix_calls: usize,
}

#[setters]
impl Router {
    #[setter]
    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix_calls += 1;
        self.prefix = Some(prefix.to_uppercase());
    }

    #[setter(name = "route")]
    pub fn add_route(&mut self, route: String) -> Result<(), String> {
        if route.starts_with('/') {
            self.routes.push(route);
            Ok(())
        } else {
            Err(format!("route {route} must start with '/'"))
        }
    }

    #[setter]
    pub fn set_range(&mut self, _low: &str, _high: &str) {}

    #[setter]
    pub fn set_limit(&mut self, _limit: u32) {}
}

/// Root of a three-level chain.
#[derive(Debug, Default, Configurable)]
#[configurable(setters)]
pub struct Component {
    #[property(required = false)]
    pub level: Option<u8>,
    #[property(default = "component")]
    pub label: Option<String>,
    pub modes: Vec<String>,
}

#[setters]
impl Component {
    #[setter]
    pub fn set_mode(&mut self, mode: &str) {
        self.modes.push(mode.to_owned());
    }
}

#[derive(Debug, Default, Configurable)]
pub struct Service {
    #[configurable(parent)]
    pub component: Component,
    #[property(name = "level", required = false)]
    pub level: Option<u32>,
    #[property(required = false)]
    pub mode: Option<String>,
}

#[derive(Debug, Default, Configurable)]
pub struct Gateway {
    #[configurable(parent)]
    pub service: Service,
    /// Upstream address.
    #[property(required = false)]
    pub upstream: Option<std::net::SocketAddr>,
    #[property(default = "75")]
    pub load: Option<Percent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent(pub u8);

impl std::str::FromStr for Percent {
    type Err = io::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim_end_matches('%')
            .parse::<u8>()
            .ok()
            .filter(|value| *value <= 100)
            .map(Percent)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("{s} is not a percentage"))
            })
    }
}

impl PropertyValue for Percent {
    fn value_of(raw: &str) -> Option<Result<Self, BoxError>> {
        from_str_route(raw)
    }
}

/// A required property whose default cannot be coerced.
#[derive(Debug, Default, Configurable)]
pub struct Broken {
    #[property(default = "many")]
    pub workers: Option<u8>,
}

/// Collects formatted `tracing` output in memory.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Returns everything written so far.
    /// # Panics
    /// * If a writer panicked while holding the buffer.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer poisoned")).into_owned()
    }

    /// Runs `f` with a subscriber writing every event at `TRACE` and above into the buffer.
    pub fn capture<R>(&self, f: impl FnOnce() -> R) -> R {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::TRACE)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().map_err(|_| io::Error::other("log buffer poisoned"))?.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
