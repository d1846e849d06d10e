use objconf::{Configurable, ConfigurationError, setters};

#[derive(Debug, Default, Configurable)]
#[configurable(setters)]
struct Router {
    routes: Vec<String>,
    #[property(required = false)]
    prefix: Option<String>,
}

#[setters]
impl Router {
    #[setter]
    fn set_route(&mut self, route: &str) {
        self.routes.push(route.to_owned());
    }

    #[setter(name = "prefix")]
    fn set_prefix_owned(&mut self, prefix: String) -> Result<(), String> {
        if prefix.starts_with('/') {
            self.prefix = Some(prefix);
            Ok(())
        } else {
            Err(format!("prefix {prefix} must start with '/'"))
        }
    }

    #[setter]
    fn set_pair(&mut self, _left: &str, _right: &str) {}

    fn helper(&self) -> usize {
        self.routes.len()
    }
}

fn main() -> Result<(), ConfigurationError> {
    let mut router = Router::default();
    objconf::set(&mut router, "route", "/health")?;
    objconf::set(&mut router, "prefix", "/api")?;

    assert_eq!(router.helper(), 1);
    assert_eq!(router.prefix.as_deref(), Some("/api"));
    assert!(objconf::set(&mut router, "prefix", "api").is_err());
    assert!(matches!(
        objconf::set(&mut router, "pair", "x"),
        Err(ConfigurationError::NotASetter { method: "set_pair", .. })
    ));
    Ok(())
}
