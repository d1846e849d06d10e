use objconf::{Configurable, ConfigurationError};
use std::path::PathBuf;

#[derive(Debug, Default, Configurable)]
struct Storage {
    /// Directory holding the data files.
    #[property(required = false)]
    root: Option<PathBuf>,
}

#[derive(Debug, Default, Configurable)]
struct Cache {
    #[configurable(parent)]
    storage: Storage,
    #[property(name = "max-entries", default = "128", description = "entry limit")]
    max_entries: Option<usize>,
    #[property]
    r#type: Option<String>,
    #[property]
    shards: u8,
    hits: u64,
}

fn main() -> Result<(), ConfigurationError> {
    let mut cache = Cache::default();
    objconf::set(&mut cache, "type", "lru")?;
    objconf::set(&mut cache, "shards", "4")?;
    objconf::set(&mut cache, "root", "/var/cache")?;
    objconf::check(&mut cache)?;

    assert_eq!(cache.r#type.as_deref(), Some("lru"));
    assert_eq!(cache.shards, 4);
    assert_eq!(cache.max_entries, Some(128));
    assert_eq!(cache.storage.root, Some(PathBuf::from("/var/cache")));
    assert_eq!(cache.hits, 0);

    let descriptor = <Cache as Configurable>::descriptor();
    assert_eq!(descriptor.name, "Cache");
    assert_eq!(descriptor.attributes.len(), 4);
    assert_eq!(descriptor.ancestor().map(|parent| parent.name), Some("Storage"));

    let root = &Storage::descriptor().attributes[0];
    let description = root.property.as_ref().and_then(|p| p.description);
    assert_eq!(description, Some("Directory holding the data files."));
    Ok(())
}
