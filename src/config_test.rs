use std::collections::HashMap;

use super::*;

fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let table: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_lookup(|key| table.get(key).cloned())
}

#[test]
fn empty_environment_uses_defaults() {
    let cfg = load(&[]).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.site_dir, PathBuf::from("dist/public"));
    assert_eq!(cfg.contact_delay, Duration::from_millis(500));
    assert_eq!(cfg.queue_capacity, 64);
}

#[test]
fn overrides_are_parsed() {
    let cfg = load(&[
        ("PORT", "8080"),
        ("SITE_DIR", "/srv/site"),
        ("CONTACT_DELAY_MS", "0"),
        ("CONTACT_QUEUE_CAPACITY", "8"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.site_dir, PathBuf::from("/srv/site"));
    assert_eq!(cfg.contact_delay, Duration::ZERO);
    assert_eq!(cfg.queue_capacity, 8);
}

#[test]
fn invalid_port_is_an_error() {
    assert_eq!(load(&[("PORT", "http")]), Err(ConfigError::InvalidPort("http".into())));
    assert_eq!(load(&[("PORT", "70000")]), Err(ConfigError::InvalidPort("70000".into())));
}

#[test]
fn port_tolerates_surrounding_whitespace() {
    assert_eq!(load(&[("PORT", " 4000 ")]).unwrap().port, 4000);
}

#[test]
fn bad_tuning_values_fall_back_to_defaults() {
    let cfg = load(&[("CONTACT_DELAY_MS", "soon"), ("CONTACT_QUEUE_CAPACITY", "-3")]).unwrap();
    assert_eq!(cfg.contact_delay, Duration::from_millis(DEFAULT_CONTACT_DELAY_MS));
    assert_eq!(cfg.queue_capacity, DEFAULT_CONTACT_QUEUE_CAPACITY);
}

#[test]
fn zero_capacity_is_raised_to_one() {
    assert_eq!(load(&[("CONTACT_QUEUE_CAPACITY", "0")]).unwrap().queue_capacity, 1);
}

#[test]
fn blank_site_dir_uses_default() {
    assert_eq!(load(&[("SITE_DIR", "  ")]).unwrap().site_dir, PathBuf::from(DEFAULT_SITE_DIR));
}
