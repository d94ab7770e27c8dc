use crate::config::{Config, VALID_CONFIG_KEYS};
use crate::error::Result;
use crate::notify::Notifier;

pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    for key in VALID_CONFIG_KEYS {
        println!("{} = {}", key, config.get(key)?);
    }
    Ok(())
}

pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.get(key)?);
    Ok(())
}

pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    Notifier::new(false).success(format!("set {}", key));
    Ok(())
}
