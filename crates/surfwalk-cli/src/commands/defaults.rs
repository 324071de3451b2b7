use crate::config::default_config_toml;
use crate::error::Result;

pub fn run() -> Result<()> {
    print!("{}", default_config_toml()?);
    Ok(())
}
