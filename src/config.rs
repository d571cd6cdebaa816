use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

#[derive(Debug, confique::Config)]
pub struct Config {
    /// `tracing` filter directives used by the command line front end.
    #[config(env = "SQLSURVEYOR_LOG", default = "warn")]
    pub log: String,
    /// Scripts larger than this are refused before lexing.
    #[config(env = "SQLSURVEYOR_MAX_SCRIPT_BYTES", default = 1048576)]
    pub max_script_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self::builder().env().load()?)
    }

    /// Fails with [`Error::ScriptTooLarge`] when `script` exceeds `max_script_bytes`.
    pub fn check_script(&self, script: &str) -> Result {
        if script.len() > self.max_script_bytes {
            return Err(Error::ScriptTooLarge {
                size: script.len(),
                limit: self.max_script_bytes,
            });
        }
        Ok(())
    }
}

pub fn config() -> Result<&'static Config> {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let loaded = Config::load()?;
    Ok(CONFIG.get_or_init(|| loaded))
}
