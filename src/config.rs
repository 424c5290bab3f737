use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// Server settings read from the environment.
///
/// | Env Var                        | Default     |
/// |--------------------------------|-------------|
/// | `DASHBOARD_HOST`               | `127.0.0.1` |
/// | `DASHBOARD_PORT`               | `8080`      |
/// | `DASHBOARD_WORKERS`            | `1`         |
/// | `DASHBOARD_HIGHLIGHT_SECS`     | `3`         |
/// | `DASHBOARD_CLOCK_REFRESH_SECS` | `60`        |
/// | `DASHBOARD_SEED`               | `42`        |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub highlight_duration: Duration,
    pub clock_refresh: Duration,
    /// Seeds the generated offer fixtures.
    pub seed: u64,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, Error> {
        let host = lookup("DASHBOARD_HOST")
            .filter(|host| !host.trim().is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string());

        Ok(Config {
            host,
            port: parse(&lookup, "DASHBOARD_PORT", 8080)?,
            workers: parse_positive(&lookup, "DASHBOARD_WORKERS", 1)?,
            highlight_duration: Duration::from_secs(parse_positive(
                &lookup,
                "DASHBOARD_HIGHLIGHT_SECS",
                3,
            )?),
            clock_refresh: Duration::from_secs(parse_positive(
                &lookup,
                "DASHBOARD_CLOCK_REFRESH_SECS",
                60,
            )?),
            seed: parse(&lookup, "DASHBOARD_SEED", 42)?,
        })
    }

    pub fn address(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 1,
            highlight_duration: Duration::from_secs(3),
            clock_refresh: Duration::from_secs(60),
            seed: 42,
        }
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, Error> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidConfig { key, value }),
    }
}

/// Like `parse`, but zero is rejected: worker counts and timer periods must
/// be non-zero.
fn parse_positive<T: FromStr + Default + PartialEq>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, Error> {
    let value = parse(lookup, key, default)?;
    if value == T::default() {
        return Err(Error::InvalidConfig {
            key,
            value: lookup(key).unwrap_or_default(),
        });
    }

    Ok(value)
}
