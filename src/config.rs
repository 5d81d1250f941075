use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::utils::error::{AppError, AppResult};

const DEFAULT_SESSION_SECRET: &str = "default-secret-key";

/// Floor for any results refresh cadence, client or server side.
pub const MIN_RESULTS_REFRESH: Duration = Duration::from_millis(100);

pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub cors_origin: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub results_refresh: Duration,
    pub polls_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_origin: "http://localhost:3000".to_string(),
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            session_ttl_hours: 24,
            results_refresh: Duration::from_secs(3),
            polls_file: None,
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let session_secret = var("SESSION_SECRET").unwrap_or_else(|_| {
            warn!("SESSION_SECRET not set, using an insecure default");
            DEFAULT_SESSION_SECRET.to_string()
        });

        Ok(Self {
            server_addr: try_load("SERVER_ADDR", "0.0.0.0:8000")?,
            cors_origin: try_load("CORS_ORIGIN", "http://localhost:3000")?,
            session_secret,
            session_ttl_hours: session_ttl_hours(try_load("SESSION_TTL_HOURS", "24")?)?,
            results_refresh: refresh_period(try_load("RESULTS_REFRESH_SECS", "3")?)?,
            polls_file: var("POLLS_FILE").ok().map(PathBuf::from),
        })
    }
}

fn session_ttl_hours(hours: i64) -> AppResult<i64> {
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        warn!("Invalid SESSION_TTL_HOURS value: {hours}");
        return Err(AppError::InternalError(format!(
            "Environment misconfigured: SESSION_TTL_HOURS {hours} out of range"
        )));
    }
    Ok(hours)
}

fn refresh_period(secs: u64) -> AppResult<Duration> {
    if secs == 0 {
        warn!("Invalid RESULTS_REFRESH_SECS value: 0");
        return Err(AppError::InternalError(
            "Environment misconfigured: RESULTS_REFRESH_SECS must be at least 1".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| ())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> AppResult<T>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::InternalError(format!("Environment misconfigured: {key}: {e}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_period_rejects_zero() {
        assert!(matches!(refresh_period(0), Err(AppError::InternalError(_))));
        assert_eq!(refresh_period(3).unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn test_session_ttl_bounds() {
        for hours in [0, -2, MAX_SESSION_TTL_HOURS + 1, 9_000_000_000_000_000] {
            assert!(
                matches!(session_ttl_hours(hours), Err(AppError::InternalError(_))),
                "{hours} should be rejected"
            );
        }
        assert_eq!(session_ttl_hours(24).unwrap(), 24);
        assert_eq!(session_ttl_hours(MAX_SESSION_TTL_HOURS).unwrap(), MAX_SESSION_TTL_HOURS);
    }
}
