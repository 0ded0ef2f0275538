use std::{env, fmt, str::FromStr};
use tracing::warn;

pub const OVERFLOW_POLICY_ENV: &str = "RANGE_SITE_OVERFLOW";

/// What linking does with an integer literal endpoint outside `i64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Fail the link with the narrowing error.
    #[default]
    Raise,
    /// Install a generic site with the literal integers bound as arguments.
    Degrade,
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" => Ok(OverflowPolicy::Raise),
            "degrade" => Ok(OverflowPolicy::Degrade),
            other => Err(format!(
                "unknown overflow policy `{}` (expected `raise` or `degrade`)",
                other
            )),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Raise => write!(f, "raise"),
            OverflowPolicy::Degrade => write!(f, "degrade"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkOptions {
    pub overflow: OverflowPolicy,
}

impl LinkOptions {
    pub fn with_overflow(overflow: OverflowPolicy) -> Self {
        Self { overflow }
    }

    /// Explicit flag first, then `RANGE_SITE_OVERFLOW`, then the default.
    pub fn from_flag_or_env(flag: Option<String>) -> Self {
        let requested = flag
            .or_else(|| env::var(OVERFLOW_POLICY_ENV).ok())
            .filter(|value| !value.trim().is_empty());
        let overflow = match requested {
            Some(value) => value.parse::<OverflowPolicy>().unwrap_or_else(|err| {
                warn!(%err, "falling back to the default overflow policy");
                OverflowPolicy::default()
            }),
            None => OverflowPolicy::default(),
        };
        Self { overflow }
    }

    pub fn from_env() -> Self {
        Self::from_flag_or_env(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn with_policy_env<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        let guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap();
        let prior = env::var(OVERFLOW_POLICY_ENV).ok();
        match value {
            Some(value) => env::set_var(OVERFLOW_POLICY_ENV, value),
            None => env::remove_var(OVERFLOW_POLICY_ENV),
        }
        let result = f();
        match prior {
            Some(val) => env::set_var(OVERFLOW_POLICY_ENV, val),
            None => env::remove_var(OVERFLOW_POLICY_ENV),
        }
        drop(guard);
        result
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Degrade".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Degrade));
        assert_eq!(" raise ".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Raise));
        assert!("wrap".parse::<OverflowPolicy>().is_err());
    }

    #[test]
    fn flag_wins_over_environment() {
        let options = with_policy_env(Some("raise"), || {
            LinkOptions::from_flag_or_env(Some("degrade".into()))
        });
        assert_eq!(options.overflow, OverflowPolicy::Degrade);
    }

    #[test]
    fn environment_is_read_when_no_flag() {
        let options = with_policy_env(Some("degrade"), LinkOptions::from_env);
        assert_eq!(options.overflow, OverflowPolicy::Degrade);
        let options = with_policy_env(Some("  "), LinkOptions::from_env);
        assert_eq!(options, LinkOptions::default());
        let options = with_policy_env(None, LinkOptions::from_env);
        assert_eq!(options.overflow, OverflowPolicy::Raise);
    }

    #[test]
    fn unrecognized_values_fall_back_to_default() {
        let options = with_policy_env(Some("saturate"), LinkOptions::from_env);
        assert_eq!(options.overflow, OverflowPolicy::Raise);
    }
}
