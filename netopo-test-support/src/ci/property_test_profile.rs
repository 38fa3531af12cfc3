//! Property-test run profile parsing for CI and local overrides.
//!
//! Suites share one interpretation of the case-count and fork overrides so a
//! CI job can deepen every property suite with a single variable.

use std::env;

use thiserror::Error;

/// Environment variable controlling proptest case counts.
pub const PROPTEST_CASES_ENV_KEY: &str = "PROPTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const NETOPO_PBT_FORK_ENV_KEY: &str = "NETOPO_PBT_FORK";

/// A profile override that could not be interpreted.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OverrideError {
    /// The case count was not a positive integer.
    #[error("expected a positive case count, got `{raw}`")]
    Cases {
        /// Raw override value.
        raw: String,
    },
    /// The fork flag was not a recognised boolean spelling.
    #[error("expected one of true/false/1/0/yes/no/on/off, got `{raw}`")]
    Fork {
        /// Raw override value.
        raw: String,
    },
}

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile from the process environment, falling back to the
    /// given defaults for missing or malformed overrides.
    ///
    /// # Examples
    ///
    /// ```
    /// use netopo_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::from_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Loads a profile through an arbitrary variable lookup.
    ///
    /// Malformed overrides are logged at `warn` and replaced by the default.
    #[must_use]
    pub fn from_lookup(
        default_cases: u32,
        default_fork: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let cases = resolve(PROPTEST_CASES_ENV_KEY, default_cases, &lookup, parse_cases);
        let fork = resolve(NETOPO_PBT_FORK_ENV_KEY, default_fork, &lookup, parse_fork);
        Self { cases, fork }
    }

    /// Number of cases to run per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn resolve<T>(
    key: &'static str,
    default: T,
    lookup: &impl Fn(&str) -> Option<String>,
    parse: fn(&str) -> Result<T, OverrideError>,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|error| {
        tracing::warn!(
            env = key,
            error = %error,
            "invalid property-test profile override; using default",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, OverrideError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|&cases| cases > 0)
        .ok_or_else(|| OverrideError::Cases {
            raw: raw.to_owned(),
        })
}

fn parse_fork(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::Fork {
            raw: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use rstest::rstest;

    fn profile_with(overrides: &[(&str, &str)], default_fork: bool) -> ProptestRunProfile {
        let vars: HashMap<String, String> = overrides
            .iter()
            .map(|&(key, value)| (key.to_owned(), value.to_owned()))
            .collect();
        ProptestRunProfile::from_lookup(64, default_fork, |key| vars.get(key).cloned())
    }

    #[rstest]
    fn defaults_apply_without_overrides() {
        let profile = profile_with(&[], false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn valid_case_overrides_are_used(#[case] raw: &str, #[case] expected: u32) {
        let profile = profile_with(&[(PROPTEST_CASES_ENV_KEY, raw)], false);
        assert_eq!(profile.cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    fn invalid_case_overrides_fall_back(#[case] raw: &str) {
        let profile = profile_with(&[(PROPTEST_CASES_ENV_KEY, raw)], false);
        assert_eq!(profile.cases(), 64);
    }

    #[rstest]
    #[case("TRUE", true)]
    #[case("on", true)]
    #[case("1", true)]
    #[case("no", false)]
    #[case("0", false)]
    fn valid_fork_overrides_are_used(#[case] raw: &str, #[case] expected: bool) {
        let profile = profile_with(&[(NETOPO_PBT_FORK_ENV_KEY, raw)], !expected);
        assert_eq!(profile.fork(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    fn invalid_fork_overrides_fall_back(#[case] raw: &str) {
        let profile = profile_with(&[(NETOPO_PBT_FORK_ENV_KEY, raw)], true);
        assert!(profile.fork());
        assert_eq!(
            parse_fork(raw),
            Err(OverrideError::Fork {
                raw: raw.to_owned()
            })
        );
    }
}
