//! Argument lists for vendor CLI queries

use std::fmt;

use xpumon_core::QueryKind;

/// Flag requesting machine-readable JSON output
pub const JSON_FLAG: &str = "-j";

/// Device selector flag
pub const DEVICE_FLAG: &str = "-d";

/// Immutable argument list identifying one query.
///
/// The device id is passed through as-is; the vendor tool is the authority
/// on what a valid id looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    kind: QueryKind,
    args: Vec<String>,
}

impl CommandSpec {
    /// `discovery -j`
    pub fn discovery() -> Self {
        Self::build(QueryKind::Discovery, None)
    }

    /// `stats -d <id> -j`
    pub fn stats(device_id: &str) -> Self {
        Self::build(QueryKind::Stats, Some(device_id))
    }

    /// `health -d <id> -j`
    pub fn health(device_id: &str) -> Self {
        Self::build(QueryKind::Health, Some(device_id))
    }

    /// `ps -d <id> -j`
    pub fn processes(device_id: &str) -> Self {
        Self::build(QueryKind::Processes, Some(device_id))
    }

    fn build(kind: QueryKind, device_id: Option<&str>) -> Self {
        debug_assert_eq!(
            kind.is_per_device(),
            device_id.is_some(),
            "device id must be given exactly for per-device queries"
        );

        let mut args = vec![kind.subcommand().to_string()];
        if kind.is_per_device() {
            args.push(DEVICE_FLAG.to_string());
            args.push(device_id.unwrap_or_default().to_string());
        }
        args.push(JSON_FLAG.to_string());
        Self { kind, args }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_has_no_device_selector() {
        let spec = CommandSpec::discovery();
        assert_eq!(spec.args(), ["discovery", "-j"]);
        assert_eq!(spec.kind(), QueryKind::Discovery);
    }

    #[test]
    fn per_device_queries() {
        assert_eq!(CommandSpec::stats("0").args(), ["stats", "-d", "0", "-j"]);
        assert_eq!(CommandSpec::health("1").args(), ["health", "-d", "1", "-j"]);
        assert_eq!(CommandSpec::processes("2").args(), ["ps", "-d", "2", "-j"]);
    }

    #[test]
    fn selector_follows_query_kind() {
        for spec in [
            CommandSpec::discovery(),
            CommandSpec::stats("0"),
            CommandSpec::health("0"),
            CommandSpec::processes("0"),
        ] {
            let has_selector = spec.args().iter().any(|a| a == DEVICE_FLAG);
            assert_eq!(has_selector, spec.kind().is_per_device(), "{}", spec);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "per-device")]
    fn per_device_query_without_id_panics_in_debug() {
        CommandSpec::build(QueryKind::Health, None);
    }

    #[test]
    fn device_id_is_opaque() {
        let spec = CommandSpec::stats("0000:4d:00.0");
        assert_eq!(spec.args()[2], "0000:4d:00.0");
        assert_eq!(spec.to_string(), "stats -d 0000:4d:00.0 -j");
    }
}
