// Command-line arguments for the `timeular` binary.

use crate::time_range::DEFAULT_TIMEZONE;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "timeular", version, about = "Fetch time entries from the Timeular API")]
pub struct Cli {
    /// Increase file log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Reuse an existing access token instead of signing in
    #[arg(long, global = true, env = "TIMEULAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and print the access token
    Login,
    /// Invalidate an access token
    Logout {
        #[arg(value_name = "TOKEN")]
        access_token: String,
    },
    /// Fetch a single time entry
    Entry { id: String },
    /// Fetch the time entries between two local timestamps
    Range {
        #[arg(value_parser = parse_local_timestamp)]
        start: NaiveDateTime,
        #[arg(value_parser = parse_local_timestamp)]
        end: NaiveDateTime,
        /// IANA timezone the timestamps are expressed in
        #[arg(long, env = "TIMEULAR_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
        timezone: String,
    },
}

/// Accepts `2023-03-30T08:15:00[.123]`, `2023-03-30 08:15:00` or a bare
/// date, which means local midnight.
pub fn parse_local_timestamp(input: &str) -> Result<NaiveDateTime, String> {
    let input = input.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("invalid local timestamp {:?}", input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_accepted_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2023, 3, 30)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        assert_eq!(parse_local_timestamp("2023-03-30T08:15:00").unwrap(), expected);
        assert_eq!(parse_local_timestamp("2023-03-30 08:15:00").unwrap(), expected);
        assert_eq!(
            parse_local_timestamp("2023-03-30").unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 30).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_local_timestamp("30/03/2023").is_err());
    }

    #[test]
    fn range_takes_explicit_timezone() {
        let cli = Cli::try_parse_from([
            "timeular",
            "range",
            "2023-03-30",
            "2023-03-31",
            "--timezone",
            "America/New_York",
        ])
        .unwrap();
        match cli.command {
            Command::Range { timezone, .. } => assert_eq!(timezone, "America/New_York"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn logout_takes_positional_token() {
        let cli = Cli::try_parse_from(["timeular", "logout", "tok-9"]).unwrap();
        assert!(matches!(cli.command, Command::Logout { ref access_token } if access_token == "tok-9"));
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["timeular", "-vv", "entry", "abc"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Entry { ref id } if id == "abc"));
    }
}
