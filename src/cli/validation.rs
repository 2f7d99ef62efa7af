use crate::cli::args::CliArgs;
use crate::cli::View;
use crate::config::ConfigError;
use crate::model::{ContractType, Seniority};
use crate::output::OutputFormat;

fn invalid(field: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate(args: &CliArgs) -> Result<(), ConfigError> {
    if let Some(raw) = args.view.as_deref() {
        View::parse(raw)
            .ok_or_else(|| invalid("--view", raw, "expected overview, analytics or jobs"))?;
    }
    if let Some(raw) = args.format.as_deref() {
        OutputFormat::parse(raw)
            .ok_or_else(|| invalid("--format", raw, "expected text, json or html"))?;
    }
    for raw in &args.seniority {
        Seniority::parse_strict(raw).ok_or_else(|| {
            invalid(
                "--seniority",
                raw,
                "expected junior, mid, senior, lead, expert or not_specified",
            )
        })?;
    }
    for raw in &args.contract {
        ContractType::parse_strict(raw).ok_or_else(|| {
            invalid(
                "--contract",
                raw,
                "expected cdi, cdd, freelance, internship, apprenticeship or not_specified",
            )
        })?;
    }
    if args.page == Some(0) {
        return Err(invalid("--page", 0, "pages start at 1"));
    }
    if args.per_page == Some(0) {
        return Err(invalid("--per-page", 0, "expected a positive integer"));
    }
    if args.timeout == Some(0) {
        return Err(invalid("--timeout", 0, "expected a positive integer"));
    }
    if args.interval == Some(0) {
        return Err(invalid("--interval", 0, "expected a positive integer"));
    }
    if args.days == Some(0) {
        return Err(invalid("--days", 0, "expected a positive integer"));
    }
    if args.companies_limit == Some(0) {
        return Err(invalid("--companies-limit", 0, "expected a positive integer"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> CliArgs {
        let mut full = vec!["jobwatch"];
        full.extend_from_slice(argv);
        CliArgs::parse_from(full)
    }

    #[test]
    fn accepts_known_values() {
        let args = parse(&[
            "--view", "jobs", "--format", "json", "--seniority", "senior", "--contract", "cdi",
        ]);
        assert!(validate(&args).is_ok());
    }

    #[test]
    fn rejects_unknown_view_and_seniority() {
        assert!(validate(&parse(&["--view", "admin"])).is_err());
        let err = validate(&parse(&["--seniority", "principal"])).unwrap_err();
        assert!(err.to_string().contains("principal"));
    }

    #[test]
    fn rejects_zero_page() {
        assert!(validate(&parse(&["--page", "0"])).is_err());
        assert!(validate(&parse(&["--per-page", "0"])).is_err());
    }
}
