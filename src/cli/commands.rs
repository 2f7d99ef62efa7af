//! Line commands accepted on stdin in `--interactive` mode.

use thiserror::Error;

use crate::controller::{AnalyticsEvent, JobsEvent};
use crate::model::{ContractType, Seniority};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid {what} '{value}'")]
    InvalidValue { what: &'static str, value: String },
}

fn split(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
        None => (line.to_lowercase(), ""),
    }
}

fn required<'a>(cmd: &'static str, arg: &'a str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(cmd))
    } else {
        Ok(arg)
    }
}

pub fn parse_jobs_command(line: &str) -> Result<JobsEvent, CommandError> {
    let (cmd, arg) = split(line);
    let event = match cmd.as_str() {
        "next" | "n" => JobsEvent::NextPage,
        "prev" | "p" => JobsEvent::PrevPage,
        "tech" | "t" => JobsEvent::ToggleTechnology(required("tech", arg)?.to_string()),
        "seniority" => {
            let raw = required("seniority", arg)?;
            let level = Seniority::parse_strict(raw).ok_or_else(|| CommandError::InvalidValue {
                what: "seniority",
                value: raw.to_string(),
            })?;
            JobsEvent::ToggleSeniority(level)
        }
        "contract" => {
            let raw = required("contract", arg)?;
            let contract =
                ContractType::parse_strict(raw).ok_or_else(|| CommandError::InvalidValue {
                    what: "contract type",
                    value: raw.to_string(),
                })?;
            JobsEvent::ToggleContract(contract)
        }
        "remote" => match arg.to_lowercase().as_str() {
            "" => JobsEvent::ToggleRemote,
            "on" | "true" | "yes" => JobsEvent::SetRemote(true),
            "off" | "false" | "no" => JobsEvent::SetRemote(false),
            other => {
                return Err(CommandError::InvalidValue {
                    what: "remote switch",
                    value: other.to_string(),
                })
            }
        },
        // an empty argument clears the field
        "search" | "s" => JobsEvent::SetSearch(arg.to_string()),
        "company" | "c" => JobsEvent::SetCompany(arg.to_string()),
        "per-page" | "perpage" => {
            let raw = required("per-page", arg)?;
            let per_page = raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| CommandError::InvalidValue {
                    what: "page size",
                    value: raw.to_string(),
                })?;
            JobsEvent::SetPerPage(per_page)
        }
        "apply" => JobsEvent::Apply,
        "reset" => JobsEvent::Reset,
        "quit" | "q" | "exit" => JobsEvent::Quit,
        _ => return Err(CommandError::Unknown(cmd)),
    };
    Ok(event)
}

pub fn parse_analytics_command(line: &str) -> Result<AnalyticsEvent, CommandError> {
    let (cmd, arg) = split(line);
    match cmd.as_str() {
        "level" | "l" => Ok(AnalyticsEvent::ShowLevel(
            required("level", arg)?.to_lowercase(),
        )),
        "quit" | "q" | "exit" => Ok(AnalyticsEvent::Quit),
        _ => Err(CommandError::Unknown(cmd)),
    }
}
