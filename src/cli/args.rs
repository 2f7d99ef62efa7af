use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "jobwatch",
    version,
    about = "terminal client for the jobs scraping dashboard",
    long_about = "jobwatch renders the overview, analytics and jobs pages of the jobs scraping dashboard from its JSON API.\n\nExamples:\n  jobwatch --view overview --interval 5000\n  jobwatch --view analytics --level senior --format html --output analytics.html\n  jobwatch --view jobs --tech Rust --remote --interactive\n\nTip: Use --init-config to write ~/.jobwatch/config.yml and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity on stderr (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'f',
        long = "fmt",
        visible_alias = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Frame format on stdout: text, json or html."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Also keep the latest frame in FILE (format inferred from the extension)."
    )]
    pub output: Option<String>,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Config",
        help = "Path to config file (defaults to ~/.jobwatch/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Config",
        help = "Write the default config file if it does not exist, then exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'u',
        long = "bu",
        visible_alias = "base-url",
        value_name = "URL",
        help_heading = "Connection",
        help = "Dashboard base URL (e.g. http://localhost:8080/)."
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 't',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "Connection",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "Connection",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'w',
        long = "vw",
        visible_alias = "view",
        value_name = "PAGE",
        help_heading = "View",
        help = "Page to show: overview, analytics or jobs."
    )]
    pub view: Option<String>,

    #[arg(
        short = 'i',
        long = "it",
        visible_alias = "interactive",
        help_heading = "View",
        help = "Read page commands from stdin (jobs: next, prev, tech <name>, search <text>, ...; analytics: level <name>)."
    )]
    pub interactive: bool,

    #[arg(
        long = "iv",
        visible_alias = "interval",
        value_name = "MS",
        help_heading = "Overview",
        help = "Refresh interval in milliseconds."
    )]
    pub interval: Option<u64>,

    #[arg(
        long = "once",
        help_heading = "Overview",
        help = "Refresh once and exit."
    )]
    pub once: bool,

    #[arg(
        long = "ll",
        visible_alias = "live-logs",
        num_args = 0..=1,
        default_missing_value = "true",
        help_heading = "Overview",
        help = "Show only the logs of the last five minutes."
    )]
    pub live_logs: Option<bool>,

    #[arg(
        short = 'l',
        long = "lvl",
        visible_alias = "level",
        value_name = "LEVEL",
        help_heading = "Analytics",
        help = "Initial seniority level of the technologies-by-level chart."
    )]
    pub level: Option<String>,

    #[arg(
        long = "dy",
        visible_alias = "days",
        value_name = "N",
        help_heading = "Analytics",
        help = "Number of days covered by the timeline."
    )]
    pub days: Option<u32>,

    #[arg(
        long = "cl",
        visible_alias = "companies-limit",
        value_name = "N",
        help_heading = "Analytics",
        help = "Number of companies in the top companies chart."
    )]
    pub companies_limit: Option<u32>,

    #[arg(
        short = 's',
        long = "sq",
        visible_alias = "search",
        value_name = "TEXT",
        help_heading = "Jobs",
        help = "Free-text search."
    )]
    pub search: Option<String>,

    #[arg(
        long = "co",
        visible_alias = "company",
        value_name = "TEXT",
        help_heading = "Jobs",
        help = "Company name filter."
    )]
    pub company: Option<String>,

    #[arg(
        short = 'T',
        long = "tc",
        visible_alias = "tech",
        value_name = "NAME",
        action = ArgAction::Append,
        help_heading = "Jobs",
        help = "Technology filter (repeatable)."
    )]
    pub tech: Vec<String>,

    #[arg(
        long = "sn",
        visible_alias = "seniority",
        value_name = "LEVEL",
        action = ArgAction::Append,
        help_heading = "Jobs",
        help = "Seniority filter: junior, mid, senior, lead, expert (repeatable)."
    )]
    pub seniority: Vec<String>,

    #[arg(
        long = "ct",
        visible_alias = "contract",
        value_name = "TYPE",
        action = ArgAction::Append,
        help_heading = "Jobs",
        help = "Contract filter: cdi, cdd, freelance, internship, apprenticeship (repeatable)."
    )]
    pub contract: Vec<String>,

    #[arg(
        short = 'R',
        long = "rm",
        visible_alias = "remote",
        help_heading = "Jobs",
        help = "Only remote jobs."
    )]
    pub remote: bool,

    #[arg(
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Jobs",
        help = "Page to load first."
    )]
    pub page: Option<u32>,

    #[arg(
        short = 'n',
        long = "pp",
        visible_alias = "per-page",
        value_name = "N",
        help_heading = "Jobs",
        help = "Jobs per page."
    )]
    pub per_page: Option<u32>,

    #[arg(
        long = "db",
        visible_alias = "debounce",
        value_name = "MS",
        help_heading = "Jobs",
        help = "Quiet period after search/company input before fetching, in milliseconds."
    )]
    pub debounce: Option<u64>,
}
