// Command line definition for wordfuzz
// Uses clap for argument parsing

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::models::{FilterSet, RequestSpec, PLACEHOLDER};

pub const DEFAULT_THREADS: usize = 10;

/// Everything a run needs, fixed before dispatch starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzConfig {
    pub url: String,
    pub wordlist: PathBuf,
    pub threads: usize,
    pub filters: FilterSet,
    pub data: Option<String>,
    pub verbose: bool,
}

impl FuzzConfig {
    pub fn request_spec(&self) -> RequestSpec {
        RequestSpec::new(self.url.clone(), self.data.clone())
    }
}

pub fn command() -> Command {
    Command::new("wordfuzz")
        .version(clap::crate_version!())
        .about("Wordlist-driven HTTP content discovery fuzzer")
        .after_help("EXAMPLES:\n  wordfuzz -u http://target/FUZZ -w words.txt -t 20 -fc 403,500\n  wordfuzz -u http://target/login -w passwords.txt -d 'username=admin&password=FUZZ' -fs 1234")
        .arg(Arg::new("url")
            .short('u')
            .long("url")
            .required(true)
            .num_args(1)
            .help("Target URL with FUZZ placeholder"))
        .arg(Arg::new("wordlist")
            .short('w')
            .long("wordlist")
            .required(true)
            .num_args(1)
            .value_parser(clap::value_parser!(PathBuf))
            .help("Path to the wordlist"))
        .arg(Arg::new("threads")
            .short('t')
            .long("threads")
            .num_args(1)
            .default_value("10")
            .value_parser(parse_threads)
            .help("Number of concurrent workers"))
        .arg(Arg::new("filter_codes")
            .long("filter_codes")
            .visible_alias("fc")
            .num_args(1)
            .help("Comma separated list of status codes to exclude (e.g., 200,301)"))
        .arg(Arg::new("filter_size")
            .long("filter_size")
            .visible_alias("fs")
            .num_args(1)
            .value_parser(parse_size_list)
            .help("Comma separated list of response sizes to exclude (e.g., 100,200)"))
        .arg(Arg::new("data")
            .short('d')
            .long("data")
            .num_args(1)
            .help("Data to send in a POST request (e.g., 'username=admin&password=FUZZ')"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Enable debug logging on stderr"))
}

/// Rewrite the two-letter single-dash flags `-fc` and `-fs` into their
/// long form, since clap short flags are a single character.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| expand_short_filter(&arg).unwrap_or(arg))
        .collect()
}

fn expand_short_filter(arg: &OsString) -> Option<OsString> {
    let text = arg.to_str()?;
    for (short, long) in [("-fc", "--filter_codes"), ("-fs", "--filter_size")] {
        if let Some(rest) = text.strip_prefix(short) {
            if rest.is_empty() || rest.starts_with('=') {
                return Some(OsString::from(format!("{}{}", long, rest)));
            }
        }
    }
    None
}

/// Parse argv into a config, or a clap error describing the usage problem.
pub fn parse_config<I, T>(args: I) -> Result<FuzzConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut cmd = command();
    let matches = cmd.try_get_matches_from_mut(normalize_args(args))?;
    let config = config_from_matches(&matches);

    if !config.url.contains(PLACEHOLDER)
        && !config.data.as_deref().is_some_and(|d| d.contains(PLACEHOLDER))
    {
        return Err(cmd.error(
            clap::error::ErrorKind::ValueValidation,
            format!("the URL or POST data must contain the {} placeholder", PLACEHOLDER),
        ));
    }
    Ok(config)
}

fn config_from_matches(matches: &ArgMatches) -> FuzzConfig {
    let codes = matches
        .get_one::<String>("filter_codes")
        .map(|raw| split_list(raw))
        .unwrap_or_default();
    let sizes = matches
        .get_one::<Vec<usize>>("filter_size")
        .cloned()
        .unwrap_or_default();

    FuzzConfig {
        url: matches.get_one::<String>("url").cloned().unwrap_or_default(),
        wordlist: matches
            .get_one::<PathBuf>("wordlist")
            .cloned()
            .unwrap_or_default(),
        threads: matches
            .get_one::<usize>("threads")
            .copied()
            .unwrap_or(DEFAULT_THREADS),
        filters: FilterSet::new(codes, sizes),
        data: matches.get_one::<String>("data").cloned(),
        verbose: matches.get_flag("verbose"),
    }
}

/// Comma separated values, each trimmed, empty items dropped.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_size_list(raw: &str) -> Result<Vec<usize>, String> {
    split_list(raw)
        .iter()
        .map(|item| {
            item.parse::<usize>()
                .map_err(|_| format!("invalid response size '{}'", item))
        })
        .collect()
}

fn parse_threads(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("thread count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid thread count '{}'", raw)),
    }
}
