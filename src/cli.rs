use clap::Parser;

use crate::data_models::Query;

/// Every token reaches `invocation` untouched; `--json` and `--n N` are picked
/// out of the stream wherever they appear and everything else is a query word.
#[derive(Parser, Debug)]
#[command(
    name = "glean",
    about = "Instant-answer web search from the terminal",
    override_usage = "glean <QUERY WORDS>... [--json] [--n N]",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Query words, mixed with `--json` (indented JSON output) and `--n N`
    /// (maximum number of related results)
    #[arg(value_name = "ARGS", allow_hyphen_values = true, trailing_var_arg = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub query: Query,
    pub json: bool,
}

impl Cli {
    /// Scans the tokens left to right. A malformed `--n` value is consumed and
    /// ignored; a trailing `--n` with nothing after it is a query word.
    pub fn invocation(&self, default_want: usize) -> Invocation {
        let mut json = false;
        let mut want = default_want;
        let mut words: Vec<&str> = Vec::new();

        let mut tokens = self.args.iter();
        while let Some(token) = tokens.next() {
            match token.as_str() {
                "--json" => json = true,
                "--n" => match tokens.next() {
                    Some(raw) => {
                        if let Ok(n) = raw.trim().parse::<usize>() {
                            want = n;
                        }
                    }
                    None => words.push(token),
                },
                _ => words.push(token),
            }
        }

        Invocation {
            query: Query::from_words(&words, want),
            json,
        }
    }
}
