use std::env;
use std::fs;
use std::path::Path;
use std::process;

use algo_trace::catalog::{self, AlgorithmId};
use algo_trace::instance::Orientation;
use algo_trace::report::{self, OutputFormat};
use algo_trace::{AlgoError, RunOptions};
use tracing::Level;

const INPUT_FILE: &str = "input.txt";
const OUTPUT_FILE: &str = "output.txt";

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("algotrace: {err}");
            eprint!("{}", Options::help());
            process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(if options.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let name = match &options.command {
        Command::List => {
            print!("{}", catalog::listing());
            return;
        }
        Command::Run(name) => name,
    };

    if let Err(err) = run(name, &options) {
        tracing::debug!(error = ?err, "run failed");
        match options.run.format {
            OutputFormat::Json => println!("{}", report::error_json(&err.to_string())),
            OutputFormat::Text => eprintln!("algotrace: {err}"),
        }
        process::exit(1);
    }
}

fn run(name: &str, options: &Options) -> Result<(), AlgoError> {
    let id: AlgorithmId = name.parse()?;
    if options.args.is_empty() {
        let args = read_input(Path::new(INPUT_FILE))?;
        tracing::debug!(file = INPUT_FILE, args = args.len(), "read arguments from file");
        let run = RunOptions {
            pretty: true,
            ..options.run.clone()
        };
        let rendered = catalog::execute(id, &args, &run)?;
        fs::write(OUTPUT_FILE, rendered + "\n").map_err(|source| AlgoError::Resource {
            path: OUTPUT_FILE.into(),
            source,
        })?;
        tracing::debug!(file = OUTPUT_FILE, "report written");
    } else {
        let rendered = catalog::execute(id, &options.args, &options.run)?;
        println!("{rendered}");
    }
    Ok(())
}

/// One argument per line; a trailing newline does not add an empty argument.
fn read_input(path: &Path) -> Result<Vec<String>, AlgoError> {
    let content = fs::read_to_string(path).map_err(|source| AlgoError::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

enum Command {
    List,
    Run(String),
}

struct Options {
    command: Command,
    args: Vec<String>,
    run: RunOptions,
    verbose: bool,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut builder = RunOptions::builder();
        let mut command = None;
        let mut positional = Vec::new();
        let mut verbose = false;
        let mut only_positional = false;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if only_positional {
                positional.push(arg);
            } else if arg == "--help" || arg == "-h" {
                print!("{}", Options::help());
                process::exit(0);
            } else if arg == "--" {
                only_positional = true;
            } else if let Some(value) = arg.strip_prefix("--format=") {
                builder = builder.with_format(value.parse()?);
            } else if arg == "--format" {
                let value: String = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                builder = builder.with_format(value.parse()?);
            } else if arg == "--silent" {
                builder = builder.traced(false);
            } else if arg == "--directed" {
                builder = builder.with_orientation(Orientation::Directed);
            } else if arg == "--undirected" {
                builder = builder.with_orientation(Orientation::Undirected);
            } else if arg == "--verbose" || arg == "-v" {
                verbose = true;
            } else if arg.starts_with("--") {
                return Err(format!("unrecognized option '{arg}'"));
            } else if command.is_none() {
                command = Some(arg);
            } else {
                positional.push(arg);
            }
        }

        let command = match command {
            None => return Err("missing algorithm name".to_string()),
            Some(name) if name == "list" => Command::List,
            Some(name) => Command::Run(name),
        };

        Ok(Self {
            command,
            args: positional,
            run: builder.build(),
            verbose,
        })
    }

    fn help() -> String {
        format!(
            "\
Usage: algotrace <algorithm> [options] [arguments...]
       algotrace list

Options:
  --format <json|text>   Output format (default: json)
  --silent               Skip step recording; the report has no steps
  --directed             Treat traversal/shortest-path graphs as directed
  --undirected           Treat traversal/shortest-path graphs as undirected
  -v, --verbose          Debug logging on stderr
  -h, --help             Print this help message

With no arguments after the algorithm name, arguments are read one per
line from {INPUT_FILE} and the report is written to {OUTPUT_FILE}.

Examples:
  algotrace quick-sort 5,3,8,1
  algotrace dijkstra 4 \"0,1,4;0,2,1;1,2,2;1,3,5;2,3,8\" 0
  algotrace kmp --format text ABABDABACDABABCABAB ABABCABAB
  algotrace stack \"push,5;push,7;pop;top\"
"
        )
    }
}
