use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use devtoolbox::{
    add_subtract_ms, build_result, code_snippets, decode_base64, decode_jwt, encode_base64,
    encode_base64_bytes, format_env, format_json, minify_json, now_unix_ms, now_unix_seconds,
    parse_env, parse_json_to_env, parse_timestamp, replace_with_regex, summarize_claims,
    test_regex, to_env_example, to_json, validate_env, validate_json, wrap_base64_lines,
    DecodedValue, EnvSpacing, FormatEnvOptions, IndentStyle, LineEnding,
};

/// Developer text utilities: JSON, Base64, JWT, regex, timestamps, .env.
///
/// dtb reads input from an argument, a file, or stdin, runs one of the
/// six engines over it, and prints the result. Structured results are
/// printed as JSON.
#[derive(Parser, Debug)]
#[command(name = "dtb")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    tool: Tool,

    /// Output file. If not specified, writes to stdout.
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Tool {
    /// Validate, pretty-print, or minify JSON.
    Json {
        /// Input file. If not specified, reads from stdin.
        file: Option<PathBuf>,
        /// Minify instead of pretty-printing.
        #[arg(short, long)]
        compact: bool,
        /// Indent unit for pretty output.
        #[arg(long, value_enum, default_value = "two")]
        indent: IndentArg,
        /// Only validate; print the verdict instead of reformatting.
        #[arg(long)]
        validate: bool,
    },
    /// Encode or decode Base64.
    Base64 {
        #[command(subcommand)]
        command: Base64Command,
    },
    /// Decode a JWT. No signature verification: treat claims as untrusted.
    Jwt {
        /// The compact token. If not specified, reads from stdin.
        token: Option<String>,
        /// Include an advisory summary of the time claims.
        #[arg(long)]
        claims: bool,
    },
    /// Test a regular expression or run a replacement.
    Regex {
        #[command(subcommand)]
        command: RegexCommand,
    },
    /// Convert a Unix timestamp (unit auto-detected) or date string.
    Timestamp {
        /// Epoch number or date string. Defaults to the current time.
        #[arg(allow_hyphen_values = true)]
        input: Option<String>,
        /// Shift the parsed instant by this many milliseconds.
        #[arg(long, value_name = "MS", allow_hyphen_values = true)]
        delta: Option<i64>,
        /// Include per-language constructor snippets.
        #[arg(long)]
        snippets: bool,
    },
    /// Parse, validate, and reformat a .env file (or flat JSON object).
    Env {
        /// Input file. If not specified, reads from stdin.
        file: Option<PathBuf>,
        /// Output shape.
        #[arg(short = 'f', long, value_enum, default_value = "formatted")]
        format: EnvFormatArg,
        /// Sort entries alphabetically (case-insensitive).
        #[arg(long)]
        sort: bool,
        /// Put spaces around `=`.
        #[arg(long)]
        spaced: bool,
        /// Prefix entries with `export `.
        #[arg(long)]
        export: bool,
        /// Use CRLF line endings.
        #[arg(long)]
        crlf: bool,
        /// Do not end the output with a newline.
        #[arg(long)]
        no_trailing_newline: bool,
        /// Placeholder value for the example output shape.
        #[arg(long, default_value = "")]
        placeholder: String,
        /// Print validation results instead of reformatting.
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Subcommand, Debug)]
enum Base64Command {
    /// Encode text (or a file's raw bytes) to Base64.
    Encode {
        /// Text to encode. If not specified, reads from stdin.
        text: Option<String>,
        /// Encode this file's bytes instead of text.
        #[arg(long, value_name = "FILE", conflicts_with = "text")]
        file: Option<PathBuf>,
        /// URL-safe alphabet (`-`/`_`, no padding).
        #[arg(short, long)]
        url_safe: bool,
        /// Wrap output at this many characters (MIME uses 76).
        #[arg(short, long, value_name = "COLS")]
        wrap: Option<usize>,
        /// Emit a data: URI with this MIME type.
        #[arg(long, value_name = "MIME")]
        data_uri: Option<String>,
    },
    /// Decode Base64 to text (or raw bytes on stdout).
    Decode {
        /// Base64 to decode. If not specified, reads from stdin.
        text: Option<String>,
        /// Accept the URL-safe alphabet.
        #[arg(short, long)]
        url_safe: bool,
    },
}

#[derive(Subcommand, Debug)]
enum RegexCommand {
    /// List matches of PATTERN in the input.
    Test {
        pattern: String,
        /// Flag letters from `g i m s u y`.
        #[arg(long, default_value = "")]
        flags: String,
        /// Subject text. If not specified, reads from stdin.
        text: Option<String>,
    },
    /// Replace matches of PATTERN in the input.
    Replace {
        pattern: String,
        /// Replacement template (`$1`, `$&`, `$$`).
        replacement: String,
        /// Flag letters from `g i m s u y`.
        #[arg(long, default_value = "")]
        flags: String,
        /// Subject text. If not specified, reads from stdin.
        text: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IndentArg {
    Two,
    Four,
    Tab,
}

impl From<IndentArg> for IndentStyle {
    fn from(arg: IndentArg) -> Self {
        match arg {
            IndentArg::Two => IndentStyle::Two,
            IndentArg::Four => IndentStyle::Four,
            IndentArg::Tab => IndentStyle::Tab,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EnvFormatArg {
    Formatted,
    Minified,
    Example,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("dtb: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let output = match args.tool {
        Tool::Json { file, compact, indent, validate } => {
            let input = read_input(file, None)?;
            run_json(&input, compact, indent.into(), validate)?.into_bytes()
        }
        Tool::Base64 { command } => run_base64(command)?,
        Tool::Jwt { token, claims } => {
            let input = read_input(None, token)?;
            run_jwt(&input, claims)?.into_bytes()
        }
        Tool::Regex { command } => run_regex(command)?.into_bytes(),
        Tool::Timestamp { input, delta, snippets } => {
            run_timestamp(input, delta, snippets)?.into_bytes()
        }
        Tool::Env {
            file,
            format,
            sort,
            spaced,
            export,
            crlf,
            no_trailing_newline,
            placeholder,
            validate,
        } => {
            let input = read_input(file, None)?;
            let options = FormatEnvOptions {
                sort_keys: sort,
                spacing: if spaced { EnvSpacing::Around } else { EnvSpacing::None },
                trailing_newline: !no_trailing_newline,
                export_prefix: export,
                minify: matches!(format, EnvFormatArg::Minified),
                line_ending: if crlf { LineEnding::Crlf } else { LineEnding::Lf },
            };
            run_env(&input, format, &options, &placeholder, validate)?.into_bytes()
        }
    };

    match args.output {
        Some(path) => fs::write(&path, &output)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e))?,
        None => io::stdout().write_all(&output)?,
    }
    Ok(())
}

fn run_json(
    input: &str,
    compact: bool,
    indent: IndentStyle,
    validate: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    if validate {
        return Ok(match validate_json(input) {
            Ok(_) => "valid\n".to_string(),
            Err(e) => {
                let location = match (e.line, e.column) {
                    (Some(line), Some(column)) => format!(" (line {line}, column {column})"),
                    _ => String::new(),
                };
                format!("invalid: {}{location}\n", e.message)
            }
        });
    }
    validate_json(input)?;
    debug!(compact, "reformatting JSON");
    let mut out = if compact { minify_json(input) } else { format_json(input, indent) };
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

fn run_base64(command: Base64Command) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match command {
        Base64Command::Encode { text, file, url_safe, wrap, data_uri } => {
            let encoded = match file {
                Some(path) => {
                    let bytes = fs::read(&path)
                        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
                    encode_base64_bytes(&bytes, url_safe)
                }
                None => encode_base64(&read_input(None, text)?, url_safe),
            };
            let encoded = match wrap {
                Some(cols) => wrap_base64_lines(&encoded, cols),
                None => encoded,
            };
            Ok(match data_uri {
                Some(mime) => format!("data:{mime};base64,{encoded}\n"),
                None => format!("{encoded}\n"),
            }
            .into_bytes())
        }
        Base64Command::Decode { text, url_safe } => {
            let input = read_input(None, text)?;
            Ok(match decode_base64(&input, url_safe)? {
                DecodedValue::Text(s) => format!("{s}\n").into_bytes(),
                // Raw binary is emitted unmodified, no trailing newline.
                DecodedValue::Bytes(bytes) => bytes,
            })
        }
    }
}

fn run_jwt(token: &str, claims: bool) -> Result<String, Box<dyn std::error::Error>> {
    let decoded = decode_jwt(token)?;
    debug!(claims = decoded.payload.len(), "decoded JWT");
    let mut doc = serde_json::to_value(&decoded)?;
    if claims {
        let summary = summarize_claims(&decoded, now_unix_seconds());
        doc["claims"] = serde_json::to_value(summary)?;
    }
    Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
}

fn run_regex(command: RegexCommand) -> Result<String, Box<dyn std::error::Error>> {
    match command {
        RegexCommand::Test { pattern, flags, text } => {
            let subject = read_input(None, text)?;
            let matches = test_regex(&pattern, &flags, &subject)?;
            debug!(count = matches.len(), "regex matches");
            Ok(format!("{}\n", serde_json::to_string_pretty(&matches)?))
        }
        RegexCommand::Replace { pattern, replacement, flags, text } => {
            let subject = read_input(None, text)?;
            let result = replace_with_regex(&pattern, &flags, &subject, &replacement)?;
            Ok(format!("{result}\n"))
        }
    }
}

fn run_timestamp(
    input: Option<String>,
    delta: Option<i64>,
    snippets: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut result = match input {
        Some(raw) => parse_timestamp(&raw)?,
        None => build_result(now_unix_ms())?,
    };
    if let Some(delta_ms) = delta {
        result = build_result(add_subtract_ms(result.timestamp_ms, delta_ms))?;
    }

    let mut doc = serde_json::to_value(&result)?;
    if snippets {
        doc["snippets"] = serde_json::to_value(code_snippets(result.unix_seconds, result.unix_ms))?;
    }
    Ok(format!("{}\n", serde_json::to_string_pretty(&doc)?))
}

fn run_env(
    input: &str,
    format: EnvFormatArg,
    options: &FormatEnvOptions,
    placeholder: &str,
    validate: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    // A flat JSON object is accepted as an alternate source format.
    let parsed = parse_json_to_env(input).unwrap_or_else(|| parse_env(input));

    if validate {
        let validation = validate_env(&parsed);
        return Ok(format!("{}\n", serde_json::to_string_pretty(&validation)?));
    }

    Ok(match format {
        EnvFormatArg::Formatted | EnvFormatArg::Minified => format_env(&parsed, options),
        EnvFormatArg::Example => to_env_example(&parsed, placeholder, options.line_ending),
        EnvFormatArg::Json => {
            let mut out = to_json(&parsed, 2);
            out.push('\n');
            out
        }
    })
}

/// Resolves input from an inline argument, a file, or stdin. Refuses
/// to hang on an interactive terminal with nothing to read.
fn read_input(
    file: Option<PathBuf>,
    inline: Option<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(text) = inline {
        return Ok(text);
    }
    if let Some(path) = file {
        return Ok(fs::read_to_string(&path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?);
    }
    if io::stdin().is_terminal() {
        return Err("no input: pass an argument, a file, or pipe stdin".into());
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
