//! CLI entry point for `html2eml`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};

use html2eml::config::{self, Config};
use html2eml::export::eml::{create_eml, ConversionReport, ConvertOptions};
use html2eml::i18n;
use html2eml::ConvertError;

#[derive(Parser)]
#[command(name = "html2eml", version)]
struct Cli {
    /// Folder containing index.html and its images
    #[arg(value_name = "INPUT_FOLDER")]
    input: PathBuf,

    /// Path of the .eml file to write
    #[arg(value_name = "OUTPUT_FILE")]
    output: PathBuf,

    /// Subject of the generated message
    #[arg(short, long, value_name = "TEXT")]
    subject: Option<String>,

    /// Do not add the X-Unsent: 1 draft header
    #[arg(long)]
    no_unsent: bool,

    /// Print the conversion report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,
}

/// Read `--lang <code>` / `--lang=<code>` straight from the raw arguments, so
/// the language is known before clap renders help or usage.
///
/// Arguments that are not valid UTF-8 (paths, typically) are skipped.
fn lang_from_args() -> Option<i18n::Lang> {
    let args: Vec<OsString> = std::env::args_os().collect();
    for (i, arg) in args.iter().enumerate() {
        let Some(arg) = arg.to_str() else {
            continue;
        };
        if arg == "--lang" {
            if let Some(lang) = args
                .get(i + 1)
                .and_then(|c| c.to_str())
                .and_then(i18n::Lang::from_code)
            {
                return Some(lang);
            }
        }
        if let Some(lang) = arg.strip_prefix("--lang=").and_then(i18n::Lang::from_code) {
            return Some(lang);
        }
    }
    None
}

/// Pick the UI language: `--lang`, then the config file, then the system
/// locale, then English.
fn choose_lang(from_args: Option<i18n::Lang>, config: Option<&Config>) -> i18n::Lang {
    from_args
        .or_else(|| {
            config
                .and_then(|c| c.general.lang.as_deref())
                .and_then(i18n::Lang::from_code)
        })
        .or_else(i18n::detect_system_lang)
        .unwrap_or(i18n::Lang::En)
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    Cli::command()
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .after_help(i18n::app_after_help())
        .mut_arg("input", |a| a.help(i18n::help_input_arg()))
        .mut_arg("output", |a| a.help(i18n::help_output_arg()))
        .mut_arg("subject", |a| a.help(i18n::help_subject()))
        .mut_arg("no_unsent", |a| a.help(i18n::help_no_unsent()))
        .mut_arg("json", |a| a.help(i18n::help_output_json()))
        .mut_arg("verbose", |a| a.help(i18n::help_verbose()))
        .mut_arg("lang", |a| a.help(i18n::help_lang()))
}

/// Print the usage and example lines to stdout.
fn print_usage() {
    println!("{}", i18n::cli_usage());
    println!("{}", i18n::cli_example());
}

fn main() -> ExitCode {
    let args_lang = lang_from_args();

    // Validate the arguments before touching the filesystem: a wrong arity
    // prints the usage and exits without reading the config.
    let parsed = Cli::command().try_get_matches();
    if let Err(e) = &parsed {
        if !matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            i18n::set_lang(choose_lang(args_lang, None));
            print_usage();
            return ExitCode::FAILURE;
        }
    }

    // Load configuration; an unusable file is reported once logging is up
    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    i18n::set_lang(choose_lang(args_lang, Some(&config)));

    // Help and version are rendered from the localized command
    let matches = match parsed {
        Ok(matches) => matches,
        Err(_) => match build_localized_command().try_get_matches() {
            Ok(matches) => matches,
            Err(e) => e.exit(),
        },
    };
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(_) => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Using default configuration");
    }
    tracing::debug!(lang = i18n::lang().code(), "UI language selected");

    match cmd_convert(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ConvertError>() {
                Some(ConvertError::MissingInput(path)) => {
                    println!("\u{274c} {} {}", i18n::err_file_not_found(), path.display());
                }
                _ => println!("\u{274c} {}: {e:#}", i18n::err_conversion_failed()),
            }
            tracing::error!(error = %e, "Conversion failed");
            ExitCode::FAILURE
        }
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = config::cache_dir(config);
    let file_appender = std::fs::create_dir_all(&log_dir).ok().and_then(|()| {
        RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(config::LOG_FILE_NAME)
            .build(&log_dir)
            .ok()
    });

    if let Some(file_appender) = file_appender {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
        tracing::debug!(path = %config::log_file_path(config).display(), "File logging enabled");
    } else {
        // Cache dir or log file unusable: stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Convert the input folder and print the outcome.
fn cmd_convert(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let mut options = ConvertOptions::from(config);
    if let Some(subject) = &cli.subject {
        options.message.subject = subject.clone();
    }
    if cli.no_unsent {
        options.message.unsent = false;
    }

    if !cli.json {
        println!(
            "\u{1f4d6} {} {}",
            i18n::msg_reading(),
            cli.input.join(&options.index_file).display()
        );
    }

    let report = create_eml(&cli.input, &cli.output, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &cli.output);
    }
    Ok(())
}

/// Print warnings, the success line and a short summary.
fn print_report(report: &ConversionReport, output: &Path) {
    use humansize::{format_size, BINARY};

    for path in &report.missing {
        println!(
            "\u{26a0}\u{fe0f} {} -> {}",
            i18n::warn_image_not_found(),
            path.display()
        );
    }

    println!(
        "\u{2705} {} -> {}",
        i18n::msg_eml_generated(),
        output.display()
    );
    println!("  {:<20} {}", i18n::msg_inline_images(), report.attached.len());
    for image in &report.attached {
        println!(
            "    {:<30} {:<14} {:>10}",
            image.filename,
            image.content_type,
            format_size(image.size, BINARY)
        );
    }
    if !report.missing.is_empty() {
        println!("  {:<20} {}", i18n::msg_missing_images(), report.missing.len());
    }
    if report.remote > 0 {
        println!("  {:<20} {}", i18n::msg_remote_images(), report.remote);
    }
    println!(
        "  {:<20} {}",
        i18n::msg_output_size(),
        format_size(report.output_size, BINARY)
    );
    println!("  {:<20} {}", i18n::msg_output_file(), output.display());
}
