//! htmlflow - HTML to flow-document converter

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use htmlflow::clipboard::{PasteAction, PasteOptions, prepare_paste};
use htmlflow::style::config::load_style_file;
use htmlflow::{ConversionOptions, HtmlConverter, RootKind, TableLayout};

#[derive(Parser)]
#[command(name = "htmlflow")]
#[command(version, about = "Convert HTML to flow-document markup", long_about = None)]
#[command(after_help = "EXAMPLES:
    htmlflow page.html                     Print markup for page.html
    htmlflow page.html -o page.xaml -I     Write indented markup to a file
    htmlflow --clipboard < payload.txt     Convert a CF_HTML clipboard payload")]
struct Cli {
    /// Input HTML file ("-" or omitted reads stdin)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// Emit a FlowDocument root instead of a Section
    #[arg(long)]
    flow_document: bool,

    /// Mark unrecognized elements in the output
    #[arg(long)]
    unknown: bool,

    /// Set xml:space="preserve" on the root
    #[arg(long)]
    preserve: bool,

    /// Pretty-print the markup
    #[arg(short = 'I', long)]
    indent: bool,

    /// Start from an empty style store
    #[arg(long)]
    no_default_styles: bool,

    /// Walk table rows as they appear instead of resolving geometry first
    #[arg(long)]
    streaming_tables: bool,

    /// JSON file with style overrides
    #[arg(long, value_name = "FILE")]
    styles: Option<String>,

    /// Treat the input as a CF_HTML clipboard payload
    #[arg(long)]
    clipboard: bool,

    /// Wrap clipboard fragments ending in </span> in a <div>
    #[arg(long, requires = "clipboard")]
    wrap_partial: bool,

    /// Print diagnostics to stderr
    #[arg(short, long)]
    report: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress diagnostics and log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Off,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    let _ = env_logger::builder().filter_module("htmlflow", level).try_init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = ConversionOptions::default()
        .with_root(if cli.flow_document {
            RootKind::FlowDocument
        } else {
            RootKind::Section
        })
        .with_process_unknown(cli.unknown)
        .with_preserve_whitespace(cli.preserve)
        .with_indent(cli.indent)
        .with_default_styles(!cli.no_default_styles)
        .with_table_layout(if cli.streaming_tables {
            TableLayout::Streaming
        } else {
            TableLayout::Resolved
        });

    let mut converter = HtmlConverter::new(options);
    if let Some(path) = &cli.styles {
        let count = load_style_file(converter.styles_mut(), path).map_err(|e| format!("{path}: {e}"))?;
        log::debug!("loaded {count} style overrides from {path}");
    }

    let bytes = read_input(cli.input.as_deref()).map_err(|e| e.to_string())?;
    let html = htmlflow::decode_html(&bytes);

    let markup = if cli.clipboard {
        let paste = PasteOptions::new(PasteAction::ConvertToMarkup)
            .with_wrap_partial_fragment(cli.wrap_partial);
        prepare_paste(&html, &paste, &converter)
            .map_err(|e| e.to_string())?
            .ok_or("clipboard payload has no fragment")?
            .data
    } else {
        let report = converter
            .set_html(html.into_owned())
            .and_then(|c| c.convert_report())
            .map_err(|e| e.to_string())?;
        if cli.report && !cli.quiet {
            for diagnostic in &report.diagnostics {
                eprintln!("warning: {diagnostic}");
            }
        }
        report.markup
    };

    write_output(cli.output.as_deref(), &markup).map_err(|e| e.to_string())
}

fn read_input(path: Option<&str>) -> io::Result<Vec<u8>> {
    match path {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read(path),
    }
}

fn write_output(path: Option<&str>, markup: &str) -> io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, markup),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(markup.as_bytes())?;
            stdout.write_all(b"\n")
        }
    }
}
