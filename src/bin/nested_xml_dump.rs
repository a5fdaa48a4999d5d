use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::{Level, LevelFilter, debug};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use nested_xml::{ElementTemplate, WriterSettings, render_document};

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

struct NestedXmlDump {
    writer_settings: WriterSettings,
    input: Option<PathBuf>,
    output_target: Option<PathBuf>,
    verbosity_level: Option<Level>,
}

impl NestedXmlDump {
    pub fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let input = matches
            .get_one::<String>("INPUT")
            .filter(|path| path.as_str() != "-")
            .map(PathBuf::from);

        let encoding = matches
            .get_one::<String>("encoding")
            .filter(|encoding| !encoding.is_empty())
            .cloned();

        let version = matches
            .get_one::<String>("xml-version")
            .cloned()
            .unwrap_or_else(|| "1.0".to_string());

        let indent_size = *matches.get_one::<usize>("indent-size").unwrap_or(&2);

        let verbosity_level = match matches.get_count("verbose") {
            0 => None,
            1 => Some(Level::Info),
            2 => Some(Level::Debug),
            3 => Some(Level::Trace),
            _ => {
                eprintln!("using more than -vvv does not affect verbosity level");
                Some(Level::Trace)
            }
        };

        Ok(NestedXmlDump {
            writer_settings: WriterSettings::new()
                .version(version)
                .encoding(encoding)
                .indent(matches.get_flag("indent"))
                .indent_size(indent_size),
            input,
            output_target: matches.get_one::<String>("output-target").map(PathBuf::from),
            verbosity_level,
        })
    }

    /// Main entry point for `NestedXmlDump`
    pub fn run(&self) -> Result<()> {
        self.try_to_initialize_logging();

        let template = self.read_template()?;
        debug!("loaded template rooted at `{}`", template.name);

        let document = render_document(&template, &self.writer_settings)
            .context("Failed to render template")?;

        let mut output: Box<dyn Write> = match &self.output_target {
            Some(path) => Box::new(Self::create_output_file(path).with_context(|| {
                format!(
                    "An error occurred while creating output file at `{}`",
                    path.display()
                )
            })?),
            None => Box::new(io::stdout().lock()),
        };

        writeln!(output, "{}", document)?;
        output.flush()?;

        Ok(())
    }

    fn read_template(&self) -> Result<ElementTemplate> {
        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open file {}", path.display()))?;
                ElementTemplate::from_reader(file)
                    .with_context(|| format!("Failed to read template from {}", path.display()))
            }
            None => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read template from stdin")?;
                Ok(ElementTemplate::from_json_str(&buffer)?)
            }
        }
    }

    /// Creates parent directories if needed, refuses to replace a directory.
    fn create_output_file(path: impl AsRef<Path>) -> Result<File> {
        let p = path.as_ref();

        if p.is_dir() {
            bail!(
                "There is a directory at {}, refusing to overwrite",
                p.display()
            );
        }

        match p.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent)?;
            }
            Some(_) => {}
            None => bail!("Output file cannot be root."),
        }

        Ok(File::create(p)?)
    }

    fn try_to_initialize_logging(&self) {
        if let Some(level) = self.verbosity_level {
            if let Err(e) = TermLogger::init(
                level.to_level_filter(),
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ) {
                eprintln!("Failed to initialize logging: {}", e);
            }
        } else {
            log::set_max_level(LevelFilter::Off);
        }
    }
}

fn main() {
    let matches = Command::new("nested_xml_dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a JSON element template as an XML document")
        .arg(
            Arg::new("INPUT")
                .help("Path to a JSON element template, reads stdin when omitted or `-`"),
        )
        .arg(
            Arg::new("output-target")
                .long("output")
                .short('f')
                .help("Writes output to the file specified instead of stdout, errors will still be printed to stderr. \
                       Will create parent directories if needed."),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .action(ArgAction::SetTrue)
                .help("When set, output will be indented."),
        )
        .arg(
            Arg::new("indent-size")
                .long("indent-size")
                .value_parser(value_parser!(usize))
                .default_value("2")
                .help("Number of spaces per indentation level, only used with `--indent`."),
        )
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .default_value("UTF-8")
                .help("Encoding named in the XML declaration, pass an empty string to omit it."),
        )
        .arg(
            Arg::new("xml-version")
                .long("xml-version")
                .default_value("1.0")
                .help("Version named in the XML declaration."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("-v - info, -vv - debug, -vvv - trace."),
        )
        .get_matches();

    let result = NestedXmlDump::from_cli_matches(&matches).and_then(|app| app.run());

    if let Err(e) = result {
        eprintln!("{:?}", e);
        exit(1);
    }
}
