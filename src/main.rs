mod annotate;
mod error;

use std::env;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, crate_version, crate_authors, crate_description};
use serde::Deserialize;

use oruri::SplitMode;

use error::InvalidVarError;

#[derive(Parser)]
#[clap(version = crate_version!(), author = crate_authors!(), about = crate_description!())]
struct Opts {
    /// The model name or directory for the engine to load.
    /// If omitted, the engine falls back to its default model.
    #[clap(short = 'b', long)]
    model_path: Option<String>,

    /// Tokenizer split mode: A, B or C.
    #[clap(short, long, default_value = "C")]
    mode: String,

    /// Keep the engine's sentence separator enabled.
    #[clap(short = 's', long)]
    use_sentence_separator: bool,

    /// Comma-separated list of pipeline stages to disable.
    #[clap(short, long)]
    disable_pipes: Option<String>,

    /// The file to write annotated sentences to.
    /// If omitted, they will be written to stdout instead.
    #[clap(short, long)]
    output_path: Option<PathBuf>,

    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Input files to read line by line, in the order given.
    /// If omitted, lines are read from stdin instead.
    files: Vec<PathBuf>,
}

#[derive(Deserialize, Default)]
struct Config {
    oruri: Option<OruriConfig>,
}

#[derive(Deserialize, Default)]
struct OruriConfig {
    command: Option<String>,
    model: Option<String>,
}

const DEFAULT_CONFIG_PATH: &str = "uguisu.yaml";

const VAR_CONFIG_PATH: &str = "UGUISU_CONFIG";

const VAR_ORURI_COMMAND: &str = "ORURI_COMMAND";
const VAR_ORURI_MODEL: &str = "ORURI_MODEL";

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dotenv")] {
        dotenv::dotenv().ok();
    }

    let opts = Opts::parse();

    let mode = opts.mode.parse::<SplitMode>()
        .context("invalid tokenizer mode")?;

    let config = match opts.config.as_deref() {
        Some(config_path) => load_config(config_path)
            .with_context(|| format!("failed to read config file {}", config_path.to_string_lossy()))?
            .with_context(|| format!("failed to parse config file {}", config_path.to_string_lossy()))?,

        None => match env::var_os(VAR_CONFIG_PATH) {
            Some(config_path) => load_config(config_path.as_ref())
                .with_context(|| format!("failed to read config file {}", config_path.to_string_lossy()))?
                .with_context(|| format!("failed to parse config file {}", config_path.to_string_lossy()))?,

            None => if cfg!(feature = "default-config-file") {
                load_config(DEFAULT_CONFIG_PATH.as_ref())
                    .ok()
                    .map(|res| res
                        .with_context(|| format!("failed to parse config file {}", DEFAULT_CONFIG_PATH)))
                    .transpose()?
                    .unwrap_or_default()
            } else {
                Config::default()
            },
        },
    };

    run(opts, mode, config)
}

fn run(opts: Opts, mode: SplitMode, config: Config) -> anyhow::Result<()> {
    let mut client = start_engine(&opts, mode, config.oruri.unwrap_or_default())?;

    match opts.output_path {
        Some(ref output_path) => {
            let file = File::create(output_path)
                .with_context(|| format!("failed to open output file {}", output_path.to_string_lossy()))?;

            let mut writer = BufWriter::new(file);

            annotate_inputs(&mut writer, &opts.files, &mut client)?;

            writer.flush()
                .with_context(|| format!("failed to write to output file {}", output_path.to_string_lossy()))
        },

        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();

            annotate_inputs(&mut writer, &opts.files, &mut client)?;

            writer.flush().context("failed to write to stdout")
        },
    }
}

fn annotate_inputs<W>(writer: &mut W, files: &[PathBuf], client: &mut oruri::Client) -> anyhow::Result<()>
where
    W: Write,
{
    if files.is_empty() {
        let stdin = io::stdin();

        annotate::annotate_lines(writer, stdin.lock().lines(), |text| client.analyze(text))
            .context("failed to annotate stdin")
    } else {
        for path in files {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.to_string_lossy()))?;

            annotate::annotate_lines(writer, BufReader::new(file).lines(), |text| client.analyze(text))
                .with_context(|| format!("failed to annotate input file {}", path.to_string_lossy()))?;
        }

        Ok(())
    }
}

fn load_config(path: &Path) -> io::Result<serde_yaml::Result<Config>> {
    fs::read_to_string(path)
        .map(|contents| serde_yaml::from_str(&contents))
}

fn start_engine(opts: &Opts, mode: SplitMode, config: OruriConfig) -> anyhow::Result<oruri::Client> {
    let mut client_builder = oruri::ClientBuilder::new();

    if let Some(command) = env_var(VAR_ORURI_COMMAND)
        .context("failed to read oruri command")?
        .or(config.command)
    {
        client_builder.command(command);
    }

    let model = match opts.model_path.clone() {
        Some(model) => Some(model),
        None => env_var(VAR_ORURI_MODEL)
            .context("failed to read oruri model")?
            .or(config.model),
    };

    if let Some(model) = model {
        client_builder.model(model);
    }

    client_builder.mode(mode);

    let disable_pipes = opts.disable_pipes.as_deref().filter(|pipes| !pipes.is_empty());

    if let Some(pipes) = disable_pipes {
        eprintln!("disabling pipes: {}", pipes);
        client_builder.disable_pipes(pipes.split(',').map(str::to_owned));
    }

    if !opts.use_sentence_separator {
        client_builder.split_sentences(false);
    }

    let client = client_builder.spawn()
        .context("failed to start the oruri engine")?;

    if disable_pipes.is_some() {
        eprintln!("using : {:?}", client.pipe_names());
    }

    eprintln!("mode is {}", mode);

    if !opts.use_sentence_separator {
        eprintln!("disabling sentence separator");
    }

    Ok(client)
}

fn env_var(key: &str) -> Result<Option<String>, InvalidVarError> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(bad_str)) => Err(InvalidVarError::invalid_utf8(bad_str)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_opts() {
        let opts = Opts::try_parse_from(["uguisu"]).unwrap();
        assert_eq!(opts.mode, "C");
        assert!(opts.model_path.is_none());
        assert!(!opts.use_sentence_separator);
        assert!(opts.disable_pipes.is_none());
        assert!(opts.output_path.is_none());
        assert!(opts.config.is_none());
        assert!(opts.files.is_empty());
    }

    #[test]
    fn test_parse_opts() {
        let opts = Opts::try_parse_from([
            "uguisu",
            "-b", "ja_oruri",
            "-m", "B",
            "-s",
            "-d", "ner,bunsetu_recognizer",
            "-o", "out.txt",
            "one.txt", "two.txt",
        ]).unwrap();

        assert_eq!(opts.model_path.as_deref(), Some("ja_oruri"));
        assert_eq!(opts.mode, "B");
        assert!(opts.use_sentence_separator);
        assert_eq!(opts.disable_pipes.as_deref(), Some("ner,bunsetu_recognizer"));
        assert_eq!(opts.output_path, Some(PathBuf::from("out.txt")));
        assert_eq!(opts.files, vec![PathBuf::from("one.txt"), PathBuf::from("two.txt")]);
    }
}
