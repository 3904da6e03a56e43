//! # fdmd5
//!
//! Prints the MD5 (or HMAC-MD5) digest of strings, files or stdin in the
//! `md5sum` layout.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use fdkit::encoding::hex;
use fdkit::utils::human_readable_size;
use fdkit::{HmacMd5, Md5};

const READ_CHUNK: usize = 64 * 1024;

/// Compute MD5 message digests.
#[derive(Parser, Debug)]
#[command(name = "fdmd5", version, about)]
struct Cli {
    /// Hash the UTF-8 bytes of TEXT. May be repeated.
    #[arg(short, long = "string", value_name = "TEXT")]
    strings: Vec<String>,

    /// Compute HMAC-MD5 keyed with KEY instead of a plain digest.
    #[arg(short, long)]
    key: Option<String>,

    /// Print only the digest.
    #[arg(short, long)]
    quiet: bool,

    /// Files to hash. With no input, or when FILE is -, read stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Text(String),
    Stdin,
    File(PathBuf),
}

impl Input {
    fn name(&self) -> String {
        match self {
            Input::Text(text) => format!("{:?}", text),
            Input::Stdin => "-".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn digest(&self, key: Option<&[u8]>) -> Result<[u8; Md5::DIGEST_LEN]> {
        match self {
            Input::Text(text) => {
                let mut hasher = Hasher::new(key)?;
                hasher.update(text.as_bytes())?;
                Ok(hasher.finalize())
            }
            Input::Stdin => hash_reader(io::stdin().lock(), key).context("reading stdin"),
            Input::File(path) => hash_file(path, key),
        }
    }
}

impl Cli {
    fn inputs(&self) -> Vec<Input> {
        let mut inputs: Vec<Input> = self.strings.iter().cloned().map(Input::Text).collect();
        for path in &self.files {
            if path.as_os_str() == "-" {
                inputs.push(Input::Stdin);
            } else {
                inputs.push(Input::File(path.clone()));
            }
        }
        if inputs.is_empty() {
            inputs.push(Input::Stdin);
        }
        inputs
    }
}

enum Hasher {
    Plain(Md5),
    Keyed(HmacMd5),
}

impl Hasher {
    fn new(key: Option<&[u8]>) -> fdkit::Result<Self> {
        Ok(match key {
            Some(key) => Hasher::Keyed(HmacMd5::new(key)?),
            None => Hasher::Plain(Md5::new()),
        })
    }

    fn update(&mut self, data: &[u8]) -> fdkit::Result<()> {
        match self {
            Hasher::Plain(md5) => md5.update(data),
            Hasher::Keyed(mac) => mac.update(data),
        }
    }

    fn finalize(self) -> [u8; Md5::DIGEST_LEN] {
        match self {
            Hasher::Plain(md5) => md5.finalize(),
            Hasher::Keyed(mac) => mac.finalize(),
        }
    }
}

fn hash_reader<R: Read>(mut reader: R, key: Option<&[u8]>) -> Result<[u8; Md5::DIGEST_LEN]> {
    let mut hasher = Hasher::new(key)?;
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&buf[..n])?;
    }
    Ok(hasher.finalize())
}

fn hash_file(path: &Path, key: Option<&[u8]>) -> Result<[u8; Md5::DIGEST_LEN]> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    if let Ok(meta) = file.metadata() {
        tracing::debug!(
            path = %path.display(),
            size = %human_readable_size(meta.len()),
            "hashing file"
        );
    }
    hash_reader(file, key).with_context(|| format!("reading {}", path.display()))
}

fn format_line(digest: &[u8], name: &str, quiet: bool) -> String {
    let hex = hex::encode(digest);
    if quiet {
        hex
    } else {
        format!("{}  {}", hex, name)
    }
}

/// Returns false if any input failed.
fn run(cli: &Cli) -> Result<bool> {
    let key = cli.key.as_deref().map(str::as_bytes);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut ok = true;

    for input in cli.inputs() {
        match input.digest(key) {
            Ok(digest) => writeln!(out, "{}", format_line(&digest, &input.name(), cli.quiet))?,
            Err(e) => {
                ok = false;
                tracing::warn!(input = %input.name(), "digest failed");
                out.flush()?;
                eprintln!("fdmd5: {:#}", e);
            }
        }
    }

    out.flush()?;
    Ok(ok)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("fdmd5: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
