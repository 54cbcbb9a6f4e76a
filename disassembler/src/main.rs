mod config;
mod summary;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use tcod_nls::{Decoder, Encoding};
use tcod_script::Script;

use crate::config::DisasmConfig;
use crate::summary::ScriptSummary;

/// Disassemble TCOD script containers into text listings
#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script files to disassemble
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text encoding of names and strings (sjis, utf8, gbk)
    #[arg(short, long)]
    lang: Option<Encoding>,

    /// Also write a YAML summary next to each listing
    #[arg(long)]
    yaml: bool,

    /// Write outputs here instead of next to each input
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

fn output_path(input: &Path, out_dir: Option<&Path>, extension: &str) -> PathBuf {
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(extension);
    dir.join(name)
}

struct Disassembler {
    config: DisasmConfig,
    out_dir: Option<PathBuf>,
}

impl Disassembler {
    fn disassemble_file(&self, input: &Path) -> Result<()> {
        let script = Script::open(input, Decoder::new(self.config.encoding))?;

        let listing_path = output_path(input, self.out_dir.as_deref(), &self.config.output_extension);
        let mut writer = BufWriter::new(
            File::create(&listing_path).with_context(|| format!("creating {}", listing_path.display()))?,
        );
        script.render(&mut writer)?;
        writer.flush()?;
        log::info!(
            "{} -> {} ({} instructions, {} diagnostics)",
            input.display(),
            listing_path.display(),
            script.instructions().len(),
            script.diagnostics().count()
        );

        if self.config.emit_yaml {
            let yaml_path = output_path(input, self.out_dir.as_deref(), "yaml");
            let mut writer = File::create(&yaml_path).with_context(|| format!("creating {}", yaml_path.display()))?;
            serde_yaml::to_writer(&mut writer, &ScriptSummary::new(&script))?;
            log::info!("{} -> {}", input.display(), yaml_path.display());
        }

        Ok(())
    }

    /// Process every file, continuing past failures. Returns the failed inputs.
    fn run(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        let mut failed = Vec::new();
        for input in files {
            if let Err(e) = self.disassemble_file(input) {
                log::error!("{}: {:#}", input.display(), e);
                failed.push(input.clone());
            }
        }
        failed
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DisasmConfig::load(path)?,
        None => DisasmConfig::default(),
    };
    if let Some(lang) = args.lang {
        config.encoding = lang;
    }
    config.emit_yaml |= args.yaml;

    env_logger::Builder::new()
        .filter_level(config.logger_config.level_filter)
        .parse_default_env()
        .init();

    if let Some(dir) = &args.out_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let disassembler = Disassembler { config, out_dir: args.out_dir };
    let failed = disassembler.run(&args.files);
    if !failed.is_empty() {
        bail!("{} of {} files failed", failed.len(), args.files.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_next_to_input() {
        let path = output_path(Path::new("scripts/M2_guild_1F.scd"), None, "txt");
        assert_eq!(path, PathBuf::from("scripts/M2_guild_1F.txt"));
    }

    #[test]
    fn output_in_out_dir() {
        let path = output_path(Path::new("scripts/common.scd"), Some(Path::new("out")), "yaml");
        assert_eq!(path, PathBuf::from("out/common.yaml"));
    }

    #[test]
    fn batch_continues_past_failures() {
        let dir = std::env::temp_dir().join(format!("tcod-disasm-batch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let bad = dir.join("bad.scd");
        std::fs::write(&bad, b"TCO").unwrap();
        let missing = dir.join("missing.scd");

        let disassembler = Disassembler { config: DisasmConfig::default(), out_dir: None };
        let failed = disassembler.run(&[bad.clone(), missing.clone()]);
        assert_eq!(failed, vec![bad, missing]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
