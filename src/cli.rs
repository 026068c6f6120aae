//! Command-line arguments for the terminal host.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::engine::EngineConfig;
use crate::types::TetrominoKind;

pub const USAGE: &str = "\
usage: blockfall [OPTIONS]

  --cols N          board width in cells (default 10)
  --rows N          board height in cells (default 20)
  --speed N         drop speed, 0..=1000 (default 50)
  --seed N          fixed piece sequence
  --pieces LIST     comma-separated piece tags spawned first, e.g. I,O,T
  --log-file PATH   write tracing output to PATH
  --dump-final      print the final snapshot as JSON on exit
  -h, --help        show this help";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostArgs {
    pub config: EngineConfig,
    pub presets: Vec<TetrominoKind>,
    pub log_file: Option<PathBuf>,
    pub dump_final: bool,
    pub help: bool,
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<HostArgs> {
    let mut parsed = HostArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .ok_or_else(|| anyhow!("missing value for {}", flag))
        };
        match arg.as_str() {
            "--cols" => parsed.config.cols = parse_num(arg, value(arg)?)?,
            "--rows" => parsed.config.rows = parse_num(arg, value(arg)?)?,
            "--speed" => parsed.config.drop_speed = parse_num(arg, value(arg)?)?,
            "--seed" => parsed.config.seed = Some(parse_num(arg, value(arg)?)?),
            "--pieces" => parsed.presets = parse_pieces(value(arg)?)?,
            "--log-file" => parsed.log_file = Some(PathBuf::from(value(arg)?)),
            "--dump-final" => parsed.dump_final = true,
            "-h" | "--help" => parsed.help = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
    }

    Ok(parsed)
}

fn parse_num<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, value))
}

fn parse_pieces(list: &str) -> Result<Vec<TetrominoKind>> {
    list.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| TetrominoKind::from_str(tag).ok_or_else(|| anyhow!("unknown piece: {}", tag)))
        .collect()
}
