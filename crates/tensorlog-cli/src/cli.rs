use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tensorlog::types::ByteOrder;

#[derive(Parser, Debug)]
#[command(name = "tensorlog-dump", version, about = "Print the observations in a tensor log")]
pub struct Cli {
    /// Path to the log file
    pub path: PathBuf,

    /// Expect a fresh header before every observation
    #[arg(long)]
    pub multi_section: bool,

    /// Byte order of tensor payloads
    #[arg(long, value_enum, default_value_t = OrderArg::Little)]
    pub byte_order: OrderArg,

    /// Stop after this many observations
    #[arg(long)]
    pub limit: Option<usize>,

    /// Log level (RUST_LOG syntax)
    #[arg(long, default_value = "warn")]
    pub log: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrderArg {
    Little,
    Big,
    Native,
}

impl From<OrderArg> for ByteOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Little => ByteOrder::Little,
            OrderArg::Big => ByteOrder::Big,
            OrderArg::Native => ByteOrder::Native,
        }
    }
}
