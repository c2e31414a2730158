use clap::Parser;

pub const DEFAULT_ENDPOINT: &str = "https://httpbin.org/post";

#[derive(Parser, Debug, Clone)]
#[command(name = "multi_uploader")]
#[command(about = "Pick files and upload them as multipart form data", long_about = None)]
pub struct Config {
    /// URL every file is POSTed to
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}
