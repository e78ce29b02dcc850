use clap::Parser;
use serp_tools::Tool;
use serp_tools::checkers::social::Platform;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "serp-tools")]
#[command(about = "SERP preview, SEO and text checks for titles, pages and crawl files")]
#[command(version)]
pub struct Args {
    /// Tool to run
    #[arg(value_enum)]
    pub tool: Tool,

    /// Input file; reads stdin when absent or "-"
    pub input: Option<PathBuf>,

    /// Page URL (canonical, serp-preview)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Focus keyword (meta-title, meta-description, keyword-density)
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Description shown under the title (serp-preview)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Platform whose limits apply (social)
    #[arg(long, value_enum, default_value_t = Platform::Twitter)]
    pub platform: Platform,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File to compare the input against (text-compare)
    #[arg(long)]
    pub compare: Option<PathBuf>,

    /// Crawler name (robots-test)
    #[arg(long, default_value = "*")]
    pub user_agent: String,

    /// URL path to test (robots-test)
    #[arg(long)]
    pub path: Option<String>,

    /// X-Robots-Tag header value (noindex)
    #[arg(long)]
    pub x_robots_tag: Option<String>,

    /// Input is HTML (keyword-density)
    #[arg(long)]
    pub html: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
