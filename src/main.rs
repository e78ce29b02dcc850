use clap::Parser;
use serp_tools::tools::succeeded;
use serp_tools::{ToolConfig, ToolError, ToolRequest};
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

mod args;
use args::Args;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            ::log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the selected tool and print its envelope; `Ok(false)` when the tool
/// reported a failure
fn run(args: &Args) -> Result<bool, ToolError> {
    let config = match &args.config {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            ToolConfig::from_file(path)?
        }
        None => ToolConfig::default(),
    };

    let request = ToolRequest {
        input: read_input(args.input.as_deref())?,
        url: args.url.clone(),
        keyword: args.keyword.clone(),
        description: args.description.clone(),
        platform: args.platform,
        compare: args
            .compare
            .as_deref()
            .map(std::fs::read_to_string)
            .transpose()?,
        user_agent: Some(args.user_agent.clone()),
        path: args.path.clone(),
        x_robots_tag: args.x_robots_tag.clone(),
        is_html: args.html,
    };

    let value = args.tool.run(&request, &config);
    let output = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{}", output);

    Ok(succeeded(&value))
}

fn read_input(path: Option<&Path>) -> Result<String, ToolError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
