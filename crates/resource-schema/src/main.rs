use clap::Parser;
use resource_schema::commands::{self, GenerateArgs};
use resource_schema::config::ResourceSchemaConfig;
use tracing_subscriber::EnvFilter;

/// Convert generated OpenAPI definitions into one JSON Schema file per resource kind.
#[derive(Parser)]
#[command(name = "resource-schema", version, about)]
struct Cli {
    /// Print the config file's JSON Schema and exit
    #[arg(long)]
    schema: bool,

    #[command(flatten)]
    generate: GenerateArgs,
}

/// Print the JSON Schema of config.toml.
fn print_config_schema() {
    let response = serde_json::json!({
        "config_path": ".resource-schema/config.toml",
        "format": "toml",
        "schema": schemars::schema_for!(ResourceSchemaConfig)
    });
    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize config schema: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.schema {
        print_config_schema();
        return;
    }

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to read working directory: {}", e);
            std::process::exit(1);
        }
    };

    let code = commands::run(cli.generate, &root);
    if code != 0 {
        std::process::exit(code);
    }
}
