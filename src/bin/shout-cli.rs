use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "shout-cli")]
#[command(about = "Command-line client for the shout relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    /// License key sent in the X-Authorization header
    #[arg(short, long, env = "SHOUT_LICENSE_KEY")]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shout some text through the relay
    Shout {
        /// Text to shout
        text: Vec<String>,
    },
    /// Check the relay is up
    Ping,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Shout { text } => {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            if let Some(key) = &cli.key {
                headers.insert("x-authorization", HeaderValue::from_str(key)?);
            }

            let res = client
                .post(format!("{}/V1/SHOUT", cli.url))
                .headers(headers)
                .body(serde_json::to_vec(&json!({ "INPUT": text.join(" ") }))?)
                .send()
                .await?;
            print_shout(res).await?;
        }
        Commands::Ping => {
            let res = client.get(format!("{}/PING", cli.url)).send().await?;
            let status = res.status();
            println!("{} {}", status, res.text().await?);
        }
    }

    Ok(())
}

async fn print_shout(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    match json.get("OUTPUT").and_then(Value::as_str) {
        Some(output) => println!("{}", output),
        None => println!("{}", serde_json::to_string_pretty(&json)?),
    }
    Ok(())
}
