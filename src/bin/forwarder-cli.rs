use std::path::PathBuf;
use std::process::ExitCode;

use base64::{engine::general_purpose, Engine as _};
use clap::{Parser, Subcommand};
use serde_json::Value;

use docuware_forwarder::http::{HEALTH_PATH, UPLOAD_PATH};
use docuware_forwarder::upload::{MemberMetadata, UploadRequest};

#[derive(Parser)]
#[command(name = "forwarder-cli")]
#[command(about = "Submit documents to a running DocuWare forwarder", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:4000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check forwarder status
    Health,
    /// Upload a document (or a metadata-only record when --file is omitted)
    Upload(UploadArgs),
}

#[derive(clap::Args)]
struct UploadArgs {
    /// Document to attach; sent base64-encoded
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[arg(long)]
    cabinet: String,

    #[arg(long)]
    organization: String,

    #[arg(long)]
    member_id: String,

    #[arg(long)]
    member_name: String,

    #[arg(long)]
    passport_number: Option<String>,

    #[arg(long)]
    id_number: Option<String>,

    #[arg(long)]
    branch: Option<String>,

    #[arg(long, env = "DOCUWARE_USERNAME")]
    username: String,

    #[arg(long, env = "DOCUWARE_PASSWORD", hide_env_values = true)]
    password: String,
}

impl UploadArgs {
    fn into_request(self) -> Result<UploadRequest, std::io::Error> {
        let document_base64 = match &self.file {
            Some(path) => Some(general_purpose::STANDARD.encode(std::fs::read(path)?)),
            None => None,
        };

        Ok(UploadRequest {
            file_cabinet_id: Some(self.cabinet),
            organization_id: Some(self.organization),
            username: Some(self.username),
            password: Some(self.password),
            metadata: Some(MemberMetadata {
                member_id: Some(self.member_id),
                member_name: Some(self.member_name),
                passport_number: self.passport_number,
                id_number: self.id_number,
                branch: self.branch,
            }),
            document_base64,
        })
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}{}", base, HEALTH_PATH)).send().await?,
        Commands::Upload(args) => {
            let request = args.into_request()?;
            client
                .post(format!("{}{}", base, UPLOAD_PATH))
                .json(&request)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if !status.is_success() {
        eprintln!("Error: forwarder returned status {}", status);
        eprintln!("{}", rendered);
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", rendered);
    Ok(ExitCode::SUCCESS)
}
