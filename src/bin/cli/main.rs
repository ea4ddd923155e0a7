use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use reqwest::{
    Client, RequestBuilder, Response,
    multipart::{Form, Part},
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "property-listing-cli")]
#[command(about = "CLI for interacting with the property listing server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "PROPERTY_LISTING_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Agent id sent as x-agent-id
    #[arg(short, long, env = "PROPERTY_LISTING_AGENT_ID")]
    agent: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List properties
    List {
        /// Only the properties of the configured agent, newest first
        #[arg(long)]
        mine: bool,
    },

    /// Show one property
    Get {
        /// Property id
        id: String,
    },

    /// Create a property with 1 to 5 images
    Create(PropertyArgs),

    /// Update a property, replacing its images when any are given
    Update {
        /// Property id
        id: String,
        #[command(flatten)]
        property: PropertyArgs,
    },

    /// Delete a property and its images
    Delete {
        /// Property id
        id: String,
    },

    /// Viewing requests
    #[command(subcommand)]
    Viewing(ViewingCommands),
}

#[derive(Subcommand, Debug)]
enum ViewingCommands {
    /// Ask for a viewing as the configured tenant
    Request {
        /// Property id
        property: String,
        /// RFC 3339 timestamp, e.g. 2026-11-02T10:00:00Z
        #[arg(long)]
        date: DateTime<Utc>,
    },

    /// Ask for a viewing without an account
    Guest {
        /// Property id
        property: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        /// RFC 3339 timestamp
        #[arg(long)]
        date: DateTime<Utc>,
        /// Free text such as "weekday evenings"
        #[arg(long)]
        time: String,
        #[arg(long)]
        message: Option<String>,
    },

    /// List the requests addressed to the configured agent
    List,

    /// Approve, reject or complete a request
    Status {
        /// Viewing request id
        id: String,
        /// pending, approved, rejected or completed
        status: String,
    },
}

#[derive(Args, Debug)]
struct PropertyArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    address: String,
    /// Monthly rent, e.g. 1250.00
    #[arg(long)]
    rent: String,
    #[arg(long, default_value_t = 1)]
    bedrooms: u32,
    #[arg(long, default_value_t = 1)]
    bathrooms: u32,
    /// Image file, repeat for several
    #[arg(long = "image")]
    images: Vec<PathBuf>,
    /// Display order per image, in the same order as --image
    #[arg(long = "order")]
    orders: Vec<i32>,
    /// Zero-based index of the cover image
    #[arg(long, default_value_t = 0)]
    primary: usize,
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

async fn build_form(args: &PropertyArgs) -> Result<Form> {
    let mut form = Form::new()
        .text("title", args.title.clone())
        .text("description", args.description.clone())
        .text("address", args.address.clone())
        .text("rental_amount", args.rent.clone())
        .text("bedrooms", args.bedrooms.to_string())
        .text("bathrooms", args.bathrooms.to_string())
        .text("primary_image_index", args.primary.to_string());

    for order in &args.orders {
        form = form.text("image_orders", order.to_string());
    }

    for path in &args.images {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime_for(path))?;
        form = form.part("images", part);
    }

    Ok(form)
}

struct ApiClient {
    http: Client,
    base_url: String,
    agent: Option<i64>,
}

impl ApiClient {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn with_agent(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let agent = self
            .agent
            .context("An agent id is required (--agent or PROPERTY_LISTING_AGENT_ID)")?;
        Ok(request.header("x-agent-id", agent.to_string()))
    }
}

async fn print_response(response: Response) -> Result<()> {
    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .context("Server returned a non-JSON body")?;

    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        anyhow::bail!("Request failed with status {}", status);
    }
    Ok(())
}

fn viewing_request(client: &ApiClient, command: &ViewingCommands) -> Result<RequestBuilder> {
    let request = match command {
        ViewingCommands::Request { property, date } => client
            .with_agent(client.http.post(client.url("/viewing-requests")))?
            .json(&serde_json::json!({
                "property_id": property,
                "viewing_date": date,
            })),
        ViewingCommands::Guest {
            property,
            name,
            email,
            phone,
            date,
            time,
            message,
        } => client
            .http
            .post(client.url("/viewing-requests/guest"))
            .json(&serde_json::json!({
                "property_id": property,
                "guest_name": name,
                "guest_email": email,
                "guest_phone": phone,
                "preferred_date": date,
                "preferred_time": time,
                "message": message,
            })),
        ViewingCommands::List => {
            client.with_agent(client.http.get(client.url("/viewing-requests/by-agent")))?
        }
        ViewingCommands::Status { id, status } => client
            .with_agent(
                client
                    .http
                    .put(client.url(&format!("/viewing-requests/{}/status", id))),
            )?
            .query(&[("status", status)]),
    };
    Ok(request)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient {
        http: Client::new(),
        base_url: cli.url.clone(),
        agent: cli.agent,
    };

    let request = match &cli.command {
        Commands::Viewing(command) => viewing_request(&client, command)?,
        Commands::List { mine: false } => client.http.get(client.url("/properties")),
        Commands::List { mine: true } => {
            client.with_agent(client.http.get(client.url("/properties/by-agent")))?
        }
        Commands::Get { id } => client.http.get(client.url(&format!("/properties/{}", id))),
        Commands::Create(args) => {
            let form = build_form(args).await?;
            client
                .with_agent(client.http.post(client.url("/properties")))?
                .multipart(form)
        }
        Commands::Update { id, property } => {
            let form = build_form(property).await?;
            client
                .with_agent(client.http.put(client.url(&format!("/properties/{}", id))))?
                .multipart(form)
        }
        Commands::Delete { id } => {
            client.with_agent(client.http.delete(client.url(&format!("/properties/{}", id))))?
        }
    };

    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", cli.url))?;

    print_response(response).await
}
