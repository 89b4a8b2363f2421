use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "task-cli")]
#[command(about = "Management CLI for the task API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks, optionally filtered by a search term
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Create a new task
    Create { title: String, description: String },
    /// Update a task's title and/or description
    Update {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a task
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::List { search } => {
            let mut request = client.get(format!("{}/tasks", cli.url));
            if let Some(term) = search {
                request = request.query(&[("search", term)]);
            }
            let res = request.send().await?;
            let tasks: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        Commands::Create { title, description } => {
            let res = client
                .post(format!("{}/tasks", cli.url))
                .json(&serde_json::json!({ "title": title, "description": description }))
                .send()
                .await?;
            print_outcome(res).await?;
        }
        Commands::Update {
            id,
            title,
            description,
        } => {
            let mut body = serde_json::Map::new();
            if let Some(title) = title {
                body.insert("title".to_string(), Value::String(title));
            }
            if let Some(description) = description {
                body.insert("description".to_string(), Value::String(description));
            }
            let res = client
                .put(format!("{}/tasks/{}", cli.url, id))
                .json(&Value::Object(body))
                .send()
                .await?;
            print_outcome(res).await?;
        }
        Commands::Delete { id } => {
            let res = client
                .delete(format!("{}/tasks/{}", cli.url, id))
                .send()
                .await?;
            print_outcome(res).await?;
        }
    }

    Ok(())
}

async fn print_outcome(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body = res.text().await?;
    if body.is_empty() {
        println!("{}", status);
    } else {
        println!("{} {}", status, body);
    }
    Ok(())
}
