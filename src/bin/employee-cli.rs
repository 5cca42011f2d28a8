use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the employee service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        designation: String,
        #[arg(long)]
        salary: f64,
        /// Request a specific id
        #[arg(long)]
        id: Option<i64>,
    },
    /// Fetch one employee
    Get { id: i64 },
    /// List employees a page at a time
    List {
        #[arg(long)]
        page: Option<i64>,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Change fields of an existing employee
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        designation: Option<String>,
        #[arg(long)]
        salary: Option<f64>,
    },
    /// Remove an employee
    Delete { id: i64 },
    /// Check service and store health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Create {
            name,
            designation,
            salary,
            id,
        } => {
            let mut body = json!({ "name": name, "designation": designation, "salary": salary });
            if let Some(id) = id {
                body["id"] = json!(id);
            }
            client.post(format!("{base}/employees")).json(&body).send().await?
        }
        Commands::Get { id } => client.get(format!("{base}/employees/{id}")).send().await?,
        Commands::List { page, limit } => {
            let mut query = Vec::new();
            if let Some(page) = page {
                query.push(("page", page));
            }
            if let Some(limit) = limit {
                query.push(("limit", limit));
            }
            client
                .get(format!("{base}/employeeList"))
                .query(&query)
                .send()
                .await?
        }
        Commands::Update {
            id,
            name,
            designation,
            salary,
        } => {
            let mut body = Map::new();
            if let Some(name) = name {
                body.insert("name".into(), json!(name));
            }
            if let Some(designation) = designation {
                body.insert("designation".into(), json!(designation));
            }
            if let Some(salary) = salary {
                body.insert("salary".into(), json!(salary));
            }
            client
                .put(format!("{base}/employees/{id}"))
                .json(&Value::Object(body))
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(format!("{base}/employees/{id}")).send().await?,
        Commands::Health => client.get(format!("{base}/health")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        eprintln!("Response: {}", text);
        std::process::exit(1);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
