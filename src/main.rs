use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use warden::config::Config;
use warden::router::RouterBuilder;
use warden::{Server, logging};

/// Demo server exercising routes, groups, mounts and static files.
#[derive(Parser, Debug)]
#[command(name = "warden", version)]
struct Cli {
    /// YAML config file (falls back to $WARDEN_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    listen: Option<String>,

    /// Enable debug logging and route-match tracing
    #[arg(long)]
    debug: bool,
}

#[derive(Serialize)]
struct Product {
    id: u32,
    name: String,
    price: f64,
}

#[derive(Serialize)]
struct User {
    id: u32,
    name: &'static str,
}

#[derive(Serialize)]
struct Message {
    title: &'static str,
    message: &'static str,
}

const INFO_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Warden Info</title></head>
<body>
  <h1>Warden Info</h1>
  <ul>
    <li><a href="/">GET /</a> - Welcome message</li>
    <li><a href="/hello">GET /hello</a> - HTML greeting</li>
    <li><a href="/status">GET /status</a> - Server status (JSON)</li>
    <li><a href="/product/1">GET /product/1</a> - Example product (JSON)</li>
    <li><a href="/json">GET /json</a> - 15 products (JSON)</li>
    <li><a href="/api/users/list">GET /api/users/list</a> - Users (JSON)</li>
    <li><a href="/api/users/profile">GET /api/users/profile</a> - Profile (JSON)</li>
    <li><a href="/static/">/static/</a> - Files from ./public</li>
  </ul>
</body>
</html>
"#;

fn user_api() -> RouterBuilder {
    let mut users = RouterBuilder::new();

    users.get("/list", |_req, res| {
        let users = [
            User { id: 1, name: "Alice" },
            User { id: 2, name: "Bob" },
            User { id: 3, name: "Charlie" },
        ];
        res.json(&users);
        Ok(())
    });

    users.get("/profile", |_req, res| {
        res.json(&Message {
            title: "User Profile",
            message: "User profile details from the mounted router.",
        });
        Ok(())
    });

    users
}

fn app(cfg: &Config) -> RouterBuilder {
    let mut app = RouterBuilder::with_logging(&cfg.logging);

    app.get("/", |_req, res| {
        res.text("Welcome to Warden!");
        Ok(())
    });

    app.get("/hello", |_req, res| {
        res.html("<h1>Hello, Warden!</h1><p>This is an HTML response from the /hello route.</p>");
        Ok(())
    });

    app.get("/status", |_req, res| {
        res.json(&Message {
            title: "Server Status",
            message: "Warden is operational and ready!",
        });
        Ok(())
    });

    app.get("/product/1", |_req, res| {
        res.json(&Product {
            id: 101,
            name: "Example Gadget".to_string(),
            price: 19.99,
        });
        Ok(())
    });

    app.get("/info", |_req, res| {
        res.html(INFO_PAGE);
        Ok(())
    });

    app.get("/json", |_req, res| {
        let products: Vec<Product> = (1..=15)
            .map(|id| Product {
                id,
                name: format!("Product {id}"),
                price: f64::from((id * 37) % 100) + 0.99,
            })
            .collect();
        res.json(&products);
        Ok(())
    });

    app.mount("/api/users", &user_api());
    app.serve_static("/static", "./public");

    for mount in &cfg.static_files {
        app.serve_static(&mount.prefix, mount.root.clone());
    }

    app
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => {
            let mut cfg = Config::from_file(path)?;
            cfg.apply_env();
            cfg
        }
        None => Config::load()?,
    };
    if let Some(listen) = cli.listen {
        cfg.server.listen_addr = listen;
    }
    if cli.debug {
        cfg.logging.debug = true;
    }

    logging::init(&cfg.logging)?;
    if cfg.logging.debug {
        tracing::info!("Debug logging enabled.");
    }

    let server = Server::new(cfg.server.clone(), app(&cfg).build());

    tokio::select! {
        res = server.run() => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
