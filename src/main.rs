use std::path::PathBuf;
use std::time::Duration;

use rawhttp::config::Config;
use rawhttp::http::router::Router;
use rawhttp::server;

fn routes() -> Router {
    let mut router = Router::new();

    router.register("GET", "/1", |_req, res| {
        res.set_body("Hello World");
    });

    for path in ["/2", "/1/2"] {
        router.register("GET", path, |_req, res| {
            // only Content-Length is reserved
            let _ = res.add_header("Connection", "close");
            res.set_body("test");
            std::thread::sleep(Duration::from_secs(10));
        });
    }

    router
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = Config::load(config_path.as_deref())?;

    let router = routes();
    for route in router.routes() {
        tracing::info!(method = %route.method, path = %route.path, "Registered route");
    }

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
