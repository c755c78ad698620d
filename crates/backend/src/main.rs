pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-password") {
        let password = args.next().context("usage: backend hash-password <password>")?;
        println!("{}", system::auth::password::hash_password(&password)?);
        return Ok(());
    }

    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let state = system::app_state::AppState::from_config(&config)?;
    let static_dir = shared::config::get_static_dir(&config);
    tracing::info!("Serving UI from {}", static_dir.display());

    let app = system::api::routes::build_router(state, &static_dir);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid server address: {e}"))?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
