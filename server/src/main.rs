use todo_core::TodoService;
use todo_server::{config::Config, logging};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init(config.log_format)?;

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    todo_server::run(listener, TodoService::in_memory()).await?;
    Ok(())
}
