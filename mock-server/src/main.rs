use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var(mock_server::PORT_VAR).ok();
    let addr = mock_server::listen_addr(port.as_deref())?;
    let listener = TcpListener::bind(addr).await?;
    println!("crmsport mock listening on {addr}");
    println!(
        "sign in with {} / {}",
        mock_server::DEMO_EMAIL,
        mock_server::DEMO_PASSWORD
    );
    mock_server::run(listener).await
}
