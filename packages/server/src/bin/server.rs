//! Presence and messaging gateway server.
//!
//! Accepts token-authenticated WebSocket connections, keeps a live roster of
//! connected clients, and broadcasts chat messages to all of them.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin hiroba-server -- --users ./users.json
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    infrastructure::{
        auth::{InMemoryUserDirectory, JwtTokenVerifier},
        registry::InMemoryConnectionRegistry,
    },
    ui::GatewayServer,
    usecase::{
        AuthenticateClientUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        GetGatewayStateUseCase, GetPresenceUseCase, IssueTokenUseCase, SendMessageUseCase,
    },
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

/// Fallback secret for local development when neither `--jwt-secret` nor
/// the `JWT_SECRET` environment variable is set.
const DEV_JWT_SECRET: &str = "hiroba-dev-secret";

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Presence and messaging gateway with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Secret used to sign and verify session tokens
    /// (falls back to the JWT_SECRET environment variable)
    #[arg(long)]
    jwt_secret: Option<String>,

    /// Lifetime of issued session tokens, in seconds
    #[arg(long, default_value = "7200")]
    token_ttl_secs: i64,

    /// Path to a JSON user seed file (built-in demo users when omitted)
    #[arg(long)]
    users: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Token service (JWT verifier / issuer)
    // 2. UserDirectory
    // 3. ConnectionRegistry
    // 4. UseCases
    // 5. Server

    // 1. Create the token service (signs debug tokens, verifies handshakes)
    let jwt_secret = args
        .jwt_secret
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .unwrap_or_else(|| {
            tracing::warn!("No JWT secret configured, using built-in development secret");
            DEV_JWT_SECRET.to_string()
        });
    let token_service = Arc::new(JwtTokenVerifier::new(
        &jwt_secret,
        args.token_ttl_secs,
        Arc::new(SystemClock),
    ));

    // 2. Create the UserDirectory (seed file or built-in demo users)
    let user_directory = match &args.users {
        Some(path) => match InMemoryUserDirectory::from_seed_file(path) {
            Ok(directory) => {
                tracing::info!("Loaded {} users from {}", directory.len(), path.display());
                Arc::new(directory)
            }
            Err(e) => {
                tracing::error!("Failed to load user seed file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let directory = InMemoryUserDirectory::with_demo_users();
            tracing::info!("Using {} built-in demo users", directory.len());
            Arc::new(directory)
        }
    };

    // 3. Create the ConnectionRegistry (in-memory database)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 4. Create UseCases
    let authenticate_client_usecase = Arc::new(AuthenticateClientUseCase::new(
        token_service.clone(),
        user_directory.clone(),
    ));
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(registry.clone()));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(registry.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(registry.clone()));
    let get_gateway_state_usecase = Arc::new(GetGatewayStateUseCase::new(registry.clone()));
    let get_presence_usecase = Arc::new(GetPresenceUseCase::new(registry.clone()));
    let issue_token_usecase = Arc::new(IssueTokenUseCase::new(
        user_directory.clone(),
        token_service.clone(),
    ));

    // 5. Create and run the server
    let server = GatewayServer::new(
        authenticate_client_usecase,
        connect_client_usecase,
        disconnect_client_usecase,
        send_message_usecase,
        get_gateway_state_usecase,
        get_presence_usecase,
        issue_token_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
