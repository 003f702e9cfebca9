//! Ephemeral anonymous group-chat relay server.
//!
//! Creates rooms over HTTP and relays chat messages and typing signals
//! between WebSocket connections in the same room. All state is in memory
//! and rooms vanish when the last participant leaves.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin utakata-server
//! cargo run --bin utakata-server -- --host 0.0.0.0 --port 3000
//! cargo run --bin utakata-server -- --allowed-origins https://example.com,https://chat.example.com
//! ```

use std::sync::Arc;

use clap::Parser;
use utakata::{
    common::{logger::setup_logger, time::SystemClock},
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryRoomRegistry},
    ui::Server,
    usecase::{
        CreateRoomUseCase, GetRoomInfoUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        NotifyTypingUseCase, SendMessageUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Ephemeral anonymous chat relay server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Comma-separated CORS origins ("*" allows any origin)
    #[arg(long, default_value = "*", value_delimiter = ',')]
    allowed_origins: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. MessagePusher
    // 2. Registry
    // 3. Clock
    // 4. UseCases
    // 5. Server

    // 1. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 2. Create Registry (in-memory room store)
    let registry = Arc::new(InMemoryRoomRegistry::new(message_pusher.clone()));

    // 3. Create Clock
    let clock = Arc::new(SystemClock);

    // 4. Create UseCases
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(registry.clone(), clock.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone(), clock.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(registry.clone(), clock.clone()));
    let notify_typing_usecase = Arc::new(NotifyTypingUseCase::new(registry.clone()));
    let get_room_info_usecase = Arc::new(GetRoomInfoUseCase::new(registry.clone()));

    // 5. Create and run the server
    let server = Server::new(
        create_room_usecase,
        join_room_usecase,
        leave_room_usecase,
        send_message_usecase,
        notify_typing_usecase,
        get_room_info_usecase,
    );
    if let Err(e) = server.run(args.host, args.port, args.allowed_origins).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
