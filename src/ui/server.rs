//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{
    CreateRoomUseCase, GetRoomInfoUseCase, JoinRoomUseCase, LeaveRoomUseCase, NotifyTypingUseCase,
    SendMessageUseCase,
};

use super::{
    handler::{create_room, get_room_info, health_check, service_info, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Ephemeral chat relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     create_room_usecase,
///     join_room_usecase,
///     leave_room_usecase,
///     send_message_usecase,
///     notify_typing_usecase,
///     get_room_info_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080, vec!["*".to_string()]).await?;
/// ```
pub struct Server {
    /// CreateRoomUseCase（ルーム作成のユースケース）
    create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    send_message_usecase: Arc<SendMessageUseCase>,
    /// NotifyTypingUseCase（タイピング状態通知のユースケース）
    notify_typing_usecase: Arc<NotifyTypingUseCase>,
    /// GetRoomInfoUseCase（ルーム情報取得のユースケース）
    get_room_info_usecase: Arc<GetRoomInfoUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `create_room_usecase` - UseCase for room creation
    /// * `join_room_usecase` - UseCase for joining a room
    /// * `leave_room_usecase` - UseCase for leaving a room
    /// * `send_message_usecase` - UseCase for message sending
    /// * `notify_typing_usecase` - UseCase for typing notification
    /// * `get_room_info_usecase` - UseCase for room info lookup
    pub fn new(
        create_room_usecase: Arc<CreateRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        notify_typing_usecase: Arc<NotifyTypingUseCase>,
        get_room_info_usecase: Arc<GetRoomInfoUseCase>,
    ) -> Self {
        Self {
            create_room_usecase,
            join_room_usecase,
            leave_room_usecase,
            send_message_usecase,
            notify_typing_usecase,
            get_room_info_usecase,
        }
    }

    /// Build the router with all routes and middleware.
    ///
    /// Exposed separately from `run` so integration tests can serve the app
    /// on an ephemeral port.
    pub fn router(self, allowed_origins: &[String]) -> Router {
        let app_state = Arc::new(AppState {
            create_room_usecase: self.create_room_usecase,
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            send_message_usecase: self.send_message_usecase,
            notify_typing_usecase: self.notify_typing_usecase,
            get_room_info_usecase: self.get_room_info_usecase,
        });

        // Define handlers
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{room_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(service_info))
            .route("/health", get(health_check))
            .route("/create-room", post(create_room))
            .route("/room/{room_id}", get(get_room_info))
            .with_state(app_state)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(allowed_origins))
    }

    /// Run the chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    /// * `allowed_origins` - CORS origins; `"*"` allows any origin
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
        allowed_origins: Vec<String>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router(&allowed_origins);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Chat relay server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws/{{room_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Build the CORS layer from the configured origins.
///
/// ワイルドカード指定時は credentials を許可できない（tower-http が
/// Any と credentials の併用を拒否するため）。
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
