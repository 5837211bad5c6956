//! Inbound HTTP surface of the player.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | redirect to `/ui` |
//! | GET | `/ui` | HTML board |
//! | GET | `/map` | game state as JSON |
//! | POST | `/map` | game start |
//! | DELETE | `/map` | game end |
//! | any | `/map/{id}` | move request |

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{any, get};
use island_core::{Direction, GameState};
use island_mediator::{MediatorClient, MoveVerdict};
use tokio_util::sync::CancellationToken;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, TraceLayer};
use tracing::{Level, debug, info, warn};

use crate::identity::PlayerIdentity;
use crate::strategy::{MoveStrategy, StrategyContext};
use crate::ui;

/// What became of one move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The state could not be fetched; nothing was decided or submitted.
    Skipped,
    /// The move reached the mediator.
    Submitted {
        /// Direction sent.
        direction: Direction,
        /// Mediator's answer.
        verdict: MoveVerdict,
    },
    /// Submitting the move failed.
    SubmitFailed {
        /// Direction that could not be sent.
        direction: Direction,
    },
}

/// Shared state of every request handler.
pub struct AgentContext {
    identity: Arc<PlayerIdentity>,
    mediator: MediatorClient,
    strategy: Arc<dyn MoveStrategy>,
    manual_exit: bool,
    stop: CancellationToken,
}

impl AgentContext {
    /// `stop` is cancelled on game end unless `manual_exit` is set.
    pub fn new(
        identity: Arc<PlayerIdentity>,
        mediator: MediatorClient,
        strategy: Arc<dyn MoveStrategy>,
        manual_exit: bool,
        stop: CancellationToken,
    ) -> Self {
        Self {
            identity,
            mediator,
            strategy,
            manual_exit,
            stop,
        }
    }

    /// The player's identity.
    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    /// Fetch the state, decide and submit a move for `request_id`.
    ///
    /// Never fails: every problem is logged and reflected in the outcome.
    pub async fn play_move(&self, request_id: &str) -> MoveOutcome {
        let state = match self.mediator.fetch_state().await {
            Ok(state) => state,
            Err(e) => {
                warn!(request_id, error = %e, kind = e.error_kind(), "cannot fetch game state, skipping move");
                return MoveOutcome::Skipped;
            }
        };

        let direction = self.decide(state).await;
        match self.mediator.submit_move(request_id, direction).await {
            Ok(verdict) => {
                if verdict.is_accepted() {
                    info!(request_id, %direction, "move accepted");
                } else {
                    warn!(request_id, %direction, "move refused");
                }
                MoveOutcome::Submitted { direction, verdict }
            }
            Err(e) => {
                warn!(request_id, %direction, error = %e, kind = e.error_kind(), "cannot submit move");
                MoveOutcome::SubmitFailed { direction }
            }
        }
    }

    /// Handle the game-end signal. Returns whether shutdown was requested.
    pub fn end_game(&self) -> bool {
        if self.manual_exit {
            debug!("game ended, staying up (manual exit)");
            return false;
        }
        info!("game ended, shutting down");
        self.stop.cancel();
        true
    }

    async fn decide(&self, state: GameState) -> Direction {
        let ctx = StrategyContext::new(state, self.identity.player_id());
        let strategy = Arc::clone(&self.strategy);
        match tokio::task::spawn_blocking(move || strategy.decide(&ctx)).await {
            Ok(Ok(direction)) => direction,
            Ok(Err(e)) => {
                warn!(strategy = self.strategy.name(), error = %e, "strategy failed, standing still");
                Direction::None
            }
            Err(e) => {
                warn!(strategy = self.strategy.name(), error = %e, "strategy task failed, standing still");
                Direction::None
            }
        }
    }
}

/// Build the router with all routes and request tracing.
pub fn build_router(ctx: Arc<AgentContext>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/ui", get(board))
        .route("/map", get(game_state).post(game_start).delete(game_end))
        .route("/map/{id}", any(move_request))
        .with_state(ctx)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO)),
        )
}

async fn root() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/ui")])
}

async fn board(State(ctx): State<Arc<AgentContext>>) -> Response {
    match ctx.mediator.fetch_state().await {
        Ok(state) => Html(ui::render_board(&state, &ctx.identity)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

async fn game_state(State(ctx): State<Arc<AgentContext>>) -> Response {
    match ctx.mediator.fetch_state().await {
        Ok(state) => Json(state).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn game_start() -> StatusCode {
    info!("game started");
    StatusCode::OK
}

async fn game_end(State(ctx): State<Arc<AgentContext>>) -> StatusCode {
    let _ = ctx.end_game();
    StatusCode::OK
}

async fn move_request(State(ctx): State<Arc<AgentContext>>, Path(id): Path<String>) -> StatusCode {
    let outcome = ctx.play_move(&id).await;
    debug!(request_id = %id, ?outcome, "move request handled");
    StatusCode::OK
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use island_core::PlayerId;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::strategy::{StandStill, StrategyError};

    struct GoNorth;

    impl MoveStrategy for GoNorth {
        fn name(&self) -> &str {
            "go-north"
        }

        fn decide(&self, ctx: &StrategyContext) -> Result<Direction, StrategyError> {
            match ctx.player_id() {
                Some(_) => Ok(Direction::North),
                None => Err(StrategyError::NotRegistered),
            }
        }
    }

    struct NoPath;

    impl MoveStrategy for NoPath {
        fn name(&self) -> &str {
            "no-path"
        }

        fn decide(&self, _ctx: &StrategyContext) -> Result<Direction, StrategyError> {
            Err(StrategyError::NoPath)
        }
    }

    struct Panics;

    impl MoveStrategy for Panics {
        fn name(&self) -> &str {
            "panics"
        }

        fn decide(&self, _ctx: &StrategyContext) -> Result<Direction, StrategyError> {
            panic!("boom")
        }
    }

    fn state_body() -> Value {
        json!({
            "map": [[2, 1, 7], [0, 0, 2]],
            "gamers": [{"id": 7, "name": "koalas", "score": 3, "color": "red"}]
        })
    }

    fn context(server: &MockServer, strategy: Arc<dyn MoveStrategy>, manual_exit: bool) -> Arc<AgentContext> {
        let identity = PlayerIdentity::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9000, "koalas");
        let _ = identity.assign_player_id(PlayerId::new(7));
        Arc::new(AgentContext::new(
            Arc::new(identity),
            MediatorClient::new(server.uri()).unwrap(),
            strategy,
            manual_exit,
            CancellationToken::new(),
        ))
    }

    async fn mount_state(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/map"))
            .respond_with(ResponseTemplate::new(200).set_body_json(state_body()))
            .mount(server)
            .await;
    }

    async fn send(router: Router, method: &str, uri: &str) -> Response {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        router.oneshot(req).await.unwrap()
    }

    async fn body_text(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ── Pages and game signals ──

    #[tokio::test]
    async fn root_redirects_to_ui() {
        let server = MockServer::start().await;
        let resp = send(build_router(context(&server, Arc::new(StandStill), false)), "GET", "/").await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[header::LOCATION], "/ui");
    }

    #[tokio::test]
    async fn ui_renders_board() {
        let server = MockServer::start().await;
        mount_state(&server).await;
        let resp = send(build_router(context(&server, Arc::new(StandStill), false)), "GET", "/ui").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("<td class=\"player me\">7</td>"));
    }

    #[tokio::test]
    async fn ui_reports_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/map"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let resp = send(build_router(context(&server, Arc::new(StandStill), false)), "GET", "/ui").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(resp).await.contains("503"));
    }

    #[tokio::test]
    async fn map_returns_state_with_extra_fields() {
        let server = MockServer::start().await;
        mount_state(&server).await;
        let resp = send(build_router(context(&server, Arc::new(StandStill), false)), "GET", "/map").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(body, state_body());
    }

    #[tokio::test]
    async fn map_fetch_failure_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/map"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let resp = send(build_router(context(&server, Arc::new(StandStill), false)), "GET", "/map").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert!(body["error"].as_str().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn game_start_is_acknowledged() {
        let server = MockServer::start().await;
        let resp = send(build_router(context(&server, Arc::new(StandStill), false)), "POST", "/map").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn game_end_cancels_unless_manual_exit() {
        let server = MockServer::start().await;
        let ctx = context(&server, Arc::new(StandStill), false);
        let resp = send(build_router(Arc::clone(&ctx)), "DELETE", "/map").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(ctx.stop.is_cancelled());

        let manual = context(&server, Arc::new(StandStill), true);
        let resp = send(build_router(Arc::clone(&manual)), "DELETE", "/map").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!manual.stop.is_cancelled());
    }

    // ── Move requests ──

    #[tokio::test]
    async fn move_request_submits_decision() {
        let server = MockServer::start().await;
        mount_state(&server).await;
        Mock::given(method("POST"))
            .and(path("/map"))
            .and(header("uuid", "req-1"))
            .and(body_json(json!({"move": "N"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        let resp = send(build_router(context(&server, Arc::new(GoNorth), false)), "PUT", "/map/req-1").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn refused_move_is_not_an_error() {
        let server = MockServer::start().await;
        mount_state(&server).await;
        Mock::given(method("POST"))
            .and(path("/map"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;
        let ctx = context(&server, Arc::new(GoNorth), false);
        assert_eq!(
            ctx.play_move("req-2").await,
            MoveOutcome::Submitted {
                direction: Direction::North,
                verdict: MoveVerdict::Refused,
            }
        );
    }

    #[tokio::test]
    async fn fetch_failure_skips_move() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/map"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/map"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let ctx = context(&server, Arc::new(GoNorth), false);
        assert_eq!(ctx.play_move("req-3").await, MoveOutcome::Skipped);
        let resp = send(build_router(ctx), "GET", "/map/req-3").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unreachable_mediator_skips_move() {
        let identity = PlayerIdentity::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9000, "koalas");
        let ctx = Arc::new(AgentContext::new(
            Arc::new(identity),
            MediatorClient::new("http://127.0.0.1:1").unwrap(),
            Arc::new(GoNorth),
            false,
            CancellationToken::new(),
        ));
        assert_eq!(ctx.play_move("req-6").await, MoveOutcome::Skipped);
        let resp = send(build_router(ctx), "POST", "/map/req-6").await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // ── Strategy fallbacks ──

    #[tokio::test]
    async fn failing_strategy_falls_back_to_none() {
        let server = MockServer::start().await;
        mount_state(&server).await;
        Mock::given(method("POST"))
            .and(path("/map"))
            .and(header("uuid", "req-7"))
            .and(body_json(json!({"move": "O"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        let ctx = context(&server, Arc::new(NoPath), false);
        assert_eq!(
            ctx.play_move("req-7").await,
            MoveOutcome::Submitted {
                direction: Direction::None,
                verdict: MoveVerdict::Accepted,
            }
        );
    }

    #[tokio::test]
    async fn unregistered_strategy_error_falls_back_to_none() {
        let server = MockServer::start().await;
        mount_state(&server).await;
        Mock::given(method("POST"))
            .and(path("/map"))
            .and(body_json(json!({"move": "O"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        let identity = PlayerIdentity::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9000, "koalas");
        let ctx = AgentContext::new(
            Arc::new(identity),
            MediatorClient::new(server.uri()).unwrap(),
            Arc::new(GoNorth),
            false,
            CancellationToken::new(),
        );
        assert_eq!(
            ctx.play_move("req-8").await,
            MoveOutcome::Submitted {
                direction: Direction::None,
                verdict: MoveVerdict::Accepted,
            }
        );
    }

    #[tokio::test]
    async fn panicking_strategy_falls_back_to_none() {
        let server = MockServer::start().await;
        mount_state(&server).await;
        Mock::given(method("POST"))
            .and(path("/map"))
            .and(body_json(json!({"move": "O"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        let ctx = context(&server, Arc::new(Panics), false);
        assert_eq!(
            ctx.play_move("req-4").await,
            MoveOutcome::Submitted {
                direction: Direction::None,
                verdict: MoveVerdict::Accepted,
            }
        );
    }

    #[tokio::test]
    async fn submit_failure_is_reported() {
        let server = MockServer::start().await;
        mount_state(&server).await;
        Mock::given(method("POST"))
            .and(path("/map"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;
        let ctx = context(&server, Arc::new(GoNorth), false);
        assert_eq!(
            ctx.play_move("req-5").await,
            MoveOutcome::SubmitFailed {
                direction: Direction::North
            }
        );
    }
}
