use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Fixed one-second window; the counter resets when the window rolls over.
/// Resume analysis does synchronous parsing work, so the API router keeps a
/// hard per-second cap instead of queueing excess requests.
#[derive(Clone, Debug)]
pub struct RequestBudget {
    per_second: u32,
    window: Arc<Mutex<(Instant, u32)>>,
}

impl RequestBudget {
    pub fn per_second(limit: u32) -> Self {
        Self {
            per_second: limit.max(1),
            window: Arc::new(Mutex::new((Instant::now(), 0))),
        }
    }

    fn try_acquire(&self) -> bool {
        let mut window = self.window.lock().expect("request budget mutex poisoned");
        let now = Instant::now();
        if now.duration_since(window.0) >= Duration::from_secs(1) {
            *window = (now, 0);
        }
        if window.1 < self.per_second {
            window.1 += 1;
            true
        } else {
            false
        }
    }
}

pub async fn throttle_middleware(
    State(budget): State<RequestBudget>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !budget.try_acquire() {
        return (StatusCode::TOO_MANY_REQUESTS, "rate_limit_exceeded").into_response();
    }
    next.run(req).await
}
