#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use slug_redirector::config::Config;
use slug_redirector::domain::access_event::AccessEvent;
use slug_redirector::domain::entities::Link;
use slug_redirector::domain::repositories::{LinkStore, StoreError, StoreResult};
use slug_redirector::infrastructure::store::MemoryLinkStore;
use slug_redirector::routes::app_router;
use slug_redirector::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

pub const CHROME: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";
pub const FACEBOOK: &str = "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// A store whose backend is always down.
pub struct FailingStore;

#[async_trait]
impl LinkStore for FailingStore {
    async fn get(&self, _key: &str, _cache_ttl: Duration) -> StoreResult<Option<Link>> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn promo_link() -> Link {
    Link::new("promo", "https://dest.example/x").with_title("Promo")
}

pub fn memory_store(links: impl IntoIterator<Item = Link>) -> Arc<dyn LinkStore> {
    Arc::new(MemoryLinkStore::with_links(links))
}

pub fn create_test_state(
    config: Config,
    store: Arc<dyn LinkStore>,
) -> (AppState, mpsc::Receiver<AccessEvent>) {
    let (tx, rx) = mpsc::channel(100);
    (AppState::new(config, store, tx), rx)
}

pub fn create_test_server(
    config: Config,
    store: Arc<dyn LinkStore>,
) -> (TestServer, mpsc::Receiver<AccessEvent>) {
    let (state, rx) = create_test_state(config, store);
    (server_for(state), rx)
}

pub fn server_for(state: AppState) -> TestServer {
    let app = app_router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

pub fn empty_store() -> Arc<dyn LinkStore> {
    Arc::new(MemoryLinkStore::new())
}
