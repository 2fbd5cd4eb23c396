use axum::Router;
use recruiter_client::{ClientConfig, ServiceClient};

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn client_for(base_url: &str) -> ServiceClient {
    ServiceClient::new(&ClientConfig::new(base_url)).unwrap()
}

pub fn client_with_cookie(base_url: &str, cookie: &str) -> ServiceClient {
    ServiceClient::new(&ClientConfig::new(base_url).with_session_cookie(cookie)).unwrap()
}
