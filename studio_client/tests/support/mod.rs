// Starts a seeded in-memory studio API on an ephemeral port for one test.
use studio_server::AppState;
use studio_server::frameworks::seed::seed_demo_data;

pub async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    let state = AppState::in_memory();
    seed_demo_data(&state).await.expect("seed demo data");

    // The listener is already bound, so requests queue until the task runs.
    tokio::spawn(async move {
        studio_server::serve(listener, state)
            .await
            .expect("server failed");
    });

    format!("http://{addr}")
}
