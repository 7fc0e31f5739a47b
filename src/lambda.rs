use std::sync::Arc;

use lambda_http::{service_fn, Body, Error, Request, Response};

use crate::dispatch::{dispatch, Deps, NotificationRequest};

/// Run the Lambda handler loop.
pub async fn run(deps: Arc<Deps>) {
    let func = service_fn(move |event: Request| {
        let deps = deps.clone();
        async move { handle(event, &deps).await }
    });
    lambda_http::run(func).await.unwrap();
}

async fn handle(event: Request, deps: &Deps) -> Result<Response<Body>, Error> {
    let method = event.method().as_str().to_uppercase();
    let path = event.uri().path();

    match (method.as_str(), path) {
        ("GET", "/healthz") => Ok(Response::builder()
            .status(200)
            .header("content-type", "application/json")
            .body(Body::Text(r#"{"status":"ok"}"#.into()))
            .unwrap()),
        ("POST", "/notify") => handle_notify(event, deps).await,
        _ => Ok(Response::builder()
            .status(404)
            .header("content-type", "application/json")
            .body(Body::Text(r#"{"error":"route_not_found"}"#.into()))
            .unwrap()),
    }
}

async fn handle_notify(event: Request, deps: &Deps) -> Result<Response<Body>, Error> {
    let body = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).into_owned(),
        Body::Empty => String::new(),
    };

    let req: NotificationRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            let json = serde_json::json!({"error": format!("invalid JSON: {}", e)});
            return Ok(Response::builder()
                .status(400)
                .header("content-type", "application/json")
                .body(Body::Text(json.to_string()))
                .unwrap());
        }
    };

    let result = dispatch(deps, req).await;
    let json = serde_json::to_string(&result).unwrap();
    Ok(Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(Body::Text(json))
        .unwrap())
}
