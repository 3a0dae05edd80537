// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, error::Error, net::SocketAddr, sync::Arc};

use countdown_api::{
    config::Config,
    cors,
    db::mongo::MongoStore,
    graphql::{BaseContext, Context, Schema, TokenSigner, schema},
};
use hyper::{Method, Request, Response, StatusCode, body::Incoming, service::service_fn};
use hyper_util::rt::{TokioExecutor, TokioIo};
use juniper_hyper::{graphiql, graphql, playground};
use tokio::net::TcpListener;

async fn handle_request(
    root_node: Arc<Schema>,
    base: BaseContext,
    req: Request<Incoming>,
) -> Result<Response<String>, Infallible> {
    let resp = match (req.method(), req.uri().path()) {
        (&Method::GET, "/graphql") | (&Method::POST, "/graphql") => {
            let authorization = req
                .headers()
                .get("authorization")
                .and_then(|value| value.to_str().ok());
            match Context::from_authorization(base, authorization).await {
                Ok(ctx) => graphql(root_node, Arc::new(ctx), req).await,
                Err(e) => {
                    tracing::error!("Failed to resolve request identity: {e}");
                    let body = serde_json::json!({ "errors": [{ "message": e.to_string() }] });
                    let mut resp = Response::new(body.to_string());
                    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                    resp
                }
            }
        }
        (&Method::OPTIONS, "/graphql") => cors::preflight_response(),
        (&Method::GET, "/graphiql") => graphiql("/graphql", None).await,
        (&Method::GET, "/playground") => playground("/graphql", None).await,
        _ => {
            let mut resp = Response::new(String::new());
            *resp.status_mut() = StatusCode::NOT_FOUND;
            resp
        }
    };
    Ok(cors::allow_any_origin(resp))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let store = Arc::new(MongoStore::connect(&config).await?);
    let base = BaseContext {
        store: store.clone(),
        signer: TokenSigner::new(&config.jwt_secret, config.jwt_ttl),
    };
    if config.jwt_ttl.is_none() {
        tracing::warn!("JWT_TTL_SECONDS is not set; issued tokens never expire");
    }

    let root_node: Arc<Schema> = Arc::new(schema());

    let addr = SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}/graphql");

    loop {
        let (stream, _) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
        };

        let io = TokioIo::new(stream);
        let root_node = root_node.clone();
        let base = base.clone();

        tokio::spawn(async move {
            if let Err(e) = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                .serve_connection(
                    io,
                    service_fn(move |req| handle_request(root_node.clone(), base.clone(), req)),
                )
                .await
            {
                tracing::error!("Error serving connection: {e}");
            }
        });
    }

    store.shutdown().await;
    Ok(())
}
