//! Runs a few signups against the in-memory store and logs the outcomes.

use finkit::control::Either;
use finkit::effect::Fin;
use signup::{InMemoryUserRepository, SignupEnv, SignupPolicy, SignupRequest, run_signup};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,signup=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let policy = SignupPolicy::from_env().unwrap_or_else(|error| {
        tracing::warn!("Failed to load policy from environment: {error}");
        tracing::info!("Using default policy");
        SignupPolicy::default()
    });

    let repository = InMemoryUserRepository::new();
    let env = SignupEnv::in_memory(&repository, policy);

    let requests = [
        SignupRequest::new("bad", "short", 15),
        SignupRequest::new("alex@example.com", "VeryStrongPass!", 25),
        SignupRequest::new(" Alex@Example.com", "AnotherStrongPass", 31),
    ];

    for request in requests {
        let rendered = match run_signup(request, env.clone()).await {
            Fin::Succ(Either::Right(user)) => format!("created {} ({})", user.email, user.id),
            Fin::Succ(Either::Left(error)) => format!("rejected: {error}"),
            Fin::Fail(fault) => format!("failed: {fault}"),
        };
        tracing::info!("{rendered}");
    }

    tracing::info!(users = repository.len(), "done");
}
