use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use crate::{
    application::usercases::subscriptions::SubscriptionUseCase,
    domain::repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    infrastructure::{
        axum_http::auth::AuthUser,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{plans::PlanPostgres, subscriptions::SubscriptionPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscription_repository = SubscriptionPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let subscriptions_usecase =
        SubscriptionUseCase::new(Arc::new(subscription_repository), Arc::new(plan_repository));

    Router::new()
        .route("/plans", get(list_plans))
        .route("/current", get(current_subscription))
        .with_state(Arc::new(subscriptions_usecase))
}

pub async fn list_plans<S, P>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    _auth: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match subscriptions_usecase.list_plans().await {
        Ok(plans) => Json(plans).into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn current_subscription<S, P>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<S, P>>>,
    AuthUser { user_id, .. }: AuthUser,
) -> impl IntoResponse
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    Json(subscriptions_usecase.get_current(user_id).await).into_response()
}
