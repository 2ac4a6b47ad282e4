use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::{SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::middlewares::TokenState;
use crate::repositories::{DeviceRepository, PlantRepository, UserRepository};
use crate::services::{
    AuthService, ExpoPushSender, NotificationService, PushSender, RevocationService, TokenService,
};

pub async fn create_app(settings: &Arc<Settings>) -> Router {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .unwrap(),
    );

    let user_repository = Arc::new(UserRepository::new(storage.clone()));
    let plant_repository = Arc::new(PlantRepository::new(storage.clone()));
    let device_repository = Arc::new(DeviceRepository::new(storage.clone()));

    let auth_service = Arc::new(AuthService::new());
    let token_service = Arc::new(TokenService::new(settings.auth.clone()));
    let revocation_service = Arc::new(RevocationService::new());

    let push_sender: Arc<dyn PushSender> =
        Arc::new(ExpoPushSender::new(settings.push.endpoint.clone()));
    let notification_service = Arc::new(NotificationService::new(
        push_sender,
        settings.push.cooldown_seconds,
    ));

    let token_state = TokenState {
        token_service: token_service.clone(),
        revocation_service: revocation_service.clone(),
    };

    Router::new()
        .merge(auth_router(
            AuthState {
                auth_service: auth_service.clone(),
                token_service: token_service.clone(),
                revocation_service: revocation_service.clone(),
                user_repository: user_repository.clone(),
            },
            token_state.clone(),
        ))
        .merge(plant_router(
            PlantState {
                plant_repository: plant_repository.clone(),
            },
            token_state.clone(),
        ))
        .merge(device_router(DeviceState {
            device_repository: device_repository.clone(),
            plant_repository: plant_repository.clone(),
        }))
        .merge(reading_router(ReadingState {
            device_repository: device_repository.clone(),
            plant_repository: plant_repository.clone(),
            notification_service: notification_service.clone(),
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
