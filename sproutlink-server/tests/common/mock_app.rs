use std::sync::Arc;

use axum::Router;

use sproutlink_api::models::UserRole;
use sproutlink_server::configs::{Auth, Database, SchemaManager, Storage};
use sproutlink_server::handles::{
    AuthState, DeviceState, PlantState, ReadingState, auth_router, device_router, plant_router,
    reading_router,
};
use sproutlink_server::middlewares::TokenState;
use sproutlink_server::models::User;
use sproutlink_server::repositories::{DeviceRepository, PlantRepository, UserRepository};
use sproutlink_server::services::{
    AuthService, NotificationService, PushSender, RevocationService, TokenService,
};
use sproutlink_server::tests::RecordingSender;

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub revocation_service: Arc<RevocationService>,
    pub notification_service: Arc<NotificationService>,
    pub push_outbox: Arc<RecordingSender>,
    pub admin: User,
    pub token: String,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_cooldown(0).await
    }

    pub async fn with_cooldown(cooldown_seconds: u64) -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    migration_path: None,
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        let auth_service = Arc::new(AuthService::new());
        let token_service = Arc::new(TokenService::new(Auth {
            secret: String::from("test"),
            expiration: 1000,
        }));
        let revocation_service = Arc::new(RevocationService::new());

        let push_outbox = Arc::new(RecordingSender::new());
        let sender: Arc<dyn PushSender> = push_outbox.clone();
        let notification_service = Arc::new(NotificationService::new(sender, cooldown_seconds));

        let user_repository = UserRepository::new(storage.clone());
        let admin = User {
            id: 0,
            email: String::from("admin@test.com"),
            password: auth_service.hash("password123").unwrap(),
            role: UserRole::Admin.to_string(),
        };

        let mut tx = storage.get_pool().begin().await.unwrap();
        let admin_id = user_repository.create(&admin, &mut tx).await.unwrap();
        tx.commit().await.unwrap();

        let admin = user_repository.find_by_id(admin_id).await.unwrap().unwrap();
        let token = token_service.generate_token(&admin).unwrap().token;

        Self {
            storage,
            auth_service,
            token_service,
            revocation_service,
            notification_service,
            push_outbox,
            admin,
            token,
            router: Router::new(),
        }
    }

    fn token_state(&self) -> TokenState {
        TokenState {
            token_service: self.token_service.clone(),
            revocation_service: self.revocation_service.clone(),
        }
    }

    pub fn with_auth_handle(mut self) -> Self {
        let auth_state = AuthState {
            auth_service: self.auth_service.clone(),
            token_service: self.token_service.clone(),
            revocation_service: self.revocation_service.clone(),
            user_repository: Arc::new(UserRepository::new(self.storage.clone())),
        };

        self.router = self.router.merge(auth_router(auth_state, self.token_state()));
        self
    }

    pub fn with_plant_handle(mut self) -> Self {
        let plant_state = PlantState {
            plant_repository: Arc::new(PlantRepository::new(self.storage.clone())),
        };

        self.router = self
            .router
            .merge(plant_router(plant_state, self.token_state()));
        self
    }

    pub fn with_device_handle(mut self) -> Self {
        let device_state = DeviceState {
            device_repository: Arc::new(DeviceRepository::new(self.storage.clone())),
            plant_repository: Arc::new(PlantRepository::new(self.storage.clone())),
        };

        self.router = self.router.merge(device_router(device_state));
        self
    }

    pub fn with_reading_handle(mut self) -> Self {
        let reading_state = ReadingState {
            device_repository: Arc::new(DeviceRepository::new(self.storage.clone())),
            plant_repository: Arc::new(PlantRepository::new(self.storage.clone())),
            notification_service: self.notification_service.clone(),
        };

        self.router = self.router.merge(reading_router(reading_state));
        self
    }
}
