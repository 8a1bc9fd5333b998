// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Claims, NotificationPreferences, Role, User},
    storage::{StorageKey, StorageService},
    store::InventoryStore,
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<InventoryStore>,
    storage: StorageService,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(store: Arc<InventoryStore>, storage: StorageService, jwt_secret: String) -> Self {
        Self { store, storage, jwt_secret }
    }

    // Novos usuários entram como VIEWER; promoção é ato de um ADMIN.
    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AppError> {
        // O hashing é pesado; sai do event loop.
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = User {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role: Role::Viewer,
            password_hash: hashed_password,
            preferences: NotificationPreferences::default(),
        };
        let user_id = user.id;

        if !self.store.add_user(user) {
            return Err(AppError::EmailAlreadyExists);
        }
        self.storage
            .set(StorageKey::Users, &self.store.export(StorageKey::Users))
            .await;

        tracing::info!("👤 Novo usuário registrado: {}", email);
        self.create_token(user_id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .store
            .find_user_by_email(email)
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.store
            .find_user_by_id(token_data.claims.sub)
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::inventory::InventorySnapshot;

    async fn auth_em_tempdir() -> (tempfile::TempDir, AuthService) {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageService::new_file(dir.path()).unwrap();
        let store = Arc::new(InventoryStore::new(InventorySnapshot::default(), false));
        let auth = AuthService::new(store, storage, "segredo-de-teste".into());
        (dir, auth)
    }

    #[tokio::test]
    async fn registro_login_e_validacao_do_token() {
        let (_dir, auth) = auth_em_tempdir().await;

        auth.register_user("Fulano", "fulano@eb.mil.br", "senha123")
            .await
            .unwrap();

        let token = auth.login_user("fulano@eb.mil.br", "senha123").await.unwrap();
        let user = auth.validate_token(&token).unwrap();
        assert_eq!(user.email, "fulano@eb.mil.br");
        assert_eq!(user.role, Role::Viewer);
    }

    #[tokio::test]
    async fn senha_errada_e_email_repetido_sao_recusados() {
        let (_dir, auth) = auth_em_tempdir().await;
        auth.register_user("Fulano", "fulano@eb.mil.br", "senha123")
            .await
            .unwrap();

        let err = auth.login_user("fulano@eb.mil.br", "senha errada").await;
        assert!(matches!(err, Err(AppError::InvalidCredentials)));

        let err = auth.register_user("Outro", "FULANO@eb.mil.br", "outra123").await;
        assert!(matches!(err, Err(AppError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn token_adulterado_e_invalido() {
        let (_dir, auth) = auth_em_tempdir().await;
        auth.register_user("Fulano", "fulano@eb.mil.br", "senha123")
            .await
            .unwrap();
        let token = auth.login_user("fulano@eb.mil.br", "senha123").await.unwrap();

        let adulterado = format!("{}x", token);
        assert!(matches!(auth.validate_token(&adulterado), Err(AppError::InvalidToken)));
    }
}
