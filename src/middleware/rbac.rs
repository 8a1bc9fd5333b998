// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    models::auth::{Role, User},
};

/// 1. O trait que define o perfil mínimo exigido
pub trait RoleDef: Send + Sync + 'static {
    fn required() -> Role;
}

/// 2. O extrator (guardião): basta declará-lo na assinatura do handler.
/// A hierarquia é respeitada — um ADMIN passa por qualquer guardião.
pub struct RequireRole<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // O auth_guard já rodou e deixou o usuário nos extensions.
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if !user.role.allows(T::required()) {
            return Err(AppError::Forbidden(T::required().as_str()));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PERFIS (TIPOS)
// ---

pub struct RoleAdmin;
impl RoleDef for RoleAdmin {
    fn required() -> Role {
        Role::Admin
    }
}

pub struct RoleOperator;
impl RoleDef for RoleOperator {
    fn required() -> Role {
        Role::Operator
    }
}
