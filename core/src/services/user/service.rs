//! Profile self-service and staff user administration

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use rent_shared::utils::validation::validators::normalize_email;

use crate::domain::entities::rental::RentalStatus;
use crate::domain::entities::user::{Address, Role, User};
use crate::errors::{DomainError, DomainResult, RentalError};
use crate::repositories::{RentalRepository, UserRepository};

/// Partial profile change; `None` fields stay as they are
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

pub struct UserService<U, R>
where
    U: UserRepository + ?Sized,
    R: RentalRepository + ?Sized,
{
    user_repository: Arc<U>,
    rental_repository: Arc<R>,
}

impl<U, R> UserService<U, R>
where
    U: UserRepository + ?Sized,
    R: RentalRepository + ?Sized,
{
    pub fn new(user_repository: Arc<U>, rental_repository: Arc<R>) -> Self {
        Self {
            user_repository,
            rental_repository,
        }
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    pub async fn get_by_email(&self, email: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }

    /// All users, or only those holding `role`
    pub async fn list(&self, role: Option<Role>) -> DomainResult<Vec<User>> {
        match role {
            Some(role) => self.user_repository.find_by_role(role).await,
            None => self.user_repository.find_all().await,
        }
    }

    pub async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> DomainResult<User> {
        let ProfileUpdate {
            name,
            phone,
            birth_date,
        } = update;
        self.modify(id, move |user| {
            user.update_profile(name, phone, birth_date);
            Ok(())
        })
        .await
    }

    pub async fn set_address(&self, id: Uuid, address: Address) -> DomainResult<User> {
        self.modify(id, move |user| {
            user.set_address(Some(address));
            Ok(())
        })
        .await
    }

    pub async fn remove_address(&self, id: Uuid) -> DomainResult<User> {
        self.modify(id, |user| {
            user.set_address(None);
            Ok(())
        })
        .await
    }

    /// Self-service deactivation, refused while the user holds an ACTIVE rental
    pub async fn deactivate_self(&self, id: Uuid) -> DomainResult<User> {
        let user = self.get(id).await?;
        let active = self
            .rental_repository
            .find_by_user_id_and_status(user.id, RentalStatus::Active)
            .await?;
        if !active.is_empty() {
            return Err(RentalError::HasActiveRentals.into());
        }
        self.set_active(user.id, false).await
    }

    pub async fn promote(&self, id: Uuid) -> DomainResult<User> {
        self.change_role(id, Role::Staff).await
    }

    pub async fn demote(&self, id: Uuid) -> DomainResult<User> {
        self.change_role(id, Role::Client).await
    }

    pub async fn activate(&self, id: Uuid) -> DomainResult<User> {
        self.set_active(id, true).await
    }

    pub async fn deactivate(&self, id: Uuid) -> DomainResult<User> {
        self.set_active(id, false).await
    }

    /// Users are never removed; deleting deactivates
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.deactivate(id).await.map(|_| ())
    }

    async fn change_role(&self, id: Uuid, role: Role) -> DomainResult<User> {
        let user = self
            .modify(id, move |user| {
                if user.role == role {
                    return Err(DomainError::BusinessRule {
                        message: format!("user already has role {}", role),
                    });
                }
                user.set_role(role);
                Ok(())
            })
            .await?;
        tracing::info!(user_id = %user.id, role = %role, event = "role_changed", "User role changed");
        Ok(user)
    }

    async fn set_active(&self, id: Uuid, active: bool) -> DomainResult<User> {
        let user = self
            .modify(id, move |user| {
                if active {
                    user.activate();
                } else {
                    user.deactivate();
                }
                Ok(())
            })
            .await?;
        tracing::info!(user_id = %user.id, active, event = "user_activation", "User activation changed");
        Ok(user)
    }

    /// Apply `change` to the current stored user in one repository unit
    async fn modify<F>(&self, id: Uuid, change: F) -> DomainResult<User>
    where
        F: FnOnce(&mut User) -> DomainResult<()> + Send + 'static,
    {
        self.user_repository
            .modify(id, Box::new(change))
            .await?
            .ok_or_else(|| DomainError::not_found("user"))
    }
}
