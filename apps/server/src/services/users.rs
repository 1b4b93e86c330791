//! User service: account lifecycle and the email uniqueness invariant.

use uuid::Uuid;

use crate::{
    db::UserRepository,
    models::{NewProfile, NewUser, Profile, User, UserRole, UserUpdate},
    Error, Result,
};

pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Register a user. Email addresses are globally unique; a duplicate
    /// fails with Conflict.
    pub async fn create_user(&self, new: NewUser) -> Result<User> {
        if self.users.exists_by_email(&new.email).await? {
            return Err(Error::Conflict(format!(
                "user with email {} already exists",
                new.email
            )));
        }

        self.users.insert(new).await
    }

    /// Register a user together with their 1:1 profile, atomically.
    pub async fn create_user_with_profile(
        &self,
        new: NewUser,
        profile: NewProfile,
    ) -> Result<(User, Profile)> {
        if self.users.exists_by_email(&new.email).await? {
            return Err(Error::Conflict(format!(
                "user with email {} already exists",
                new.email
            )));
        }

        self.users.insert_with_profile(new, profile).await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("user"))
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| Error::not_found("user"))
    }

    pub async fn get_user_with_profile(&self, id: Uuid) -> Result<(User, Option<Profile>)> {
        let user = self.get_user(id).await?;
        let profile = self.users.find_profile(id).await?;
        Ok((user, profile))
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        self.users.list_all().await
    }

    pub async fn get_users_by_role(&self, role: UserRole) -> Result<Vec<User>> {
        self.users.list_by_role(role).await
    }

    /// Replace name, email, role, and phone. Moving to an email owned by
    /// another user fails with Conflict.
    pub async fn update_user(&self, id: Uuid, update: UserUpdate) -> Result<User> {
        if let Some(existing) = self.users.find_by_email(&update.email).await? {
            if existing.id != id {
                return Err(Error::Conflict(format!(
                    "user with email {} already exists",
                    update.email
                )));
            }
        }

        self.users
            .update(id, update)
            .await?
            .ok_or_else(|| Error::not_found("user"))
    }

    /// Remove a user and everything they own (profile, enrollments,
    /// submissions, quiz attempts, reviews, courses taught with their
    /// subtrees). Shared references survive.
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        if !self.users.delete_cascade(id).await? {
            return Err(Error::not_found("user"));
        }
        Ok(())
    }
}
