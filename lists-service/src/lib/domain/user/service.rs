use std::sync::Arc;

use auth::PasswordHasher;

use crate::domain::errors::AppError;
use crate::domain::repository::DocumentRepository;
use crate::domain::repository::DocumentStore;
use crate::domain::repository::Filter;
use crate::domain::repository::JsonDocument;
use crate::domain::repository::Projection;
use crate::domain::repository::ID_FIELD;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDto;
use crate::domain::user::models::UserSummary;

const USERS_COLLECTION: &str = "users";
const USER_NAME_FIELD: &str = "userName";

/// Domain service for user registration, lookup and credential checks.
#[derive(Clone)]
pub struct UsersService {
    repository: DocumentRepository,
    password_hasher: PasswordHasher,
}

impl UsersService {
    /// Create a users service over the `users` collection of `store`.
    ///
    /// # Arguments
    /// * `store` - Shared document store
    /// * `password_hasher` - Hasher used for new passwords and checks
    pub fn new(store: Arc<dyn DocumentStore>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository: DocumentRepository::new(store, USERS_COLLECTION),
            password_hasher,
        }
    }

    /// Register a new user.
    ///
    /// The uniqueness check is a read before the insert; two concurrent
    /// registrations of the same name can both pass it.
    ///
    /// # Returns
    /// Identifier of the new user
    ///
    /// # Errors
    /// * `BadRequest` - Passwords differ or the user name is taken
    /// * `Unexpected` - Existence check, hashing or insert failed
    pub async fn add_user(&self, dto: &UserDto) -> Result<String, AppError> {
        if dto.new_password != dto.confirm_new_password {
            return Err(AppError::bad_request("Passwords don't match"));
        }

        if self.exists_user(&dto.user_name).await? {
            return Err(AppError::bad_request(
                "A user with the same user name already exists",
            ));
        }

        let mut user = dto.to_user();
        user.password_hash = self
            .password_hasher
            .hash(&dto.new_password)
            .map_err(|e| AppError::unexpected("Error encrypting password", e))?;

        let id = self.repository.add(&mut user).await?;
        tracing::info!(
            user_id = %id,
            user_name = %user.user_name,
            is_admin = user.is_admin,
            "User created"
        );

        Ok(id)
    }

    /// Look up `user_name` and verify `password` against its stored hash.
    ///
    /// # Errors
    /// * `BadRequest` - Unknown user name or wrong password
    /// * `Unexpected` - Lookup failed
    pub async fn check_password(&self, user_name: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .find_by_user_name(user_name)
            .await?
            .ok_or_else(|| AppError::bad_request("The user does not exist"))?;

        self.password_hasher
            .verify(&user.password_hash, password)
            .map_err(|_| AppError::bad_request("Invalid password"))?;

        Ok(user)
    }

    /// Fetch a user by identifier.
    ///
    /// # Errors
    /// * `BadRequest` - Malformed identifier
    /// * `NotFound` - No user with this identifier
    /// * `Unexpected` - Lookup failed
    pub async fn get_single_user(&self, id: &str) -> Result<User, AppError> {
        if !self.repository.is_valid_id(id) {
            return Err(AppError::invalid_id(id));
        }

        self.repository.get_one(&Filter::by_id(id), None).await
    }

    /// Every registered user, without password hashes.
    pub async fn get_users(&self) -> Result<Vec<UserSummary>, AppError> {
        let projection = Projection::fields([USER_NAME_FIELD, "isAdmin"]);
        self.repository.get(&Filter::new(), Some(&projection)).await
    }

    /// Delete a user by identifier.
    ///
    /// # Errors
    /// * `BadRequest` - Malformed identifier
    /// * `NotFound` - No user with this identifier
    /// * `Unexpected` - Delete failed
    pub async fn remove_user(&self, id: &str) -> Result<(), AppError> {
        if !self.repository.is_valid_id(id) {
            return Err(AppError::invalid_id(id));
        }

        self.repository.remove(&Filter::by_id(id)).await?;
        tracing::info!(user_id = %id, "User removed");

        Ok(())
    }

    /// Make sure an administrator named `user_name` exists.
    ///
    /// # Returns
    /// The new identifier when the user had to be created, `None` if a user
    /// with that name was already there
    pub async fn ensure_admin(
        &self,
        user_name: &str,
        password: &str,
    ) -> Result<Option<String>, AppError> {
        if self.exists_user(user_name).await? {
            return Ok(None);
        }

        let dto = UserDto {
            user_name: user_name.to_string(),
            new_password: password.to_string(),
            confirm_new_password: password.to_string(),
            is_admin: true,
        };

        self.add_user(&dto).await.map(Some)
    }

    async fn exists_user(&self, user_name: &str) -> Result<bool, AppError> {
        let projection = Projection::fields([ID_FIELD]);
        let existing: Vec<JsonDocument> = self
            .repository
            .get(&Filter::new().eq(USER_NAME_FIELD, user_name), Some(&projection))
            .await
            .map_err(|e| AppError::unexpected("Error checking if user name exists", e))?;

        Ok(!existing.is_empty())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, AppError> {
        let found: Vec<User> = self
            .repository
            .get(&Filter::new().eq(USER_NAME_FIELD, user_name), None)
            .await
            .map_err(|e| AppError::unexpected("Error checking if user name exists", e))?;

        Ok(found.into_iter().next())
    }
}
