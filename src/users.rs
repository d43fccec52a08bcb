// User directory and the admin capability check
use crate::error::{TravelError, TravelResult};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

pub type UserId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Customer,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub location: String,
    #[serde(skip_serializing, default)]
    password: String,
    pub role: Role,
}

impl User {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        location: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            location: location.into(),
            password: password.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self.role {
            Role::Customer => "Customer",
            Role::Admin => "Admin",
        };
        write!(
            f,
            "[{}] {} : {} : {} : {}",
            role, self.id, self.name, self.email, self.location
        )
    }
}

// Capability check consumed by privileged operations
pub trait Capabilities {
    fn is_admin(&self, user_id: UserId) -> bool;
}

#[derive(Default)]
pub struct UserDirectory {
    users: DashMap<UserId, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.users.insert(user.id, user);
        }
        directory
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn find(&self, user_id: UserId) -> Option<User> {
        self.users.get(&user_id).map(|user| user.clone())
    }

    // Registers a new customer under the given id
    pub fn sign_up(
        &self,
        user_id: UserId,
        name: &str,
        email: &str,
        location: &str,
        password: &str,
    ) -> TravelResult<User> {
        match self.users.entry(user_id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(TravelError::DuplicateUser(user_id)),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let user = User::new(user_id, name, email, location, password, Role::Customer);
                slot.insert(user.clone());
                info!(user_id, "Signed up new customer");
                Ok(user)
            }
        }
    }

    pub fn login(&self, user_id: UserId, password: &str) -> TravelResult<UserId> {
        match self.users.get(&user_id) {
            Some(user) if user.password_matches(password) => {
                info!(user_id, "Login successful");
                Ok(user_id)
            }
            _ => {
                warn!(user_id, "Login rejected");
                Err(TravelError::InvalidCredentials(user_id))
            }
        }
    }

    pub fn update_password(&self, user_id: UserId, new_password: &str) -> TravelResult<()> {
        let mut user = self
            .users
            .get_mut(&user_id)
            .ok_or(TravelError::UserNotFound(user_id))?;
        user.password = new_password.to_string();
        info!(user_id, "Password updated");
        Ok(())
    }
}

impl Capabilities for UserDirectory {
    fn is_admin(&self, user_id: UserId) -> bool {
        self.users
            .get(&user_id)
            .map_or(false, |user| user.is_admin())
    }
}
