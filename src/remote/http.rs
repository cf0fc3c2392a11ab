//! HTTP implementation of the record service
//!
//! Talks to a JSONPlaceholder-shaped API: `GET /users`, `PUT /users/{id}`,
//! `DELETE /users/{id}`, `POST /users`. The ureq calls are blocking, so
//! each runs on the tokio blocking pool.

use crate::directory::user::{User, UserFields};
use crate::error::{RoloError, RoloResult};
use crate::remote::RecordService;
use async_trait::async_trait;
use tracing::debug;

/// Record service over HTTP
#[derive(Debug, Clone)]
pub struct HttpRecordService {
    base_url: String,
}

impl HttpRecordService {
    /// Create a service against `base_url` (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: u64) -> String {
        format!("{}/users/{}", self.base_url, id)
    }
}

/// Run a blocking ureq call on the blocking pool and flatten the join error
async fn blocking<T, F>(op: F) -> RoloResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RoloResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| RoloError::Internal(format!("blocking task panicked: {}", e)))?
}

fn http_err(context: &str, err: ureq::Error) -> RoloError {
    debug!("{context}: {err}");
    RoloError::Http(format!("{context}: {err}"))
}

#[async_trait]
impl RecordService for HttpRecordService {
    async fn fetch_users(&self) -> RoloResult<Vec<User>> {
        let url = self.users_url();
        blocking(move || {
            let mut response = ureq::get(&url)
                .call()
                .map_err(|e| http_err("GET /users", e))?;
            response
                .body_mut()
                .read_json::<Vec<User>>()
                .map_err(|e| http_err("decoding /users body", e))
        })
        .await
    }

    async fn update_user(&self, user: &User) -> RoloResult<User> {
        let url = self.user_url(user.id);
        let body = user.clone();
        blocking(move || {
            let mut response = ureq::put(&url)
                .send_json(&body)
                .map_err(|e| http_err("PUT /users/{id}", e))?;
            response
                .body_mut()
                .read_json::<User>()
                .map_err(|e| http_err("decoding updated user", e))
        })
        .await
    }

    async fn delete_user(&self, id: u64) -> RoloResult<()> {
        let url = self.user_url(id);
        blocking(move || {
            ureq::delete(&url)
                .call()
                .map_err(|e| http_err("DELETE /users/{id}", e))?;
            Ok(())
        })
        .await
    }

    async fn create_user(&self, fields: &UserFields) -> RoloResult<User> {
        let url = self.users_url();
        let body = fields.clone();
        blocking(move || {
            let mut response = ureq::post(&url)
                .send_json(&body)
                .map_err(|e| http_err("POST /users", e))?;
            response
                .body_mut()
                .read_json::<User>()
                .map_err(|e| http_err("decoding created user", e))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let service = HttpRecordService::new("https://api.example.com/");
        assert_eq!(service.users_url(), "https://api.example.com/users");
        assert_eq!(service.user_url(4), "https://api.example.com/users/4");
    }
}
