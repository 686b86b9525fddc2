use serde::Deserialize;

use super::{ClientResult, YougileClient};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub real_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// Best human-readable name: real name, then first/last, then email.
    pub fn display_name(&self) -> String {
        if let Some(real_name) = self.real_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return real_name.to_string();
        }

        let full: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();
        if !full.is_empty() {
            return full.join(" ");
        }

        self.email.clone()
    }
}

impl YougileClient {
    pub async fn list_users(&mut self) -> ClientResult<Vec<User>> {
        self.get_list("users", &[]).await
    }
}
