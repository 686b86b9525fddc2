use serde::{Deserialize, Serialize};

use super::{ClientResult, ListEnvelope, YougileClient};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyRequest<'a> {
    login: &'a str,
    password: &'a str,
    company_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct IssuedKey {
    key: String,
}

impl YougileClient {
    /// Companies the account belongs to. Needs no local configuration.
    pub async fn list_companies(&self, login: &str, password: &str) -> ClientResult<Vec<Company>> {
        let envelope: ListEnvelope<Company> = self
            .post_auth("auth/companies", &Credentials { login, password })
            .await?;
        Ok(envelope.into_items())
    }

    /// Issues a fresh API key for `company_id`.
    pub async fn issue_api_key(
        &self,
        login: &str,
        password: &str,
        company_id: &str,
    ) -> ClientResult<String> {
        let issued: IssuedKey = self
            .post_auth(
                "auth/keys",
                &KeyRequest {
                    login,
                    password,
                    company_id,
                },
            )
            .await?;
        Ok(issued.key)
    }
}
