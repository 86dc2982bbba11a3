use crate::{ApiClient, ApiRequest, ApiResult, AuthResponse, LoginRequest, RegisterRequest};

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let request = ApiRequest::post("/auth/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.client.send_public(request).await?.decode()
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> ApiResult<AuthResponse> {
        let request = ApiRequest::post("/auth/register").json(&RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        })?;
        self.client.send_public(request).await?.decode()
    }
}
