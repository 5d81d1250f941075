use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct UsernameRequest {
    pub username: String,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
    pub token: String,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub username: Option<String>,
}
