use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginStaffDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUserDto {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponseDto {
    pub success: bool,
    pub message: String,
    pub user: StaffUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthStatusResponseDto {
    pub success: bool,
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
    pub user: Option<StaffUserDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
}
