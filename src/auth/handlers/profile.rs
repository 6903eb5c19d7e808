/**
 * Profile Handler
 *
 * Returns the identity resolved by the auth middleware
 * (GET /api/users/profile).
 */

use axum::response::Json;

use crate::auth::handlers::types::UserResponse;
use crate::middleware::auth::AuthUser;

/// Profile handler: echoes the authenticated identity.
pub async fn profile(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.user_id,
        name: user.name,
        email: user.email,
    })
}
