use utoipa::OpenApi;

use crate::presentation::handlers::users::{PageMetaDto, UserDto, UsersPageDto};

#[derive(OpenApi)]
#[openapi(
    paths(crate::presentation::handlers::users::list_users),
    components(schemas(UserDto, PageMetaDto, UsersPageDto)),
    tags(
        (name = "users", description = "User directory endpoints")
    )
)]
pub(crate) struct ApiDoc;
