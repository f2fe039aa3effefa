use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use yamdb_core::{PaginationMeta, Role};
use yamdb_models::{
    Category, Comment, CreateCategoryDto, CreateCommentDto, CreateGenreDto, CreateReviewDto,
    CreateTitleDto, CreateUserDto, Genre, PaginatedCategoriesResponse, PaginatedCommentsResponse,
    PaginatedGenresResponse, PaginatedReviewsResponse, PaginatedTitlesResponse,
    PaginatedUsersResponse, Review, SignupRequest, SignupResponse, TitleResponse, TokenRequest,
    TokenResponse, UpdateCommentDto, UpdateProfileDto, UpdateReviewDto, UpdateTitleDto,
    UpdateUserDto, User,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::obtain_token,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::genres::controller::get_genres,
        crate::modules::genres::controller::create_genre,
        crate::modules::genres::controller::delete_genre,
        crate::modules::titles::controller::get_titles,
        crate::modules::titles::controller::create_title,
        crate::modules::titles::controller::get_title,
        crate::modules::titles::controller::update_title,
        crate::modules::titles::controller::delete_title,
        crate::modules::reviews::controller::get_reviews,
        crate::modules::reviews::controller::create_review,
        crate::modules::reviews::controller::get_review,
        crate::modules::reviews::controller::update_review,
        crate::modules::reviews::controller::delete_review,
        crate::modules::comments::controller::get_comments,
        crate::modules::comments::controller::create_comment,
        crate::modules::comments::controller::get_comment,
        crate::modules::comments::controller::update_comment,
        crate::modules::comments::controller::delete_comment,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_me,
    ),
    components(
        schemas(
            ErrorResponse,
            PaginationMeta,
            Role,
            SignupRequest,
            SignupResponse,
            TokenRequest,
            TokenResponse,
            Category,
            CreateCategoryDto,
            PaginatedCategoriesResponse,
            Genre,
            CreateGenreDto,
            PaginatedGenresResponse,
            TitleResponse,
            CreateTitleDto,
            UpdateTitleDto,
            PaginatedTitlesResponse,
            Review,
            CreateReviewDto,
            UpdateReviewDto,
            PaginatedReviewsResponse,
            Comment,
            CreateCommentDto,
            UpdateCommentDto,
            PaginatedCommentsResponse,
            User,
            CreateUserDto,
            UpdateUserDto,
            UpdateProfileDto,
            PaginatedUsersResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Confirmation codes and access tokens"),
        (name = "Categories", description = "Title categories"),
        (name = "Genres", description = "Title genres"),
        (name = "Titles", description = "Works open for review"),
        (name = "Reviews", description = "Scored reviews of a title"),
        (name = "Comments", description = "Comments on a review"),
        (name = "Users", description = "Accounts and profiles")
    ),
    info(
        title = "YaMDb API",
        version = "0.1.0",
        description = "Reviews of films, books and music. Accounts sign in with an emailed confirmation code exchanged for a JWT.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
