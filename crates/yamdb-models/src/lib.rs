//! # YaMDb Models
//!
//! Entities read from the store, request DTOs (validated with `validator`)
//! and the response shapes documented through `utoipa`.
//!
//! - [`auth`]: signup and token exchange payloads
//! - [`users`]: accounts, admin and profile DTOs
//! - [`categories`], [`genres`]: catalog classifiers addressed by slug
//! - [`titles`]: reviewed works with separate read and write shapes
//! - [`reviews`], [`comments`]: user content nested under titles
//! - [`ids`]: typed ids
//! - [`validators`]: shared field rules

pub mod auth;
pub mod categories;
pub mod comments;
pub mod genres;
pub mod ids;
pub mod reviews;
pub mod titles;
pub mod users;
pub mod validators;

pub use auth::{SignupRequest, SignupResponse, TokenRequest, TokenResponse};
pub use categories::{
    CatalogFilterParams, Category, CreateCategoryDto, PaginatedCategoriesResponse,
};
pub use comments::{Comment, CreateCommentDto, PaginatedCommentsResponse, UpdateCommentDto};
pub use genres::{CreateGenreDto, Genre, PaginatedGenresResponse};
pub use ids::{CategoryId, CommentId, GenreId, ReviewId, TitleId, UserId};
pub use reviews::{CreateReviewDto, PaginatedReviewsResponse, Review, UpdateReviewDto};
pub use titles::{
    CreateTitleDto, PaginatedTitlesResponse, TitleFilterParams, TitleOrdering, TitleResponse,
    UpdateTitleDto,
};
pub use users::{
    CreateUserDto, CurrentUser, PaginatedUsersResponse, UpdateProfileDto, UpdateUserDto, User,
    UserCredentials, UserFilterParams,
};
