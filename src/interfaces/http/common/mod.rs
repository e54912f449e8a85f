//! Building blocks shared by all HTTP modules

mod error;
mod response;
mod validated_json;

pub use error::{ok, status_for, ApiError, ApiResult};
pub use response::{ApiResponse, EmptyData, PaginatedResponse};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
