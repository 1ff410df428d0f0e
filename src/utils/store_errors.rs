use flashdeck_core::AppError;
use flashdeck_db::StoreError;

/// Maps a store failure, reporting a unique violation with `on_conflict`.
pub fn conflict_as(err: StoreError, on_conflict: impl FnOnce() -> AppError) -> AppError {
    match err {
        StoreError::Conflict => on_conflict(),
        StoreError::MissingReference => {
            AppError::bad_request("Referenced category or tag does not exist")
        }
        StoreError::Database(err) => AppError::internal(err),
    }
}

/// Maps a store failure where a unique violation is not expected.
pub fn store_error(err: StoreError) -> AppError {
    conflict_as(err, || AppError::already_exists("Resource already exists"))
}
