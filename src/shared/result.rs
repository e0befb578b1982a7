pub type AppResult<T> = Result<T, String>;
