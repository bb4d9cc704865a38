/// Generate a typed client method over `perform_action`, with tracing and
/// unwrapping of the matching result variant.
macro_rules! book_request {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $action:expr => $variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, BookError> {
                tracing::debug!("Sending request");
                match self.inner.perform_action($action).await? {
                    BookActionResult::$variant(value) => Ok(value),
                    other => Err(BookError::UnexpectedResult(format!("{:?}", other))),
                }
            }
        }
    };
}
