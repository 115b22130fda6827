use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    Json,
};

use crate::error::ApiError;

/// JSON body extractor whose rejections use the API's JSON error shape.
///
/// A request without a JSON content type or with a blank body yields
/// `T::default()`, so handlers see missing fields rather than a parse error.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned + Default + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            let message = format!("Failed to read request body: {}", rejection.body_text());
            tracing::warn!("{}", message);
            ApiError::InvalidBody(message)
        })?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(AppJson(T::default()));
        }

        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                let message = format!(
                    "Failed to parse JSON request body: {}",
                    rejection.body_text()
                );
                tracing::warn!("{}", message);
                Err(ApiError::InvalidBody(message))
            }
        }
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(content_type).unwrap(),
        );
        headers
    }

    #[test]
    fn test_has_json_content_type() {
        assert!(has_json_content_type(&headers_with("application/json")));
        assert!(has_json_content_type(&headers_with(
            "application/json; charset=utf-8"
        )));
        assert!(has_json_content_type(&headers_with("application/vnd.api+json")));
        assert!(!has_json_content_type(&headers_with("text/plain")));
        assert!(!has_json_content_type(&HeaderMap::new()));
    }
}
