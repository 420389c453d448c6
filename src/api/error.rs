//! Errors raised while talking to the backend.

use thiserror::Error;

/// Failure of a backend request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
	/// No browser window to issue the request from.
	#[error("no browser window available")]
	NoWindow,

	/// The request never produced a response.
	#[error("network error: {0}")]
	Network(String),

	/// The backend answered with a non-success status.
	#[error("HTTP {status}: {message}")]
	Status { status: u16, message: String },

	/// The response body did not match the expected record shape.
	#[error("unexpected response: {0}")]
	Decode(String),
}

impl ApiError {
	/// Text suitable for a user notification: the backend message when there
	/// is one, otherwise the full error.
	pub fn user_message(&self) -> String {
		match self {
			ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
			ApiError::Status { status, .. } => format!("HTTP {status}"),
			other => other.to_string(),
		}
	}
}

impl From<serde_json::Error> for ApiError {
	fn from(err: serde_json::Error) -> Self {
		ApiError::Decode(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_message_prefers_backend_text() {
		let err = ApiError::Status {
			status: 404,
			message: "Node not found: 12".into(),
		};
		assert_eq!(err.user_message(), "Node not found: 12");
		assert_eq!(err.to_string(), "HTTP 404: Node not found: 12");
	}

	#[test]
	fn user_message_falls_back_to_display() {
		let err = ApiError::Status {
			status: 500,
			message: String::new(),
		};
		assert_eq!(err.user_message(), "HTTP 500");
		assert_eq!(
			ApiError::Network("offline".into()).user_message(),
			"network error: offline"
		);
	}
}
