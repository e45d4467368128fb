/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 19/10/26
 ******************************************************************************/
use std::{fmt, io};
use std::fmt::{Display, Formatter};
use reqwest::StatusCode;

#[derive(Debug)]
pub enum FetchError {
    Network(reqwest::Error),
    Parser(String),
    SessionRejected,
    Other(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(e) => write!(f, "network error: {e}"),
            FetchError::Parser(msg) => write!(f, "parser error: {msg}"),
            FetchError::SessionRejected => write!(f, "session rejected by tracking backend"),
            FetchError::Other(msg) => write!(f, "other error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parser(err.to_string())
    }
}

impl From<AppError> for FetchError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Network(e) => FetchError::Network(e),
            AppError::Json(e) => FetchError::Parser(e.to_string()),
            AppError::Unauthorized => FetchError::SessionRejected,
            other => FetchError::Other(other.to_string()),
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    Network(reqwest::Error),
    Json(serde_json::Error),
    BadCredentials,
    Rejected(String),
    MissingToken,
    Other(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Network(e) => write!(f, "network error: {e}"),
            AuthError::Json(e)    => write!(f, "json error: {e}"),
            AuthError::BadCredentials => write!(f, "bad credentials"),
            AuthError::Rejected(msg) => write!(f, "login rejected: {msg}"),
            AuthError::MissingToken => write!(f, "login response carried no session token"),
            AuthError::Other(msg) => write!(f, "other error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self { AuthError::Network(e) }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self { AuthError::Json(e) }
}

impl From<AppError> for AuthError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Network(e) => AuthError::Network(e),
            AppError::Json(e)    => AuthError::Json(e),
            AppError::Unauthorized => AuthError::BadCredentials,
            other => AuthError::Other(other.to_string()),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Network(reqwest::Error),
    Io(io::Error),
    Json(serde_json::Error),
    Unauthorized,
    Api { status: StatusCode, body: String },
    InvalidUrl(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e)   => write!(f, "network error: {e}"),
            AppError::Io(e)        => write!(f, "io error: {e}"),
            AppError::Json(e)      => write!(f, "json error: {e}"),
            AppError::Unauthorized  => write!(f, "unauthorized"),
            AppError::Api { status, body } => {
                write!(f, "API request failed. Status: {status}, Body: {body}")
            }
            AppError::InvalidUrl(s) => write!(f, "invalid url: {s}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self { AppError::Network(e) }
}
impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self { AppError::Io(e) }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self { AppError::Json(e) }
}
