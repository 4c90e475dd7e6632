//! Control API routing.
//!
//! Maps a parsed request onto [`DeviceController`] operations and writes
//! the response body into a caller supplied buffer. No I/O happens here,
//! so the firmware can hold the controller lock only for the call itself.

use embedded_storage::Storage;
use plumbob_composer::LedDriver;
use serde::Deserialize;

use crate::{
    app::DeviceController,
    domain::{
        dto::{BrightnessRequest, ConfigurationRequest, EnableRequest, SettingsRequest},
        entity::DeviceState,
        ports::DeviceError,
    },
    net::http::{ContentHeaders, ContentType, HttpMethod, ResponseHeaders},
};

const OK_BODY: &[u8] = b"OK";
const NOT_FOUND_BODY: &[u8] = b"Not found";
const BAD_REQUEST_BODY: &[u8] = b"Bad request";
const INTERNAL_ERROR_BODY: &[u8] = b"Internal error";
const UNAVAILABLE_BODY: &[u8] = b"Restarting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// The body is not the JSON the route expects
    Parse,
    Device(DeviceError),
    /// The response did not fit the output buffer
    Serialize,
}

impl From<DeviceError> for ApiError {
    fn from(error: DeviceError) -> Self {
        ApiError::Device(error)
    }
}

/// Outcome of a handled request; the body is the first `body_len` bytes
/// of the output buffer.
#[derive(Debug, Clone, Copy)]
pub struct Response {
    pub headers: ResponseHeaders,
    pub body_len: usize,
}

impl Response {
    pub fn status(&self) -> u16 {
        self.headers.status()
    }
}

enum Reply {
    Ok,
    Preflight,
    Json(usize),
    NotFound,
}

/// Handle one request against the controller.
pub fn handle<S: Storage, D: LedDriver<N>, const N: usize>(
    controller: &mut DeviceController<S, D, N>,
    method: HttpMethod,
    path: &str,
    body: &[u8],
    out: &mut [u8],
) -> Response {
    match route(controller, method, path, body, out) {
        Ok(Reply::Ok) => text(ResponseHeaders::success(), OK_BODY, out),
        Ok(Reply::Preflight) => Response {
            headers: ResponseHeaders::success(),
            body_len: 0,
        },
        Ok(Reply::Json(len)) => Response {
            headers: ResponseHeaders::success()
                .with_content(ContentHeaders::new(ContentType::Json).with_length(len)),
            body_len: len,
        },
        Ok(Reply::NotFound) => text(ResponseHeaders::not_found(), NOT_FOUND_BODY, out),
        Err(err) => {
            log::warn!("http: {:?} {} failed: {:?}", method, path, err);
            match err {
                ApiError::Parse
                | ApiError::Device(DeviceError::UnknownMode | DeviceError::InvalidCredentials) => {
                    text(ResponseHeaders::bad_request(), BAD_REQUEST_BODY, out)
                }
                ApiError::Device(DeviceError::NotAvailable) => {
                    text(ResponseHeaders::not_found(), NOT_FOUND_BODY, out)
                }
                ApiError::Device(DeviceError::RestartPending) => {
                    text(ResponseHeaders::service_unavailable(), UNAVAILABLE_BODY, out)
                }
                ApiError::Device(DeviceError::Persistence(_)) | ApiError::Serialize => {
                    text(ResponseHeaders::internal_error(), INTERNAL_ERROR_BODY, out)
                }
            }
        }
    }
}

fn route<S: Storage, D: LedDriver<N>, const N: usize>(
    controller: &mut DeviceController<S, D, N>,
    method: HttpMethod,
    path: &str,
    body: &[u8],
    out: &mut [u8],
) -> Result<Reply, ApiError> {
    if method == HttpMethod::Options {
        return Ok(Reply::Preflight);
    }

    match (controller.state(), method, path) {
        (DeviceState::Connected, HttpMethod::Post, "/enable") => {
            let request: EnableRequest = parse(body)?;
            controller.set_enabled(request.enabled)?;
            Ok(Reply::Ok)
        }
        (DeviceState::Connected, HttpMethod::Post, "/brightness") => {
            let request: BrightnessRequest = parse(body)?;
            controller.set_brightness(request.brightness)?;
            Ok(Reply::Ok)
        }
        (DeviceState::Connected, HttpMethod::Post, "/settings") => {
            let request: SettingsRequest = parse(body)?;
            let (mode, params) = request.into_parts();
            controller.set_mode(mode, &params)?;
            Ok(Reply::Ok)
        }
        (DeviceState::Connected, HttpMethod::Post, "/save") => {
            controller.persist()?;
            Ok(Reply::Ok)
        }
        (DeviceState::Connected, HttpMethod::Get, "/get_settings") => {
            let snapshot = controller.settings_snapshot();
            let len = serde_json_core::to_slice(&snapshot, out).map_err(|_| ApiError::Serialize)?;
            Ok(Reply::Json(len))
        }
        (DeviceState::Unconfigured, HttpMethod::Post, "/configuration") => {
            let request: ConfigurationRequest = parse(body)?;
            controller.submit_credentials(&request.ssid, &request.password)?;
            Ok(Reply::Ok)
        }
        _ => Ok(Reply::NotFound),
    }
}

fn parse<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, ApiError> {
    serde_json_core::from_slice(body)
        .map(|(value, _)| value)
        .map_err(|_| ApiError::Parse)
}

fn text(headers: ResponseHeaders, body: &[u8], out: &mut [u8]) -> Response {
    let len = body.len().min(out.len());
    out[..len].copy_from_slice(&body[..len]);
    Response {
        headers: headers.with_content(ContentHeaders::new(ContentType::TextPlain).with_length(len)),
        body_len: len,
    }
}
