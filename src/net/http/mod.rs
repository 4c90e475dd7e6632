//! Transport-independent HTTP pieces: request line parsing and response
//! header formatting. Socket handling lives in the firmware.

mod headers;

pub use headers::{
    ContentHeaders,
    ContentType,
    HttpMethod,
    ResponseHeaders,
    StatusCode,
    TargetWriter,
    find_content_length,
    parse_request_line,
};
