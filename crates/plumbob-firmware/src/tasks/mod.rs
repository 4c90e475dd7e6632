mod http;
mod network;
mod render;

pub(crate) use http::{HttpCommand, HTTP_CONTROL, http_server_task};
pub(crate) use network::network_supervisor_task;
pub(crate) use render::render_task;
