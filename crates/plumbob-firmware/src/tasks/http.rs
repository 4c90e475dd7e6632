use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use plumbob::{
    config::HTTP_PORT,
    controllers::api,
    net::http::{ContentHeaders, ContentType, ResponseHeaders},
};

use crate::{
    device::{SharedDevice, with_device},
    http::{Error, HttpConnection, HttpHandler, HttpResult, HttpServer},
};

const RX_BUFFER_SIZE: usize = 1536;
const TX_BUFFER_SIZE: usize = 1536;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpCommand {
    Serve,
    Stop,
}

/// Starts and stops the server around network changes
pub(crate) static HTTP_CONTROL: Signal<CriticalSectionRawMutex, HttpCommand> = Signal::new();

struct ApiHandler {
    device: &'static SharedDevice,
}

impl HttpHandler for ApiHandler {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult {
        let (method, path) = conn.route();
        log::debug!("http: {:?} {}", method, path);

        let result = conn
            .respond_with(|method, path, body, out| {
                with_device(self.device, |controller| {
                    api::handle(controller, method, path, body, out)
                })
            })
            .await;

        match result {
            Err(Error::TooLarge) => {
                let headers = ResponseHeaders::from_code(413)
                    .with_content(ContentHeaders::new(ContentType::TextPlain).with_length(0));
                conn.write_headers(&headers).await
            }
            other => other,
        }
    }
}

/// Serves the control API while [`HTTP_CONTROL`] says so.
#[embassy_executor::task]
pub(crate) async fn http_server_task(stack: Stack<'static>, device: &'static SharedDevice) {
    let handler = ApiHandler { device };
    let server = HttpServer::<ApiHandler, RX_BUFFER_SIZE, TX_BUFFER_SIZE>::new(&handler);
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];
    let mut serving = false;

    loop {
        if !serving {
            serving = HTTP_CONTROL.wait().await == HttpCommand::Serve;
            continue;
        }

        log::info!("http: listening on port {}", HTTP_PORT);
        let listen = server.listen_and_serve(stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer);
        if let Either::Second(command) = select(listen, HTTP_CONTROL.wait()).await {
            serving = command == HttpCommand::Serve;
            if !serving {
                log::info!("http: stopped");
            }
        }
    }
}
