use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::Duration;

use super::{HttpResult, connection::HttpConnection};

/// Idle limit for a single client connection
const SOCKET_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) trait HttpHandler {
    async fn handle_request(&self, conn: &mut HttpConnection<'_>) -> HttpResult;
}

/// One connection at a time, closed after every response.
pub(crate) struct HttpServer<'a, T: HttpHandler, const RX_SIZE: usize, const TX_SIZE: usize> {
    handler: &'a T,
}

impl<'a, T: HttpHandler, const RX_SIZE: usize, const TX_SIZE: usize>
    HttpServer<'a, T, RX_SIZE, TX_SIZE>
{
    pub(crate) fn new(handler: &'a T) -> Self {
        Self { handler }
    }

    pub(crate) async fn listen_and_serve(
        &self,
        stack: Stack<'static>,
        port: u16,
        rx_buffer: &mut [u8; RX_SIZE],
        tx_buffer: &mut [u8; TX_SIZE],
    ) -> ! {
        loop {
            let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
            socket.set_timeout(Some(SOCKET_TIMEOUT));

            if let Err(err) = socket.accept(port).await {
                log::debug!("http: accept failed: {:?}", err);
                continue;
            }

            let mut conn = match HttpConnection::from_socket(socket).await {
                Ok(connection) => connection,
                Err(err) => {
                    log::warn!("http: connection startup error: {:?}", err);
                    continue;
                }
            };

            if let Err(err) = self.handler.handle_request(&mut conn).await {
                log::warn!("http: connection error: {:?}", err);
            }
            conn.close().await;
        }
    }
}
