use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::{String, Vec};
use plumbob::{
    controllers::api::Response,
    net::http::{HttpMethod, ResponseHeaders, TargetWriter as _, find_content_length, parse_request_line},
};

use super::{Error, HttpResult};

const HEADER_BUFFER_SIZE: usize = 512;
const BODY_BUFFER_SIZE: usize = 512;
const RESPONSE_BUFFER_SIZE: usize = 1024;
const BODY_RX_CHUNK_SIZE: usize = 128;

/// A parsed request head plus the socket to read the body from and
/// write the response to.
pub(crate) struct HttpConnection<'a> {
    method: HttpMethod,
    path: String<64>,
    socket: TcpSocket<'a>,
    content_length: usize,
    header_end: usize,
    header_buf: Vec<u8, HEADER_BUFFER_SIZE>,
    body_buf: Vec<u8, BODY_BUFFER_SIZE>,
}

impl<'a> HttpConnection<'a> {
    /// Read the request head from the socket.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut raw = [0u8; HEADER_BUFFER_SIZE];
        let (header_end, header_len) = read_heading(&mut raw, &mut socket).await?;
        if header_len == 0 {
            return Err(Error::Closed);
        }

        let header_str = core::str::from_utf8(&raw[..header_end]).map_err(|_| Error::Parse)?;
        let (method, raw_path, rest_headers) = parse_request_line(header_str).ok_or(Error::Parse)?;
        let content_length = find_content_length(rest_headers).unwrap_or(0) as usize;

        let mut path = String::new();
        path.push_str(raw_path).map_err(|()| Error::Parse)?;
        let header_buf = Vec::from_slice(&raw[..header_len]).map_err(|()| Error::Parse)?;

        Ok(Self {
            method,
            path,
            socket,
            content_length,
            header_end,
            header_buf,
            body_buf: Vec::new(),
        })
    }

    pub(crate) fn route(&self) -> (HttpMethod, &str) {
        (self.method, self.path.as_str())
    }

    /// Read the whole body, run `handler` on the request and send back
    /// whatever it produced.
    pub(crate) async fn respond_with(
        &mut self,
        handler: impl FnOnce(HttpMethod, &str, &[u8], &mut [u8]) -> Response,
    ) -> HttpResult {
        self.read_body().await?;

        let mut out = [0u8; RESPONSE_BUFFER_SIZE];
        let response = handler(self.method, self.path.as_str(), self.body_buf.as_slice(), &mut out);
        self.write_headers(&response.headers).await?;
        self.write_all(&out[..response.body_len]).await
    }

    /// Write the headers to the connection
    pub(crate) async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        self.header_buf.clear();
        headers.write_to(&mut self.header_buf)?;
        self.socket.write_all(self.header_buf.as_slice()).await?;
        self.socket.flush().await?;
        Ok(())
    }

    pub(crate) async fn close(mut self) {
        self.socket.close();
        if let Err(err) = self.socket.flush().await {
            log::debug!("http: close: {:?}", err);
        }
    }

    async fn write_all(&mut self, buf: &[u8]) -> HttpResult {
        if buf.is_empty() {
            return Ok(());
        }
        self.socket.write_all(buf).await?;
        self.socket.flush().await?;
        Ok(())
    }

    /// Collect the body into `body_buf`: whatever arrived with the head,
    /// then the rest from the socket.
    async fn read_body(&mut self) -> HttpResult {
        self.body_buf.clear();
        if self.content_length == 0 {
            return Ok(());
        }
        if self.content_length > BODY_BUFFER_SIZE {
            return Err(Error::TooLarge);
        }

        let tail = self.header_buf.get(self.header_end..).unwrap_or(&[]);
        let tail = &tail[..tail.len().min(self.content_length)];
        self.body_buf.extend_from_slice(tail).map_err(|()| Error::TooLarge)?;

        while self.body_buf.len() < self.content_length {
            let mut chunk = [0u8; BODY_RX_CHUNK_SIZE];
            let wanted = (self.content_length - self.body_buf.len()).min(BODY_RX_CHUNK_SIZE);
            let n = self.socket.read(&mut chunk[..wanted]).await?;
            if n == 0 {
                return Err(Error::NoData);
            }
            self.body_buf.extend_from_slice(&chunk[..n]).map_err(|()| Error::TooLarge)?;
        }
        Ok(())
    }
}

/// Read until the blank line that ends the head, or until `buf` is full.
///
/// Returns the end of the head and the number of bytes read. `(0, 0)`
/// means the peer closed before sending anything.
async fn read_heading(buf: &mut [u8], socket: &mut TcpSocket<'_>) -> Result<(usize, usize), Error> {
    let mut header_len = 0;
    loop {
        let n = socket.read(&mut buf[header_len..]).await?;
        if n == 0 {
            return Ok((header_len, header_len));
        }
        header_len += n;
        if let Some(pos) = buf[..header_len].windows(4).position(|w| w == b"\r\n\r\n") {
            return Ok((pos + 4, header_len));
        }
        if header_len >= buf.len() {
            return Ok((header_len, header_len));
        }
    }
}
