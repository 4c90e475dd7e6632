//! Stateless DHCP responder for the provisioning access point.
//!
//! Every client gets an address derived from its MAC, so no lease table
//! is kept. Only DISCOVER and REQUEST are answered.

use core::net::Ipv4Addr;

pub const SERVER_PORT: u16 = 67;
pub const CLIENT_PORT: u16 = 68;

const BOOT_REQUEST: u8 = 1;
const BOOT_REPLY: u8 = 2;

const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];
/// BOOTP header plus the magic cookie
const OPTIONS_START: usize = 240;

const OPTION_PAD: u8 = 0;
const OPTION_SUBNET_MASK: u8 = 1;
const OPTION_ROUTER: u8 = 3;
const OPTION_DNS: u8 = 6;
const OPTION_LEASE_TIME: u8 = 51;
const OPTION_MESSAGE_TYPE: u8 = 53;
const OPTION_SERVER_ID: u8 = 54;
const OPTION_END: u8 = 255;

const LEASE_TIME_SECS: u32 = 3600;
const SUBNET_MASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);

/// First host address handed out; the pool holds `POOL_SIZE` addresses
const POOL_START: u8 = 2;
const POOL_SIZE: u8 = 49;

/// Largest reply [`build_reply`] produces
pub const REPLY_LEN: usize = OPTIONS_START + 3 + 5 * 6 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Discover,
    Offer,
    Request,
    Ack,
}

impl MessageType {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(MessageType::Discover),
            2 => Some(MessageType::Offer),
            3 => Some(MessageType::Request),
            5 => Some(MessageType::Ack),
            _ => None,
        }
    }

    const fn as_raw(self) -> u8 {
        match self {
            MessageType::Discover => 1,
            MessageType::Offer => 2,
            MessageType::Request => 3,
            MessageType::Ack => 5,
        }
    }

    /// The message a server answers this one with
    pub const fn reply(self) -> Option<Self> {
        match self {
            MessageType::Discover => Some(MessageType::Offer),
            MessageType::Request => Some(MessageType::Ack),
            MessageType::Offer | MessageType::Ack => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DhcpRequest {
    pub xid: [u8; 4],
    pub client_mac: [u8; 6],
    pub message_type: MessageType,
}

/// Parse a client packet. Anything that is not a well formed BOOTREQUEST
/// with a known message type yields `None`.
pub fn parse_request(packet: &[u8]) -> Option<DhcpRequest> {
    if packet.len() < OPTIONS_START || packet[0] != BOOT_REQUEST {
        return None;
    }
    if packet[236..OPTIONS_START] != MAGIC_COOKIE {
        return None;
    }

    let mut xid = [0u8; 4];
    xid.copy_from_slice(&packet[4..8]);
    let mut client_mac = [0u8; 6];
    client_mac.copy_from_slice(&packet[28..34]);

    let message_type = find_option(&packet[OPTIONS_START..], OPTION_MESSAGE_TYPE)
        .and_then(|data| data.first().copied())
        .and_then(MessageType::from_raw)?;

    Some(DhcpRequest {
        xid,
        client_mac,
        message_type,
    })
}

/// Address for a client inside the server's /24.
pub fn lease_address(server: Ipv4Addr, mac: &[u8; 6]) -> Ipv4Addr {
    let [a, b, c, _] = server.octets();
    Ipv4Addr::new(a, b, c, POOL_START + mac[5] % POOL_SIZE)
}

/// Write a reply into `buffer` and return its length, or `None` if the
/// buffer is shorter than [`REPLY_LEN`].
pub fn build_reply(
    server: Ipv4Addr,
    request: &DhcpRequest,
    offered: Ipv4Addr,
    message_type: MessageType,
    buffer: &mut [u8],
) -> Option<usize> {
    let buffer = buffer.get_mut(..REPLY_LEN)?;
    buffer.fill(0);

    buffer[0] = BOOT_REPLY;
    buffer[1] = 1; // ethernet
    buffer[2] = 6;
    buffer[4..8].copy_from_slice(&request.xid);
    buffer[10] = 0x80; // broadcast
    buffer[16..20].copy_from_slice(&offered.octets());
    buffer[20..24].copy_from_slice(&server.octets());
    buffer[28..34].copy_from_slice(&request.client_mac);
    buffer[236..OPTIONS_START].copy_from_slice(&MAGIC_COOKIE);

    let mut options = OptionWriter {
        buffer,
        pos: OPTIONS_START,
    };
    options.put(OPTION_MESSAGE_TYPE, &[message_type.as_raw()]);
    options.put(OPTION_SERVER_ID, &server.octets());
    options.put(OPTION_LEASE_TIME, &LEASE_TIME_SECS.to_be_bytes());
    options.put(OPTION_SUBNET_MASK, &SUBNET_MASK.octets());
    options.put(OPTION_ROUTER, &server.octets());
    options.put(OPTION_DNS, &server.octets());
    options.buffer[options.pos] = OPTION_END;

    Some(options.pos + 1)
}

struct OptionWriter<'a> {
    buffer: &'a mut [u8],
    pos: usize,
}

impl OptionWriter<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn put(&mut self, code: u8, data: &[u8]) {
        let pos = self.pos;
        self.buffer[pos] = code;
        self.buffer[pos + 1] = data.len() as u8;
        self.buffer[pos + 2..pos + 2 + data.len()].copy_from_slice(data);
        self.pos = pos + 2 + data.len();
    }
}

/// `options` starts right after the magic cookie.
fn find_option(options: &[u8], code: u8) -> Option<&[u8]> {
    let mut i = 0;
    while let Some(&current) = options.get(i) {
        match current {
            OPTION_END => return None,
            OPTION_PAD => i += 1,
            _ => {
                let len = usize::from(*options.get(i + 1)?);
                let data = options.get(i + 2..i + 2 + len)?;
                if current == code {
                    return Some(data);
                }
                i += 2 + len;
            }
        }
    }
    None
}
