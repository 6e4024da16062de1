//! Inbound messages from the host.
//!
//! The SDK hands out packed little-endian `SIMCONNECT_RECV` records: a 12 byte
//! header (`dwSize`, `dwVersion`, `dwID`) followed by a body whose shape depends
//! on `dwID`. Every read below is checked against the buffer length first, so a
//! short record turns into a [`DecodeError`] instead of garbage.

use crate::error::DecodeError;
use bytes::Buf;
use strum::FromRepr;

pub const HEADER_LEN: usize = 12;

const APPLICATION_NAME_LEN: usize = 256;
const FILE_NAME_LEN: usize = 260; // MAX_PATH

/// `SIMCONNECT_RECV_ID`, only the ids this client tells apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromRepr)]
#[repr(u32)]
pub enum RecvId {
    Null = 0,
    Exception = 1,
    Open = 2,
    Quit = 3,
    Event = 4,
    EventFilename = 6,
    SimObjectDataByType = 9,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build_major: u32,
    pub build_minor: u32,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build_major, self.build_minor
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Null,
    Exception {
        code: u32,
        send_id: u32,
        index: u32,
    },
    Open {
        application: String,
        version: Version,
        simconnect_version: Version,
    },
    Quit,
    Event {
        group_id: u32,
        event_id: u32,
        data: u32,
    },
    EventFilename {
        event_id: u32,
        data: u32,
        file_name: String,
    },
    SimObjectDataByType {
        request_id: u32,
        object_id: u32,
        define_id: u32,
        payload: Vec<u8>,
    },
    Other {
        id: u32,
    },
}

impl Message {
    pub fn id(&self) -> u32 {
        match self {
            Message::Null => RecvId::Null as u32,
            Message::Exception { .. } => RecvId::Exception as u32,
            Message::Open { .. } => RecvId::Open as u32,
            Message::Quit => RecvId::Quit as u32,
            Message::Event { .. } => RecvId::Event as u32,
            Message::EventFilename { .. } => RecvId::EventFilename as u32,
            Message::SimObjectDataByType { .. } => RecvId::SimObjectDataByType as u32,
            Message::Other { id } => *id,
        }
    }

    /// Decode one record as returned by `SimConnect_GetNextDispatch`.
    pub fn decode(buf: &[u8]) -> Result<Message, DecodeError> {
        if buf.len() < HEADER_LEN {
            return Err(DecodeError::Truncated {
                tag: "header",
                needed: HEADER_LEN,
                actual: buf.len(),
            });
        }

        let mut header = &buf[..HEADER_LEN];
        let declared = header.get_u32_le() as usize;
        let _version = header.get_u32_le();
        let id = header.get_u32_le();

        if declared < HEADER_LEN || declared > buf.len() {
            return Err(DecodeError::SizeMismatch {
                declared,
                actual: buf.len(),
            });
        }

        let mut body = &buf[HEADER_LEN..declared];
        let kind = match RecvId::from_repr(id) {
            Some(kind) => kind,
            None => return Ok(Message::Other { id }),
        };

        let message = match kind {
            RecvId::Null => Message::Null,
            RecvId::Quit => Message::Quit,
            RecvId::Exception => {
                need(&body, "EXCEPTION", 12)?;
                Message::Exception {
                    code: body.get_u32_le(),
                    send_id: body.get_u32_le(),
                    index: body.get_u32_le(),
                }
            }
            RecvId::Open => {
                need(&body, "OPEN", APPLICATION_NAME_LEN + 40)?;
                let application = c_string(&body[..APPLICATION_NAME_LEN]);
                body.advance(APPLICATION_NAME_LEN);
                let version = read_version(&mut body);
                let simconnect_version = read_version(&mut body);
                Message::Open {
                    application,
                    version,
                    simconnect_version,
                }
            }
            RecvId::Event => {
                need(&body, "EVENT", 12)?;
                Message::Event {
                    group_id: body.get_u32_le(),
                    event_id: body.get_u32_le(),
                    data: body.get_u32_le(),
                }
            }
            RecvId::EventFilename => {
                need(&body, "EVENT_FILENAME", 12 + FILE_NAME_LEN)?;
                let _group_id = body.get_u32_le();
                let event_id = body.get_u32_le();
                let data = body.get_u32_le();
                Message::EventFilename {
                    event_id,
                    data,
                    file_name: c_string(&body[..FILE_NAME_LEN]),
                }
            }
            RecvId::SimObjectDataByType => {
                // request, object, define, flags, entry number, out of, define count
                need(&body, "SIMOBJECT_DATA_BYTYPE", 28)?;
                let request_id = body.get_u32_le();
                let object_id = body.get_u32_le();
                let define_id = body.get_u32_le();
                body.advance(16);
                Message::SimObjectDataByType {
                    request_id,
                    object_id,
                    define_id,
                    payload: body.to_vec(),
                }
            }
        };

        Ok(message)
    }
}

fn need(body: &[u8], tag: &'static str, len: usize) -> Result<(), DecodeError> {
    if body.len() < len {
        Err(DecodeError::Truncated {
            tag,
            needed: HEADER_LEN + len,
            actual: HEADER_LEN + body.len(),
        })
    } else {
        Ok(())
    }
}

fn read_version(body: &mut &[u8]) -> Version {
    Version {
        major: body.get_u32_le(),
        minor: body.get_u32_le(),
        build_major: body.get_u32_le(),
        build_minor: body.get_u32_le(),
    }
}

fn c_string(raw: &[u8]) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
