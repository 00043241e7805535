use crate::error::ProtocolMismatch;
use crate::wire::cdr::{CdrReader, CdrWriter};
use crate::wire::std_msgs::Header;

macro_rules! request_response {
    ($name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub header: Header,
            pub request_id: String,
            $(pub $field: $ty,)*
        }
    };
}

request_response!(TtsStatusRequest { code: i8 });
request_response!(TtsStatusResponse { code: i8, status: String });
request_response!(AiStatusRequest { code: i8 });
request_response!(AiStatusResponse { code: i8, status: String });
request_response!(AvatarFaceRequest { code: i8, face_text: String });
request_response!(AvatarFaceResponse { code: i8, message: String });
request_response!(ModeStatusRequest { code: i8, mode: String });
request_response!(ModeStatusResponse { code: i8, current_mode: String, message: String });
request_response!(ConfigRequest { config: String });
request_response!(ConfigResponse { config: String, message: String });

impl TtsStatusRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_i8(self.code);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            code: r.read_i8()?,
        })
    }
}

impl TtsStatusResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_i8(self.code);
        w.write_string(&self.status);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            code: r.read_i8()?,
            status: r.read_string()?,
        })
    }
}

impl AiStatusRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_i8(self.code);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            code: r.read_i8()?,
        })
    }
}

impl AiStatusResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_i8(self.code);
        w.write_string(&self.status);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            code: r.read_i8()?,
            status: r.read_string()?,
        })
    }
}

impl AvatarFaceRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_i8(self.code);
        w.write_string(&self.face_text);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            code: r.read_i8()?,
            face_text: r.read_string()?,
        })
    }
}

impl AvatarFaceResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_i8(self.code);
        w.write_string(&self.message);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            code: r.read_i8()?,
            message: r.read_string()?,
        })
    }
}

impl ModeStatusRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_i8(self.code);
        w.write_string(&self.mode);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            code: r.read_i8()?,
            mode: r.read_string()?,
        })
    }
}

impl ModeStatusResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_i8(self.code);
        w.write_string(&self.current_mode);
        w.write_string(&self.message);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            code: r.read_i8()?,
            current_mode: r.read_string()?,
            message: r.read_string()?,
        })
    }
}

impl ConfigRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_string(&self.config);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            config: r.read_string()?,
        })
    }
}

impl ConfigResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.request_id);
        w.write_string(&self.config);
        w.write_string(&self.message);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            request_id: r.read_string()?,
            config: r.read_string()?,
            message: r.read_string()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::std_msgs::Time;

    fn header() -> Header {
        Header {
            stamp: Time { sec: 5, nanosec: 0 },
            frame_id: "tts".to_string(),
        }
    }

    #[test]
    fn tts_status_request_round_trips() {
        let original = TtsStatusRequest {
            header: header(),
            request_id: "abc-123".to_string(),
            code: 2,
        };
        let decoded = TtsStatusRequest::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn mode_status_round_trips_with_empty_strings() {
        let original = ModeStatusRequest {
            header: header(),
            request_id: "r1".to_string(),
            code: 0,
            mode: String::new(),
        };
        let decoded = ModeStatusRequest::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn config_response_round_trips() {
        let original = ConfigResponse {
            header: header(),
            request_id: "r2".to_string(),
            config: "{}".to_string(),
            message: "ok".to_string(),
        };
        let decoded = ConfigResponse::decode(&original.encode()).unwrap();
        assert_eq!(decoded, original);
    }
}
