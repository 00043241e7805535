use crate::error::ProtocolMismatch;
use crate::wire::cdr::{CdrReader, CdrWriter};
use crate::wire::std_msgs::Header;

/// `geometry_msgs/Point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    fn encode(&self, w: &mut CdrWriter) {
        w.write_f64(self.x);
        w.write_f64(self.y);
        w.write_f64(self.z);
    }

    fn decode(r: &mut CdrReader) -> Result<Self, ProtocolMismatch> {
        Ok(Self {
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
        })
    }
}

/// `geometry_msgs/Quaternion`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    fn encode(&self, w: &mut CdrWriter) {
        w.write_f64(self.x);
        w.write_f64(self.y);
        w.write_f64(self.z);
        w.write_f64(self.w);
    }

    fn decode(r: &mut CdrReader) -> Result<Self, ProtocolMismatch> {
        Ok(Self {
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
            w: r.read_f64()?,
        })
    }
}

/// `geometry_msgs/Pose`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

impl Pose {
    pub(crate) fn encode(&self, w: &mut CdrWriter) {
        self.position.encode(w);
        self.orientation.encode(w);
    }

    pub(crate) fn decode(r: &mut CdrReader) -> Result<Self, ProtocolMismatch> {
        Ok(Self {
            position: Point::decode(r)?,
            orientation: Quaternion::decode(r)?,
        })
    }
}

/// `geometry_msgs/PoseStamped`.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseStamped {
    pub header: Header,
    pub pose: Pose,
}

impl PoseStamped {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        self.pose.encode(&mut w);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            pose: Pose::decode(&mut r)?,
        })
    }
}

/// `geometry_msgs/Vector3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    fn encode(&self, w: &mut CdrWriter) {
        w.write_f64(self.x);
        w.write_f64(self.y);
        w.write_f64(self.z);
    }

    fn decode(r: &mut CdrReader) -> Result<Self, ProtocolMismatch> {
        Ok(Self {
            x: r.read_f64()?,
            y: r.read_f64()?,
            z: r.read_f64()?,
        })
    }
}

/// `geometry_msgs/Twist`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Twist {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.linear.encode(&mut w);
        self.angular.encode(&mut w);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            linear: Vector3::decode(&mut r)?,
            angular: Vector3::decode(&mut r)?,
        })
    }
}

/// `geometry_msgs/PoseWithCovariance`: a `Pose` plus its row-major 6x6
/// covariance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseWithCovariance {
    pub pose: Pose,
    pub covariance: [f64; 36],
}

impl PoseWithCovariance {
    pub(crate) fn encode(&self, w: &mut CdrWriter) {
        self.pose.encode(w);
        w.write_fixed_f64_array(&self.covariance);
    }

    pub(crate) fn decode(r: &mut CdrReader) -> Result<Self, ProtocolMismatch> {
        Ok(Self {
            pose: Pose::decode(r)?,
            covariance: r.read_fixed_f64_array()?,
        })
    }
}

/// `geometry_msgs/TwistWithCovariance`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwistWithCovariance {
    pub twist: Twist,
    pub covariance: [f64; 36],
}

impl TwistWithCovariance {
    pub(crate) fn encode(&self, w: &mut CdrWriter) {
        self.twist.linear.encode(w);
        self.twist.angular.encode(w);
        w.write_fixed_f64_array(&self.covariance);
    }

    pub(crate) fn decode(r: &mut CdrReader) -> Result<Self, ProtocolMismatch> {
        Ok(Self {
            twist: Twist {
                linear: Vector3::decode(r)?,
                angular: Vector3::decode(r)?,
            },
            covariance: r.read_fixed_f64_array()?,
        })
    }
}
