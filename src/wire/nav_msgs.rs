use crate::error::ProtocolMismatch;
use crate::wire::cdr::{CdrReader, CdrWriter};
use crate::wire::geometry_msgs::{Pose, PoseWithCovariance, TwistWithCovariance};
use crate::wire::std_msgs::{Header, Time};

/// `nav_msgs/Odometry`.
#[derive(Debug, Clone, PartialEq)]
pub struct Odometry {
    pub header: Header,
    pub child_frame_id: String,
    pub pose: PoseWithCovariance,
    pub twist: TwistWithCovariance,
}

impl Odometry {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        w.write_string(&self.child_frame_id);
        self.pose.encode(&mut w);
        self.twist.encode(&mut w);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            child_frame_id: r.read_string()?,
            pose: PoseWithCovariance::decode(&mut r)?,
            twist: TwistWithCovariance::decode(&mut r)?,
        })
    }
}

/// `nav_msgs/AMCLPose`: the AMCL localization estimate plus its 6x6
/// covariance, reported as a simple pose rather than `PoseWithCovariance`
/// by the original topic definition.
#[derive(Debug, Clone, PartialEq)]
pub struct AmclPose {
    pub header: Header,
    pub pose: Pose,
    pub covariance: [f64; 36],
}

impl AmclPose {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        self.header.encode(&mut w);
        self.pose.encode(&mut w);
        w.write_fixed_f64_array(&self.covariance);
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        Ok(Self {
            header: Header::decode(&mut r)?,
            pose: Pose::decode(&mut r)?,
            covariance: r.read_fixed_f64_array()?,
        })
    }
}

/// `nav_msgs/GoalID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalId {
    pub uuid: [u8; 16],
}

/// `nav_msgs/GoalInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalInfo {
    pub goal_id: GoalId,
    pub stamp: Time,
}

/// `nav_msgs/GoalStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalStatus {
    pub goal_info: GoalInfo,
    pub status: i32,
}

impl GoalStatus {
    fn encode(&self, w: &mut CdrWriter) {
        w.write_fixed_u8_array(&self.goal_info.goal_id.uuid);
        self.goal_info.stamp.encode(w);
        w.write_i32(self.status);
    }

    fn decode(r: &mut CdrReader) -> Result<Self, ProtocolMismatch> {
        Ok(Self {
            goal_info: GoalInfo {
                goal_id: GoalId {
                    uuid: r.read_fixed_u8_array()?,
                },
                stamp: Time::decode(r)?,
            },
            status: r.read_i32()?,
        })
    }
}

/// `nav_msgs/Nav2Status`: a variable-length list of per-goal statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nav2Status {
    pub status_list: Vec<GoalStatus>,
}

impl Nav2Status {
    pub fn encode(&self) -> Vec<u8> {
        let mut w = CdrWriter::new();
        w.write_sequence_len(self.status_list.len());
        for status in &self.status_list {
            status.encode(&mut w);
        }
        w.into_bytes()
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolMismatch> {
        let mut r = CdrReader::new(bytes)?;
        let len = r.read_sequence_len()?;
        let mut status_list = Vec::with_capacity(len);
        for _ in 0..len {
            status_list.push(GoalStatus::decode(&mut r)?);
        }
        Ok(Self { status_list })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::geometry_msgs::{Point, Pose, Quaternion, Twist, Vector3};

    fn header() -> Header {
        Header {
            stamp: Time { sec: 1, nanosec: 2 },
            frame_id: "odom".to_string(),
        }
    }

    #[test]
    fn odometry_round_trips() {
        let original = Odometry {
            header: header(),
            child_frame_id: "base_link".to_string(),
            pose: PoseWithCovariance {
                pose: Pose {
                    position: Point { x: 1.0, y: 2.0, z: 0.0 },
                    orientation: Quaternion { x: 0.0, y: 0.0, z: 0.0, w: 1.0 },
                },
                covariance: [0.0; 36],
            },
            twist: TwistWithCovariance {
                twist: Twist {
                    linear: Vector3 { x: 0.1, y: 0.0, z: 0.0 },
                    angular: Vector3 { x: 0.0, y: 0.0, z: 0.05 },
                },
                covariance: [0.0; 36],
            },
        };
        let encoded = original.encode();
        let decoded = Odometry::decode(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn nav2_status_round_trips_empty_and_populated() {
        let empty = Nav2Status { status_list: Vec::new() };
        assert_eq!(Nav2Status::decode(&empty.encode()).unwrap(), empty);

        let populated = Nav2Status {
            status_list: vec![GoalStatus {
                goal_info: GoalInfo {
                    goal_id: GoalId { uuid: [7; 16] },
                    stamp: Time { sec: 9, nanosec: 0 },
                },
                status: 3,
            }],
        };
        assert_eq!(Nav2Status::decode(&populated.encode()).unwrap(), populated);
    }
}
