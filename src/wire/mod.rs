//! ROS2-CDR-compatible wire structs for the topics the core's ingest and
//! push Providers speak to (AMCL pose, odometry, Nav2 goal status, TTS and
//! AI/mode/avatar status request-response pairs). Hand-rolled on top of
//! [`cdr`] rather than a crate, since nothing in this codebase's
//! dependency corpus targets ROS2's CDR encapsulation.

pub mod cdr;
pub mod geometry_msgs;
pub mod nav_msgs;
pub mod status_msgs;
pub mod std_msgs;
