//! Collaborator traits

mod ports;

pub use ports::{AnnouncementSink, AuthorizationPolicy, PinStore, PlatformClient, RepoResult};
